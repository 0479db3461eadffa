//! Composition root. Services are constructed once here and handed out by
//! reference; nothing in the crate reaches for a global.

use std::path::Path;
use std::sync::Arc;

use crate::audit::AuditLog;
use crate::error::VaultResult;
use crate::identity::{
    Authenticator, CredentialVerifier, DemoVerifier, IdentityDirectory, SessionStore,
};
use crate::registry::ReportRegistry;

/// Handle bundling the core services over one data root.
pub struct Vault {
    directory: Arc<IdentityDirectory>,
    session: Arc<SessionStore>,
    audit: Arc<AuditLog>,
    registry: Arc<ReportRegistry>,
    authenticator: Authenticator,
}

impl Vault {
    /// Open the vault with explicit collaborators. `data_dir` receives the
    /// durable session and audit records.
    pub fn open_with<P: AsRef<Path>>(
        data_dir: P,
        directory: IdentityDirectory,
        registry: ReportRegistry,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> VaultResult<Self> {
        let data_dir = data_dir.as_ref();
        let directory = Arc::new(directory);
        let session = Arc::new(SessionStore::open(data_dir)?);
        let audit = Arc::new(AuditLog::open(data_dir)?);
        let registry = Arc::new(registry);
        let authenticator = Authenticator::new(
            Arc::clone(&directory),
            verifier,
            Arc::clone(&session),
            Arc::clone(&audit),
        );
        Ok(Self { directory, session, audit, registry, authenticator })
    }

    /// Open with the demo identity directory, the demo credential backend
    /// and an empty registry.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> VaultResult<Self> {
        Self::open_with(
            data_dir,
            IdentityDirectory::seed_demo(),
            ReportRegistry::new(),
            Arc::new(DemoVerifier::default()),
        )
    }

    /// Open fully seeded: demo identities, the six demo reports and (when
    /// the log is empty) the historical demo audit events.
    pub fn open_demo<P: AsRef<Path>>(data_dir: P) -> VaultResult<Self> {
        let vault = Self::open_with(
            data_dir,
            IdentityDirectory::seed_demo(),
            ReportRegistry::seed_demo(),
            Arc::new(DemoVerifier::default()),
        )?;
        vault.audit.seed_demo();
        Ok(vault)
    }

    pub fn directory(&self) -> &IdentityDirectory {
        &self.directory
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    pub fn registry(&self) -> &ReportRegistry {
        &self.registry
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }
}
