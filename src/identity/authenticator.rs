use std::sync::Arc;

use tracing::info;

use crate::audit::{ActionKind, AuditEntry, AuditLog};
use crate::error::{VaultError, VaultResult};

use super::directory::IdentityDirectory;
use super::principal::Identity;
use super::session::SessionStore;
use super::verifier::CredentialVerifier;

/// Sign-in orchestration: directory lookup, credential verification via the
/// pluggable backend, session update and audit trail.
///
/// Failures leave the session untouched and are never retried internally.
/// Authenticating while already signed in silently overwrites the session
/// with the new identity; no logout event is emitted for the old one.
pub struct Authenticator {
    directory: Arc<IdentityDirectory>,
    verifier: Arc<dyn CredentialVerifier>,
    session: Arc<SessionStore>,
    audit: Arc<AuditLog>,
}

impl Authenticator {
    pub fn new(
        directory: Arc<IdentityDirectory>,
        verifier: Arc<dyn CredentialVerifier>,
        session: Arc<SessionStore>,
        audit: Arc<AuditLog>,
    ) -> Self {
        Self { directory, verifier, session, audit }
    }

    /// Credential sign-in. `InvalidCredential` when the email is unknown or
    /// the backend rejects the credential; on success the session is set and
    /// persisted and a login event is appended.
    pub fn authenticate(&self, email: &str, credential: &str) -> VaultResult<Identity> {
        let identity = self
            .directory
            .lookup_by_email(email)
            .ok_or_else(|| VaultError::invalid_credential("invalid email or password"))?
            .clone();
        if !self.verifier.verify(&identity, credential) {
            return Err(VaultError::invalid_credential("invalid email or password"));
        }
        self.complete_login(identity, "Signed in")
    }

    /// Federated sign-in. The token is not inspected in this scope (the demo
    /// provider is simulated); `ProviderRejected` when no identity carries
    /// the federated marker.
    pub fn authenticate_federated(&self, _provider_token: &str) -> VaultResult<Identity> {
        let identity = self
            .directory
            .lookup_federated()
            .ok_or_else(|| VaultError::provider_rejected("no federated identity registered"))?
            .clone();
        self.complete_login(identity, "Signed in via federated provider")
    }

    fn complete_login(&self, identity: Identity, action: &str) -> VaultResult<Identity> {
        self.session.set(identity.clone())?;
        self.audit.append(AuditEntry::for_actor(&identity, ActionKind::Login, action));
        info!(target: "reportvault::auth", "auth.login user='{}' role={}", identity.email, identity.role.as_str());
        Ok(identity)
    }

    /// Sign out the active identity, appending a logout event first. A no-op
    /// (Ok) when nobody is signed in.
    pub fn logout(&self) -> VaultResult<()> {
        let Some(identity) = self.session.current_identity() else {
            return Ok(());
        };
        self.audit.append(AuditEntry::for_actor(&identity, ActionKind::Logout, "Signed out"));
        self.session.clear()?;
        info!(target: "reportvault::auth", "auth.logout user='{}'", identity.email);
        Ok(())
    }
}
