use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::VaultResult;

use super::principal::Identity;

/// Fixed key for the single durable session record under the data root.
const SESSION_FILE: &str = "session.json";

/// Holds the zero-or-one active identity for this process and mirrors it to
/// a JSON record so a restart resumes the signed-in state.
///
/// A missing or unreadable record restores to the logged-out state, never an
/// error: read-side persistence problems degrade, write-side ones surface.
pub struct SessionStore {
    path: PathBuf,
    current: RwLock<Option<Identity>>,
}

impl SessionStore {
    /// Open (and if needed create) the session record under `root`.
    pub fn open<P: AsRef<Path>>(root: P) -> VaultResult<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;
        let path = root.join(SESSION_FILE);
        let current = Self::load(&path);
        if let Some(identity) = &current {
            debug!(target: "reportvault::session", "restored session for '{}'", identity.email);
        }
        Ok(Self { path, current: RwLock::new(current) })
    }

    fn load(path: &Path) -> Option<Identity> {
        let raw = fs::read_to_string(path).ok()?;
        match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!(target: "reportvault::session", "ignoring corrupt session record at '{}': {}", path.display(), e);
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.current.read().clone()
    }

    /// role == admin for the active identity; false when logged out.
    pub fn is_admin(&self) -> bool {
        self.current.read().as_ref().map(Identity::is_admin).unwrap_or(false)
    }

    /// Replace the active identity and persist the snapshot. The durable
    /// write happens first so a failure leaves the prior state intact.
    pub(crate) fn set(&self, identity: Identity) -> VaultResult<()> {
        let raw = serde_json::to_string_pretty(&identity)?;
        fs::write(&self.path, raw)?;
        *self.current.write() = Some(identity);
        Ok(())
    }

    /// Clear the active identity and remove the durable record. Clearing an
    /// already-empty store is a no-op.
    pub(crate) fn clear(&self) -> VaultResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        *self.current.write() = None;
        Ok(())
    }
}
