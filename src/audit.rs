//! Append-only audit trail of user actions.
//!
//! The log itself enforces no authorization: any holder of the handle may
//! append or query, and the admin-only surfaces sitting above this crate are
//! responsible for gating who gets to read it. That split is deliberate and
//! must be preserved if the log is ever exposed over a network boundary.
//!
//! The collection is unbounded with no compaction — a known production gap
//! in this scope, kept rather than silently fixed.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::VaultResult;
use crate::identity::Identity;

const AUDIT_FILE: &str = "audit.json";

/// Explicit classification of an audit action, stamped at event-creation
/// time. Free-text substring matching survives only in the text filter of
/// [`AuditLog::query`]; it no longer decides the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Login,
    Logout,
    View,
    Download,
    Other,
}

/// Kind predicate for [`AuditLog::query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    All,
    Only(ActionKind),
}

impl KindFilter {
    fn matches(&self, kind: ActionKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(k) => *k == kind,
        }
    }
}

/// What callers submit; the log assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub actor_id: String,
    pub actor_name: String,
    pub kind: ActionKind,
    pub action: String,
    pub resource_id: Option<String>,
    pub resource_name: Option<String>,
}

impl AuditEntry {
    /// Entry attributed to an identity. The actor name is snapshotted here,
    /// not referenced, so later directory changes never rewrite history.
    pub fn for_actor<S: Into<String>>(actor: &Identity, kind: ActionKind, action: S) -> Self {
        Self {
            actor_id: actor.id.clone(),
            actor_name: actor.name.clone(),
            kind,
            action: action.into(),
            resource_id: None,
            resource_name: None,
        }
    }

    pub fn with_resource<S: Into<String>>(mut self, id: S, name: S) -> Self {
        self.resource_id = Some(id.into());
        self.resource_name = Some(name.into());
        self
    }
}

/// One immutable record of an action by an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: Uuid,
    pub actor_id: String,
    pub actor_name: String,
    pub kind: ActionKind,
    pub action: String,
    pub resource_id: Option<String>,
    pub resource_name: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Ordered, append-only event store. Insertion order is authoritative and
/// timestamps never decrease along it (the clock is clamped if it steps
/// back). Persisted verbatim as one JSON array, reloaded on open; a missing
/// or corrupt file loads as empty.
pub struct AuditLog {
    path: PathBuf,
    events: RwLock<Vec<AuditEvent>>,
}

impl AuditLog {
    pub fn open<P: AsRef<Path>>(root: P) -> VaultResult<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;
        let path = root.join(AUDIT_FILE);
        let events = Self::load(&path);
        debug!(target: "reportvault::audit", "audit log opened with {} event(s)", events.len());
        Ok(Self { path, events: RwLock::new(events) })
    }

    fn load(path: &Path) -> Vec<AuditEvent> {
        let Ok(raw) = fs::read_to_string(path) else { return Vec::new() };
        match serde_json::from_str::<Vec<AuditEvent>>(&raw) {
            Ok(events) => events,
            Err(e) => {
                warn!(target: "reportvault::audit", "ignoring corrupt audit file at '{}': {}", path.display(), e);
                Vec::new()
            }
        }
    }

    /// Append an entry. Always succeeds: the in-memory sequence only grows,
    /// and a failed durable write is logged and retried on the next append
    /// rather than surfaced to the caller.
    pub fn append(&self, entry: AuditEntry) -> AuditEvent {
        let mut events = self.events.write();
        let now = Utc::now();
        let timestamp = match events.last() {
            Some(prev) => now.max(prev.timestamp),
            None => now,
        };
        let event = AuditEvent {
            id: Uuid::new_v4(),
            actor_id: entry.actor_id,
            actor_name: entry.actor_name,
            kind: entry.kind,
            action: entry.action,
            resource_id: entry.resource_id,
            resource_name: entry.resource_name,
            timestamp,
        };
        events.push(event.clone());
        if let Err(e) = Self::persist(&self.path, &events) {
            warn!(target: "reportvault::audit", "audit persist failed: {}", e);
        }
        event
    }

    fn persist(path: &Path, events: &[AuditEvent]) -> VaultResult<()> {
        let raw = serde_json::to_string_pretty(events)?;
        fs::write(path, raw)?;
        Ok(())
    }

    /// Query by case-insensitive substring over actor name, action text and
    /// resource name (empty text passes everything), intersected with a kind
    /// predicate matched against the stored [`ActionKind`]. Insertion order
    /// is preserved.
    pub fn query(&self, filter_text: &str, kind: KindFilter) -> Vec<AuditEvent> {
        let needle = filter_text.to_lowercase();
        self.events
            .read()
            .iter()
            .filter(|e| kind.matches(e.kind))
            .filter(|e| {
                needle.is_empty()
                    || e.actor_name.to_lowercase().contains(&needle)
                    || e.action.to_lowercase().contains(&needle)
                    || e.resource_name
                        .as_deref()
                        .is_some_and(|n| n.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    /// Full ordered snapshot.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.read().clone()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Seed the historical demo events, only when the log is empty.
    pub fn seed_demo(&self) {
        if !self.is_empty() {
            return;
        }
        let base = Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).single().unwrap_or_else(Utc::now);
        let seeds = [
            ("1", "Admin User", ActionKind::Login, "Signed in", None),
            ("1", "Admin User", ActionKind::Other, "Added report", Some(("5", "Sales Pipeline Analysis"))),
            ("2", "Regular User", ActionKind::View, "Viewed report", Some(("2", "Customer Acquisition Metrics"))),
        ];
        let mut events = self.events.write();
        for (i, (actor_id, actor_name, kind, action, resource)) in seeds.iter().enumerate() {
            events.push(AuditEvent {
                id: Uuid::new_v4(),
                actor_id: (*actor_id).into(),
                actor_name: (*actor_name).into(),
                kind: *kind,
                action: (*action).into(),
                resource_id: resource.map(|(id, _)| id.into()),
                resource_name: resource.map(|(_, name)| name.into()),
                timestamp: base + chrono::Duration::hours(i as i64 * 4),
            });
        }
        if let Err(e) = Self::persist(&self.path, &events) {
            warn!(target: "reportvault::audit", "audit persist failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{Provider, Role};
    use tempfile::tempdir;

    fn actor() -> Identity {
        Identity {
            id: "1".into(),
            name: "Admin User".into(),
            email: "admin@example.com".into(),
            role: Role::Admin,
            provider: Provider::Credential,
        }
    }

    #[test]
    fn append_grows_in_order() {
        let tmp = tempdir().unwrap();
        let log = AuditLog::open(tmp.path()).unwrap();
        for i in 0..5 {
            log.append(AuditEntry::for_actor(&actor(), ActionKind::View, format!("Viewed report {i}")));
        }
        let events = log.events();
        assert_eq!(events.len(), 5);
        for (i, e) in events.iter().enumerate() {
            assert_eq!(e.action, format!("Viewed report {i}"));
        }
        for pair in events.windows(2) {
            assert!(pair[1].timestamp >= pair[0].timestamp);
        }
    }

    #[test]
    fn kind_filter_is_exact_not_substring() {
        let tmp = tempdir().unwrap();
        let log = AuditLog::open(tmp.path()).unwrap();
        log.append(AuditEntry::for_actor(&actor(), ActionKind::Login, "Signed in"));
        log.append(AuditEntry::for_actor(&actor(), ActionKind::Logout, "Signed out"));

        let logins = log.query("", KindFilter::Only(ActionKind::Login));
        assert_eq!(logins.len(), 1);
        assert_eq!(logins[0].kind, ActionKind::Login);
    }

    #[test]
    fn text_filter_covers_actor_action_and_resource() {
        let tmp = tempdir().unwrap();
        let log = AuditLog::open(tmp.path()).unwrap();
        log.append(
            AuditEntry::for_actor(&actor(), ActionKind::Download, "Downloaded report")
                .with_resource("4", "Inventory Status Report"),
        );
        log.append(AuditEntry::for_actor(&actor(), ActionKind::Login, "Signed in"));

        assert_eq!(log.query("INVENTORY", KindFilter::All).len(), 1);
        assert_eq!(log.query("admin user", KindFilter::All).len(), 2);
        assert_eq!(log.query("downloaded", KindFilter::All).len(), 1);
        assert!(log.query("no such thing", KindFilter::All).is_empty());
    }

    #[test]
    fn reloads_verbatim_and_tolerates_corruption() {
        let tmp = tempdir().unwrap();
        let first = {
            let log = AuditLog::open(tmp.path()).unwrap();
            log.append(AuditEntry::for_actor(&actor(), ActionKind::Login, "Signed in"))
        };
        let log = AuditLog::open(tmp.path()).unwrap();
        assert_eq!(log.events(), vec![first]);

        std::fs::write(tmp.path().join(AUDIT_FILE), "[{oops").unwrap();
        let log = AuditLog::open(tmp.path()).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn seed_demo_only_fills_an_empty_log() {
        let tmp = tempdir().unwrap();
        let log = AuditLog::open(tmp.path()).unwrap();
        log.seed_demo();
        assert_eq!(log.len(), 3);
        log.seed_demo();
        assert_eq!(log.len(), 3);
    }
}
