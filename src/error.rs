//! Unified application error model.
//! One typed enum shared by every service so frontends embedding the core
//! (HTTP handlers, desktop shells) can map failures uniformly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VaultError {
    /// Login attempt against the directory failed: unknown email or the
    /// credential backend rejected the credential.
    #[error("invalid_credential: {message}")]
    InvalidCredential { message: String },
    /// Federated sign-in failed: no identity carries the provider marker.
    #[error("provider_rejected: {message}")]
    ProviderRejected { message: String },
    /// A referenced resource or identity does not exist.
    #[error("not_found: {message}")]
    NotFound { message: String },
    /// Caller-supplied data violated an invariant (e.g. empty access-role set).
    #[error("invalid_input: {message}")]
    InvalidInput { message: String },
    /// A durable write failed. Read-side persistence problems are never
    /// surfaced through this variant; they degrade to empty/logged-out state.
    #[error("persistence: {message}")]
    Persistence { message: String },
}

impl VaultError {
    pub fn invalid_credential<S: Into<String>>(msg: S) -> Self {
        VaultError::InvalidCredential { message: msg.into() }
    }
    pub fn provider_rejected<S: Into<String>>(msg: S) -> Self {
        VaultError::ProviderRejected { message: msg.into() }
    }
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        VaultError::NotFound { message: msg.into() }
    }
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        VaultError::InvalidInput { message: msg.into() }
    }
    pub fn persistence<S: Into<String>>(msg: S) -> Self {
        VaultError::Persistence { message: msg.into() }
    }

    pub fn message(&self) -> &str {
        match self {
            VaultError::InvalidCredential { message }
            | VaultError::ProviderRejected { message }
            | VaultError::NotFound { message }
            | VaultError::InvalidInput { message }
            | VaultError::Persistence { message } => message.as_str(),
        }
    }

    /// Map to HTTP status code for a future API boundary.
    pub fn http_status(&self) -> u16 {
        match self {
            VaultError::InvalidCredential { .. } => 401,
            VaultError::ProviderRejected { .. } => 401,
            VaultError::NotFound { .. } => 404,
            VaultError::InvalidInput { .. } => 400,
            VaultError::Persistence { .. } => 503,
        }
    }
}

pub type VaultResult<T> = Result<T, VaultError>;

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        VaultError::Persistence { message: err.to_string() }
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        VaultError::Persistence { message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_mapping() {
        assert_eq!(VaultError::invalid_credential("bad").http_status(), 401);
        assert_eq!(VaultError::provider_rejected("no").http_status(), 401);
        assert_eq!(VaultError::not_found("missing").http_status(), 404);
        assert_eq!(VaultError::invalid_input("empty roles").http_status(), 400);
        assert_eq!(VaultError::persistence("disk").http_status(), 503);
    }

    #[test]
    fn display_carries_message() {
        let e = VaultError::not_found("report 9 does not exist");
        assert_eq!(e.to_string(), "not_found: report 9 does not exist");
        assert_eq!(e.message(), "report 9 does not exist");
    }
}
