//! ReportVault core: session-based sign-in, role-gated visibility over
//! categorized reports and an append-only audit trail. Presentation layers
//! (web, desktop) sit on top of this crate and only ever call the services
//! wired together in [`vault::Vault`].

pub mod access;
pub mod audit;
pub mod error;
pub mod identity;
pub mod registry;
pub mod vault;

pub use error::{VaultError, VaultResult};
pub use vault::Vault;
