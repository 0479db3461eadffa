//! Identity and session management: who is known, who is signed in, and how
//! sign-in is verified. Keep the public surface thin and split implementation
//! across sub-modules.

mod authenticator;
mod directory;
mod principal;
mod session;
mod verifier;

pub use authenticator::Authenticator;
pub use directory::IdentityDirectory;
pub use principal::{Identity, Provider, Role};
pub use session::SessionStore;
pub use verifier::{hash_password, Argon2Verifier, CredentialVerifier, DemoVerifier};
