use std::collections::HashMap;
use std::time::Duration;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

use crate::error::{VaultError, VaultResult};

use super::principal::Identity;

/// Credential backend behind the authenticator. Implementations decide what
/// "the credential matches" means; the authenticator owns everything else
/// (directory lookup, session, audit).
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, identity: &Identity, credential: &str) -> bool;
}

/// Demo backend: accepts any credential after a fixed simulated latency that
/// stands in for a future remote verification call. One-shot, no retries.
pub struct DemoVerifier {
    latency: Duration,
}

impl DemoVerifier {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for DemoVerifier {
    fn default() -> Self {
        Self { latency: Duration::from_millis(800) }
    }
}

impl CredentialVerifier for DemoVerifier {
    fn verify(&self, _identity: &Identity, _credential: &str) -> bool {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        true
    }
}

/// Real verifying backend: Argon2 PHC hashes keyed by identity id. Shares
/// the `CredentialVerifier` contract with the demo backend so callers swap
/// them without code changes.
#[derive(Default)]
pub struct Argon2Verifier {
    hashes: HashMap<String, String>,
}

impl Argon2Verifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a PHC hash for an identity id, replacing any previous one.
    pub fn set_hash(&mut self, identity_id: &str, phc: &str) {
        self.hashes.insert(identity_id.to_string(), phc.to_string());
    }

    /// Hash and register a plaintext password for an identity id.
    pub fn set_password(&mut self, identity_id: &str, password: &str) -> VaultResult<()> {
        let phc = hash_password(password)?;
        self.set_hash(identity_id, &phc);
        Ok(())
    }
}

impl CredentialVerifier for Argon2Verifier {
    fn verify(&self, identity: &Identity, credential: &str) -> bool {
        match self.hashes.get(&identity.id) {
            Some(phc) => verify_password(phc, credential),
            None => false,
        }
    }
}

/// Produce an Argon2 PHC string for a plaintext password.
pub fn hash_password(password: &str) -> VaultResult<String> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes)
        .map_err(|e| VaultError::persistence(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| VaultError::persistence(e.to_string()))?;
    let argon2 = Argon2::default();
    let phc = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| VaultError::persistence(e.to_string()))?
        .to_string();
    Ok(phc)
}

fn verify_password(hash: &str, password: &str) -> bool {
    if let Ok(parsed) = PasswordHash::new(hash) {
        let argon2 = Argon2::default();
        argon2.verify_password(password.as_bytes(), &parsed).is_ok()
    } else {
        false
    }
}
