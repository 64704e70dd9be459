/**
 * Credential Store
 *
 * Password hashing and verification with bcrypt. Each hash carries its own
 * random salt; the cost factor is fixed per store.
 *
 * bcrypt is CPU-bound, so hashing and verification run on Tokio's blocking
 * pool instead of the async worker threads.
 */

use std::sync::Arc;

use bcrypt::BcryptError;
use thiserror::Error;
use tokio::task::JoinError;

/// Lowest cost bcrypt accepts; keeps tests fast
#[cfg(test)]
pub(crate) const TEST_COST: u32 = 4;

/// Failure while hashing or verifying a password
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error(transparent)]
    Bcrypt(#[from] BcryptError),

    #[error("password hashing task failed: {0}")]
    Task(#[from] JoinError),
}

/// Hashes and verifies passwords at a fixed bcrypt cost
#[derive(Clone)]
pub struct CredentialStore {
    cost: u32,
    /// Hash verified against when the login is unknown, so both failure
    /// paths spend the same time in bcrypt.
    dummy_hash: Arc<str>,
}

impl CredentialStore {
    pub fn new(cost: u32) -> Result<Self, BcryptError> {
        let dummy_hash = bcrypt::hash("friendgraph-dummy-password", cost)?;
        Ok(Self {
            cost,
            dummy_hash: dummy_hash.into(),
        })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password for storage
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let password = password.to_owned();
        let cost = self.cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hash)
    }

    /// Check a plaintext password against a stored hash
    ///
    /// A wrong password is `Ok(false)`; only a malformed hash is an error.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(matches)
    }

    /// Burn one verification for a login that does not exist. Always false.
    pub async fn verify_dummy(&self, password: &str) -> bool {
        let password = password.to_owned();
        let dummy_hash = Arc::clone(&self.dummy_hash);
        let _ = tokio::task::spawn_blocking(move || bcrypt::verify(password, &dummy_hash)).await;
        false
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}
