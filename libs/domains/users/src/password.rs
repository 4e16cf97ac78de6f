//! bcrypt hashing on the blocking pool.

use crate::error::HashError;

/// bcrypt work factor used unless configured otherwise
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

/// Hashes and verifies passwords with a fixed bcrypt cost.
///
/// Every hash gets a fresh random salt. Both operations are CPU bound and run
/// under `spawn_blocking`.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub async fn hash(&self, password: &str) -> Result<String, HashError> {
        let password = password.to_owned();
        let cost = self.cost;

        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hash)
    }

    /// `Ok(false)` for a wrong password; `Err` only when `hash` is unusable.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(matches)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_is_not_plaintext_and_verifies() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("p1").await.unwrap();

        assert_ne!(hash, "p1");
        assert!(hash.starts_with("$2"));
        assert!(hasher.verify("p1", &hash).await.unwrap());
        assert!(!hasher.verify("wrong", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_salts_differ_between_calls() {
        let hasher = PasswordHasher::new(4);
        let first = hasher.hash("same").await.unwrap();
        let second = hasher.hash("same").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_invalid_cost_is_an_error() {
        let hasher = PasswordHasher::new(2);
        assert!(matches!(hasher.hash("p1").await, Err(HashError::Bcrypt(_))));
    }

    #[tokio::test]
    async fn test_verify_against_garbage_hash_is_an_error() {
        let hasher = PasswordHasher::default();
        assert_eq!(hasher.cost(), 12);
        assert!(hasher.verify("p1", "not-a-hash").await.is_err());
    }
}
