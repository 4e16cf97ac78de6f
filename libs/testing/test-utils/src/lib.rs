//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: Deterministic account data generation (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let username = builder.username("main");
//!     let email = builder.email("main");
//! }
//! ```

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Builder for test data with deterministic randomization
///
/// Values derived from the same seed are identical across runs, while
/// different test names get disjoint usernames and emails.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_register_user");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A username unique to this seed and `suffix`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.username("main"), "user-7-main");
    /// ```
    pub fn username(&self, suffix: &str) -> String {
        format!("user-{}-{}", self.seed, suffix)
    }

    pub fn email(&self, suffix: &str) -> String {
        format!("user-{}-{}@example.com", self.seed, suffix)
    }

    /// A password long enough to look realistic; bcrypt accepts any length up to 72 bytes
    pub fn password(&self) -> String {
        format!("pw-{:x}", self.seed)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that a string is a 24-character hex ObjectId
    pub fn assert_object_id(value: &str, context: &str) {
        assert!(
            value.len() == 24 && value.chars().all(|c| c.is_ascii_hexdigit()),
            "{}: expected a 24-char hex ObjectId, got {:?}",
            context,
            value
        );
    }

    /// Assert that a stored password is a bcrypt hash rather than plaintext
    pub fn assert_bcrypt_hash(value: &str, context: &str) {
        assert!(
            value.starts_with("$2") && value.len() == 60,
            "{}: expected a bcrypt hash, got {:?}",
            context,
            value
        );
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}
