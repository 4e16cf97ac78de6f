/// Error raised while establishing or probing a database connection
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver-level failure (bad URI, DNS/SRV lookup, authentication, ...)
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// The client was built but the server did not answer the initial ping
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
