//! Error types for the MongoBullet protocol

/// Result type alias for protocol operations
///
/// Note: Use `BulletResult` instead of `Result` to avoid conflicts with std::result::Result
pub type Result<T> = std::result::Result<T, Error>;

/// Preferred result type alias that doesn't conflict with std::result::Result
pub type BulletResult<T> = std::result::Result<T, Error>;

/// Errors raised at the driver wire boundary
///
/// The monitor core itself never fails on command content; malformed command
/// documents degrade to empty field sets instead. These variants only cover
/// turning raw wire JSON into lifecycle events and setting up the logger.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A lifecycle event payload could not be deserialized at all
    #[error("malformed lifecycle event: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    /// Logging bootstrap failed (invalid filter directive, double init)
    #[error("logging setup failed: {0}")]
    LoggingSetup(String),
}

impl Error {
    /// Create a logging setup error
    pub fn logging_setup(message: impl Into<String>) -> Self {
        Self::LoggingSetup(message.into())
    }
}
