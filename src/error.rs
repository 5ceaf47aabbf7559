//! Crate-level error types.
//!
//! [`RadarError`] unifies every error source (configuration, JSON, terminal
//! I/O and invalid arguments) behind a single enum so callers can match on
//! the variant they care about while still using the `?` operator.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RadarError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum RadarError {
    /// An environment variable or configuration file was invalid or unreadable.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON deserialization of a market configuration failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal or log file I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// A timeframe label outside `1W`, `1M`, `QTD` and `YTD`.
    #[error("unknown timeframe: {0:?}")]
    UnknownTimeframe(String),

    /// Random-walk parameters outside their valid domain.
    #[error("invalid walk parameters: {0}")]
    InvalidWalk(String),
}
