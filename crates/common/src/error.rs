use thiserror::Error;

/// Canonical txd error taxonomy used across crates.
///
/// Classification guidance:
/// - [`TxdError::InvalidConfig`]: filter/path/CLI option contract violations
/// - [`TxdError::DataSource`]: the source file is unreadable or startup
///   bounds cannot be computed; fatal to the metrics flow
/// - [`TxdError::Execution`]: any engine-level query failure; recovered at
///   the submission point and surfaced as a message
/// - [`TxdError::Io`]: raw filesystem IO failures from std APIs
#[derive(Debug, Error)]
pub enum TxdError {
    /// Invalid configuration or caller input.
    ///
    /// Examples:
    /// - range filter with `low > high` or bounds outside the distance domain
    /// - missing value for a CLI flag
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The read-only data source is unavailable.
    ///
    /// Examples:
    /// - source file missing or unreadable
    /// - MIN/MAX distance bounds are NULL at startup (empty source)
    #[error("data source unavailable: {0}")]
    DataSource(String),

    /// Engine-level query execution failure.
    ///
    /// The engine is opaque: parse errors, type errors, and missing columns
    /// all surface here with the engine's own message text.
    #[error("query execution failed: {0}")]
    Execution(String),

    /// Transparent std IO failures.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Standard txd result alias.
pub type Result<T> = std::result::Result<T, TxdError>;
