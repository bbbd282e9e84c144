use thiserror::Error;

/// Failures that reject a whole request. Per-source upstream failures are
/// not errors at this level; they travel inside the report as `FetchError`s.
#[derive(Error, Debug)]
pub enum DiscussItError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Request errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown source: {0}")]
    UnknownSource(String),

    // Cache errors
    #[error("Cache error: {0}")]
    Cache(String),

    // Output errors
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DiscussItResult<T> = Result<T, DiscussItError>;
