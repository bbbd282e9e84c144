use serde::Serialize;

use super::Source;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    InvalidInput,
    Network,
    Parse,
    Upstream,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid-input",
            ErrorKind::Network => "network",
            ErrorKind::Parse => "parse",
            ErrorKind::Upstream => "upstream",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a recoverable failure was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorOrigin {
    Source(Source),
    Aggregator,
}

impl std::fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorOrigin::Source(source) => write!(f, "{}", source),
            ErrorOrigin::Aggregator => write!(f, "aggregator"),
        }
    }
}

/// A recoverable failure. Recorded during a fetch and surfaced in the report;
/// never aborts sibling fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub origin: ErrorOrigin,
    pub kind: ErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(origin: ErrorOrigin, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            origin,
            kind,
            message: message.into(),
        }
    }

    pub fn source(source: Source, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(ErrorOrigin::Source(source), kind, message)
    }

    pub fn aggregator(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(ErrorOrigin::Aggregator, kind, message)
    }
}

/// Format: "{origin} {kind} error: {message}"
impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} error: {}", self.origin, self.kind, self.message)
    }
}
