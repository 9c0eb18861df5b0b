//! Error types for estimation requests.

use thiserror::Error;

/// Upper bound on diagnostic text carried in an error
pub const MAX_DIAGNOSTIC_CHARS: usize = 1200;

/// Who is expected to fix a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultClass {
    /// The request itself is wrong (bad input format)
    Client,
    /// Environment, configuration or slicer failure
    Server,
}

/// Errors that can occur while producing an estimate.
#[derive(Error, Debug)]
pub enum EstimateError {
    /// Model file is not STL or 3MF.
    #[error("only STL/3MF supported, got '{0}'")]
    UnsupportedFormat(String),

    /// The G-code carries no printing time summary.
    #[error("failed to read slicer output: no estimated printing time")]
    MissingTimeSummary,

    /// One or more slicer profile files do not exist.
    #[error("missing profile files: {}", .0.join(", "))]
    MissingProfiles(Vec<String>),

    /// Download or slicer process failed.
    #[error("{0}")]
    Upstream(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EstimateError {
    /// Upstream failure with its diagnostic output bounded in length
    pub fn upstream(message: &str) -> Self {
        Self::Upstream(truncate_diagnostic(message).to_string())
    }

    pub fn classify(&self) -> FaultClass {
        match self {
            Self::UnsupportedFormat(_) => FaultClass::Client,
            Self::MissingTimeSummary
            | Self::MissingProfiles(_)
            | Self::Upstream(_)
            | Self::Io(_) => FaultClass::Server,
        }
    }
}

/// First [`MAX_DIAGNOSTIC_CHARS`] characters of `message`
pub fn truncate_diagnostic(message: &str) -> &str {
    match message.char_indices().nth(MAX_DIAGNOSTIC_CHARS) {
        Some((idx, _)) => &message[..idx],
        None => message,
    }
}

/// Result type for estimation operations.
pub type Result<T> = std::result::Result<T, EstimateError>;
