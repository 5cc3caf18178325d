//! Error handling for clipfetch

use std::fmt;
use thiserror::Error;

/// Main error type for clipfetch
#[derive(Debug, Error)]
pub enum ClipfetchError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Category of a user-facing failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Bad input, caught before any request is made
    Validation,
    /// Local precondition (e.g. offline) rejected the request
    Admission,
    /// The server responded and signalled failure
    Api,
    /// No usable response from the transport layer
    Transport,
    /// Local persistence read/write/delete failed
    Storage,
}

/// Terminal form of every failure: a category plus display text.
///
/// All errors crossing the session boundary are flattened into this shape so
/// the host can render them without inspecting error sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub text: String,
}

impl Failure {
    pub fn validation(text: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Validation,
            text: text.into(),
        }
    }

    pub fn admission(text: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Admission,
            text: text.into(),
        }
    }

    pub fn api(text: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Api,
            text: text.into(),
        }
    }

    pub fn transport(text: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transport,
            text: text.into(),
        }
    }

    pub fn storage(text: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Storage,
            text: text.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl std::error::Error for Failure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_carries_kind_and_text() {
        let failure = Failure::admission("You are offline");
        assert_eq!(failure.kind, FailureKind::Admission);
        assert_eq!(failure.to_string(), "You are offline");
    }
}
