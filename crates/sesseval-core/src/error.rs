//! Error types for session evaluation
//!
//! The recall/precision fallbacks for empty denominators are metric policy,
//! not errors, and never surface here.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for evaluation operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Which of the two paired vectors a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorKind {
    Labels,
    Predictions,
}

impl fmt::Display for VectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorKind::Labels => write!(f, "labels"),
            VectorKind::Predictions => write!(f, "predictions"),
        }
    }
}

/// Main error type for evaluation runs
#[derive(Debug, Error)]
pub enum EvalError {
    /// Label and prediction vectors differ in length
    #[error("Shape mismatch: {labels} labels vs {predictions} predictions")]
    ShapeMismatch { labels: usize, predictions: usize },

    /// An element is not exactly 0 or 1
    #[error("Invalid value {value} in {vector} at index {index}: expected 0 or 1")]
    InvalidLabelValue {
        vector: VectorKind,
        index: usize,
        value: f64,
    },

    /// A session contains no samples
    #[error("Session contains no samples")]
    EmptySession,

    /// Report requested before any session was evaluated
    #[error("No sessions have been evaluated")]
    NoSessions,

    /// Raw confusion counts that cannot come from a binary session
    #[error("Inconsistent counts: {message}")]
    InconsistentCounts { message: String },

    /// IO errors while reading session files
    #[error("IO error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A token in a session file is not a number
    #[error("Parse error: {path}:{line}: '{token}' is not a number")]
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
    },

    /// Invalid run configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Config or report (de)serialization failures
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl EvalError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the error is confined to a single session.
    ///
    /// Only these may be skipped by [`crate::config::InvalidSessionPolicy::Skip`].
    pub fn is_session_error(&self) -> bool {
        matches!(
            self,
            EvalError::ShapeMismatch { .. }
                | EvalError::InvalidLabelValue { .. }
                | EvalError::EmptySession
                | EvalError::Io { .. }
                | EvalError::Parse { .. }
        )
    }
}

impl From<serde_json::Error> for EvalError {
    fn from(err: serde_json::Error) -> Self {
        EvalError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for EvalError {
    fn from(err: serde_yaml::Error) -> Self {
        EvalError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_classification() {
        assert!(EvalError::EmptySession.is_session_error());
        assert!(
            EvalError::ShapeMismatch {
                labels: 3,
                predictions: 4
            }
            .is_session_error()
        );
        assert!(!EvalError::NoSessions.is_session_error());
        assert!(!EvalError::config("bad").is_session_error());
    }

    #[test]
    fn test_error_messages() {
        let err = EvalError::InvalidLabelValue {
            vector: VectorKind::Predictions,
            index: 7,
            value: 2.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid value 2 in predictions at index 7: expected 0 or 1"
        );

        let err = EvalError::ShapeMismatch {
            labels: 3,
            predictions: 5,
        };
        assert!(err.to_string().contains("3 labels vs 5 predictions"));
    }
}
