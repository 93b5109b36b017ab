//! Crate-wide error type.

use std::io;

use thiserror::Error;

use crate::session::Phase;

/// Errors returned by the question repository and the quiz session engine.
///
/// A failed call never leaves a partially mutated session behind.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    /// Bad start parameters: empty name, count out of range.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The operation is not allowed in the session's current phase.
    #[error("cannot {operation} while {phase}")]
    InvalidOperation {
        operation: &'static str,
        phase: Phase,
    },

    /// The question source could not be fetched or parsed.
    #[error("question source unavailable: {0}")]
    SourceUnavailable(String),

    /// Terminal I/O failure in the interactive frontend.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl QuizError {
    /// Short machine-readable name, used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            QuizError::InvalidRequest(_) => "invalid_request",
            QuizError::InvalidOperation { .. } => "invalid_operation",
            QuizError::SourceUnavailable(_) => "source_unavailable",
            QuizError::Io(_) => "io",
        }
    }
}
