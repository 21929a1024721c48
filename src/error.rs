use crate::geometry::Coordinate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything the engine can refuse to do.
///
/// All variants are recoverable by the caller. `Internal` marks a broken
/// invariant inside the engine rather than bad input.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("coordinate {0} is outside the board")]
    OutOfBounds(Coordinate),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("ambiguous or malformed notation: {0}")]
    Notation(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("internal invariant violated: {0}")]
    Internal(String),

    #[error("invalid board layout: {0}")]
    Layout(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Serializable category of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    NotFound,
    OutOfBounds,
    IllegalMove,
    AmbiguousOrMalformedNotation,
    InvalidState,
    Internal,
    Layout,
    Config,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::NotFound(_) => ErrorKind::NotFound,
            EngineError::OutOfBounds(_) => ErrorKind::OutOfBounds,
            EngineError::IllegalMove(_) => ErrorKind::IllegalMove,
            EngineError::Notation(_) => ErrorKind::AmbiguousOrMalformedNotation,
            EngineError::InvalidState(_) => ErrorKind::InvalidState,
            EngineError::Internal(_) => ErrorKind::Internal,
            EngineError::Layout(_) => ErrorKind::Layout,
            EngineError::Config(_) | EngineError::Io(_) | EngineError::Json(_) => ErrorKind::Config,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
