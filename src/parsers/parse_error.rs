use crate::error::{EngineError, ErrorKind};
use crate::game::orchestrator::MoveOutcome;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::error::Error;
use std::fmt;

/// Error line written for a request that could not be served.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ParseError {
    error: String,
    kind: ErrorKind,
    game: Option<String>,
}

impl ParseError {
    pub fn new(error: &EngineError, game: Option<&str>) -> Self {
        Self {
            error: error.to_string(),
            kind: error.kind(),
            game: game.map(str::to_string),
        }
    }

    /// From a rejected move. An accepted outcome is not an error and reports `Internal`.
    pub fn from_outcome(outcome: &MoveOutcome, game: &str) -> Self {
        Self {
            error: outcome.message.clone(),
            kind: outcome.error.unwrap_or(ErrorKind::Internal),
            game: Some(game.to_string()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn to_json(&self) -> Value {
        json!({
            "error": self.error,
            "kind": self.kind,
            "game": self.game
        })
    }

    pub fn print_stderr(&self) {
        eprintln!("{}", self.to_json());
    }
}

impl From<EngineError> for ParseError {
    fn from(error: EngineError) -> Self {
        ParseError::new(&error, None)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseError: {}", self.error)
    }
}

impl Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json() {
        let err = ParseError::new(&EngineError::NotFound("no piece at (4, 4)".into()), Some("g1"));
        let value = err.to_json();
        assert_eq!(value["kind"], "NotFound");
        assert_eq!(value["game"], "g1");
        assert_eq!(value["error"], "not found: no piece at (4, 4)");
    }
}
