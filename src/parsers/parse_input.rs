use super::notation::square_from_name;
use crate::error::{EngineError, EngineResult};
use crate::geometry::Coordinate;
use serde::{Deserialize, Serialize};
use serde_json::from_str;
use std::io::BufRead;

pub const DEFAULT_GAME: &str = "default";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Reason {
    Start,
    Reset,
    Move,
    Notation,
    Destinations,
    Advance,
    Odds,
    State,
    Parse,
    Ping,
    Exit,
}

/// One request line as written by the caller.
#[derive(Serialize, Deserialize, Debug)]
struct JsonInput {
    pub reason: Reason,
    #[serde(default)]
    pub game: Option<String>,
    #[serde(default)]
    pub board_type: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub notation: Option<String>,
}

/// A request with its squares resolved to coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonIn {
    pub reason: Reason,
    pub game: String,
    pub board_type: Option<String>,
    pub from: Option<Coordinate>,
    pub to: Option<Coordinate>,
    pub notation: String,
}

impl JsonIn {
    pub fn from_line(line: &str) -> EngineResult<JsonIn> {
        let input: JsonInput = from_str(line.trim())?;
        Ok(JsonIn {
            reason: input.reason,
            game: input.game.unwrap_or_else(|| DEFAULT_GAME.to_string()),
            board_type: input.board_type,
            from: input.from.as_deref().map(square).transpose()?,
            to: input.to.as_deref().map(square).transpose()?,
            notation: input.notation.unwrap_or_default(),
        })
    }

    pub fn require_from(&self) -> EngineResult<Coordinate> {
        self.from
            .ok_or_else(|| EngineError::Notation(format!("'{:?}' needs a 'from' square", self.reason)))
    }

    pub fn require_to(&self) -> EngineResult<Coordinate> {
        self.to
            .ok_or_else(|| EngineError::Notation(format!("'{:?}' needs a 'to' square", self.reason)))
    }
}

fn square(name: &str) -> EngineResult<Coordinate> {
    square_from_name(name).ok_or_else(|| EngineError::Notation(format!("'{name}' is not a square")))
}

/// Reads the next request from `reader`. `None` means end of input.
pub fn read_and_parse_input<R: BufRead>(reader: &mut R) -> Option<EngineResult<JsonIn>> {
    let mut line: String = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(JsonIn::from_line(&line)),
        Err(e) => Some(Err(EngineError::from(e))),
    }
}
