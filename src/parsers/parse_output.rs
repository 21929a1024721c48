use crate::game::game_state::{GameStateView, Phase};
use serde_json::{json, Value};
use std::fmt;

/// One response line.
#[derive(Debug, Clone)]
pub struct ParseOut {
    message: String,
    game: String,
    state: Option<GameStateView>,
    possible_moves: Vec<String>,
    data: Value,
}

impl ParseOut {
    pub fn new(message: String, game: &str, state: Option<GameStateView>) -> Self {
        Self {
            message,
            game: game.to_string(),
            state,
            possible_moves: Vec::new(),
            data: Value::Null,
        }
    }

    pub fn with_moves(mut self, possible_moves: Vec<String>) -> Self {
        self.possible_moves = possible_moves;
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn to_json(&self) -> Value {
        let mut out: Value = json!({
            "message": self.message,
            "game": self.game,
            "possible_moves": self.possible_moves,
            "data": self.data,
        });
        if let Some(state) = &self.state {
            out["phase"] = json!(state.phase);
            out["current_player"] = json!(state.current_player);
            out["scores"] = json!(state.scores);
            out["in_check"] = json!(state.check);
            out["checkmate"] = json!(state.checkmate);
            out["game_over"] = json!(state.phase == Phase::Ended);
            out["board"] = json!(state.render());
        }
        out
    }

    pub fn print_stdout(&self) {
        println!("{}", self.to_json());
    }
}

impl fmt::Display for ParseOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseOut: {}", self.message)
    }
}
