//! Rules engine for a two-player, 8x8 board game with chess-style pieces.
//!
//! [`Orchestrator`] owns named game instances; the validator, castling rules and
//! notation parser underneath it are usable on their own.

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod parsers;
pub mod validation;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult, ErrorKind};
pub use game::events::GameEvent;
pub use game::game_state::{GameStateView, Phase};
pub use game::move_record::{MoveRecord, SpecialMove};
pub use game::orchestrator::{MoveOutcome, Orchestrator};
pub use geometry::{Coordinate, Direction, BOARD_DIMENSION};
pub use parsers::notation::{clean_input, parse_notation, square_from_name, to_square_name};
pub use validation::pieces::{Color, PieceKind};
