use super::move_record::MoveRecord;
use crate::board::piece::{Piece, PieceState};
use crate::board::Board;
use crate::geometry::{Coordinate, BOARD_DIMENSION};
use crate::validation::pieces::{Color, PieceKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    InProgress,
    Ended,
}

/// Everything one game instance owns.
#[derive(Debug, Clone)]
pub struct GameState {
    pub id: String,
    /// Layout the game was seeded from, and is re-seeded from on reset.
    pub board_type: String,
    pub phase: Phase,
    pub current_player: Color,
    pub scores: BTreeMap<Color, i32>,
    pub board: Board,
    /// Captured pieces, in capture order.
    pub captured: Vec<Piece>,
    pub history: BTreeMap<Color, Vec<MoveRecord>>,
    pub check: bool,
    pub checkmate: bool,
    /// The move made this turn, waiting for `advance_turn`.
    pub pending: Option<MoveRecord>,
}

impl GameState {
    pub fn new(id: &str, board_type: &str) -> Self {
        Self {
            id: id.to_string(),
            board_type: board_type.to_string(),
            phase: Phase::NotStarted,
            current_player: Color::Light,
            scores: Color::ALL.into_iter().map(|color| (color, 0)).collect(),
            board: Board::new(),
            captured: Vec::new(),
            history: Color::ALL.into_iter().map(|color| (color, Vec::new())).collect(),
            check: false,
            checkmate: false,
            pending: None,
        }
    }

    pub fn score(&self, color: Color) -> i32 {
        self.scores.get(&color).copied().unwrap_or(0)
    }

    pub fn history_of(&self, color: Color) -> &[MoveRecord] {
        self.history.get(&color).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Back to an empty, unstarted game. Id and board type are kept.
    pub fn reset(&mut self) {
        self.board.clear();
        self.phase = Phase::NotStarted;
        self.current_player = Color::Light;
        self.scores.values_mut().for_each(|score| *score = 0);
        self.captured.clear();
        self.history.values_mut().for_each(Vec::clear);
        self.check = false;
        self.checkmate = false;
        self.pending = None;
    }

    pub fn view(&self) -> GameStateView {
        GameStateView::from(self)
    }
}

/// One in-play piece as seen from outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub at: Coordinate,
    pub color: Color,
    pub kind: PieceKind,
    pub moves: u32,
}

/// Read-only snapshot handed to subscribers and callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateView {
    pub id: String,
    pub board_type: String,
    pub phase: Phase,
    pub current_player: Color,
    pub scores: BTreeMap<Color, i32>,
    pub pieces: Vec<PlacedPiece>,
    pub captured: Vec<Piece>,
    pub history: BTreeMap<Color, Vec<MoveRecord>>,
    pub check: bool,
    pub checkmate: bool,
}

impl From<&GameState> for GameStateView {
    fn from(state: &GameState) -> Self {
        let mut pieces: Vec<PlacedPiece> = state
            .board
            .positions()
            .iter()
            .filter_map(|(at, id)| state.board.piece(id).map(|piece| (at, piece)))
            .filter(|(_, piece)| piece.state == PieceState::InPlay)
            .map(|(at, piece)| PlacedPiece {
                at,
                color: piece.color,
                kind: piece.kind,
                moves: piece.moves,
            })
            .collect();
        pieces.sort_by_key(|piece| piece.at);

        Self {
            id: state.id.clone(),
            board_type: state.board_type.clone(),
            phase: state.phase,
            current_player: state.current_player,
            scores: state.scores.clone(),
            pieces,
            captured: state.captured.clone(),
            history: state.history.clone(),
            check: state.check,
            checkmate: state.checkmate,
        }
    }
}

impl GameStateView {
    pub fn piece_at(&self, at: Coordinate) -> Option<&PlacedPiece> {
        self.pieces.iter().find(|piece| piece.at == at)
    }

    /// Text grid, highest row first, two-character codes and `..` for empty cells.
    pub fn render(&self) -> String {
        let mut output: String = String::new();
        for row in (0..BOARD_DIMENSION).rev() {
            output.push_str(&format!("{} |", row + 1));
            for col in 0..BOARD_DIMENSION {
                match self.piece_at(Coordinate::new(row, col)) {
                    Some(piece) => {
                        output.push(' ');
                        output.push(piece.color.symbol());
                        output.push(piece.kind.symbol());
                    }
                    None => output.push_str(" .."),
                }
            }
            output.push('\n');
        }
        output.push_str("   ");
        for col in 0..BOARD_DIMENSION {
            output.push_str(&format!("  {}", (b'a' + col as u8) as char));
        }
        output.push('\n');
        output
    }
}
