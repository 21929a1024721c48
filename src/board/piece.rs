use crate::validation::pieces::{Color, PieceKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a piece record in a board's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub usize);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceState {
    Undefined,
    InPlay,
    Captured,
    /// A pawn that left play by promotion; its successor is a separate record.
    Promoted,
}

/// One piece record. Its coordinate lives in the position store, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub color: Color,
    pub kind: PieceKind,
    pub state: PieceState,
    /// Number of completed relocations, castling included.
    pub moves: u32,
}

impl Piece {
    pub fn new(id: PieceId, color: Color, kind: PieceKind) -> Self {
        Self {
            id,
            color,
            kind,
            state: PieceState::Undefined,
            moves: 0,
        }
    }

    pub fn in_play(&self) -> bool {
        self.state == PieceState::InPlay
    }

    pub fn has_moved(&self) -> bool {
        self.moves > 0
    }

    /// Two-character layout code, team symbol then kind symbol (`"LK"`).
    pub fn code(&self) -> String {
        format!("{}{}", self.color.symbol(), self.kind.symbol())
    }
}
