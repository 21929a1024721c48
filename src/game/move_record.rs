use crate::board::piece::PieceId;
use crate::geometry::Coordinate;
use crate::validation::pieces::{Color, PieceKind};
use serde::{Deserialize, Serialize};

/// One piece touched by a move.
///
/// Records produced by the engine fill every field. Records produced by the
/// notation parser only know what the text says (kind, usually the destination).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedPiece {
    pub kind: PieceKind,
    pub color: Option<Color>,
    pub piece: Option<PieceId>,
    pub from: Option<Coordinate>,
    pub to: Option<Coordinate>,
}

impl MovedPiece {
    pub fn parsed(kind: PieceKind, to: Option<Coordinate>) -> Self {
        Self {
            kind,
            color: None,
            piece: None,
            from: None,
            to,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPiece {
    pub at: Coordinate,
    pub piece: Option<PieceId>,
    pub color: Option<Color>,
    pub kind: Option<PieceKind>,
}

/// What kind of move a record describes. Combinations the rules forbid,
/// such as a castle that also captures, cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialMove {
    Plain,
    Capture { target: CapturedPiece },
    Promotion { to: PieceKind, captured: Option<CapturedPiece> },
    KingSideCastle,
    QueenSideCastle,
}

/// Hint narrowing down which piece a notation string means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disambiguation {
    /// Column of the moving piece.
    File(i32),
    /// Row of the moving piece.
    Rank(i32),
    Square(Coordinate),
}

impl Disambiguation {
    pub fn admits(self, coord: Coordinate) -> bool {
        match self {
            Disambiguation::File(col) => coord.col == col,
            Disambiguation::Rank(row) => coord.row == row,
            Disambiguation::Square(square) => coord == square,
        }
    }
}

/// A completed (or, from the parser, proposed) turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The mover first; castling adds the Rook second.
    pub pieces: Vec<MovedPiece>,
    pub notation: String,
    pub special: SpecialMove,
    pub disambiguation: Option<Disambiguation>,
    pub check: bool,
    pub checkmate: bool,
}

impl MoveRecord {
    pub fn mover(&self) -> Option<&MovedPiece> {
        self.pieces.first()
    }

    pub fn destination(&self) -> Option<Coordinate> {
        self.mover().and_then(|moved| moved.to)
    }

    pub fn captured(&self) -> Option<&CapturedPiece> {
        match &self.special {
            SpecialMove::Capture { target } => Some(target),
            SpecialMove::Promotion { captured, .. } => captured.as_ref(),
            _ => None,
        }
    }

    pub fn promotion(&self) -> Option<PieceKind> {
        match self.special {
            SpecialMove::Promotion { to, .. } => Some(to),
            _ => None,
        }
    }

    pub fn is_castle(&self) -> bool {
        matches!(self.special, SpecialMove::KingSideCastle | SpecialMove::QueenSideCastle)
    }

    /// Whether `piece` is one of the pieces this record moved.
    pub fn involves(&self, piece: PieceId) -> bool {
        self.pieces.iter().any(|moved| moved.piece == Some(piece))
    }
}
