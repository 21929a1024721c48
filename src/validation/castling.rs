//! Castling: eligibility, recognition from a raw King move, and the paired relocation.

use super::pieces::{king, Color, PieceKind};
use crate::board::piece::{Piece, PieceId};
use crate::board::Board;
use crate::error::{EngineError, EngineResult};
use crate::geometry::{Coordinate, BOARD_DIMENSION};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    /// Toward the highest column.
    KingSide,
    /// Toward column zero.
    QueenSide,
}

impl CastleSide {
    fn column_sign(self) -> i32 {
        match self {
            CastleSide::KingSide => 1,
            CastleSide::QueenSide => -1,
        }
    }

    fn rook_column(self) -> i32 {
        match self {
            CastleSide::KingSide => BOARD_DIMENSION - 1,
            CastleSide::QueenSide => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CastleInfo {
    pub available: bool,
    pub king_side: bool,
    pub queen_side: bool,
    pub king_side_target: Option<Coordinate>,
    pub queen_side_target: Option<Coordinate>,
}

impl CastleInfo {
    pub fn target(&self, side: CastleSide) -> Option<Coordinate> {
        match side {
            CastleSide::KingSide => self.king_side_target,
            CastleSide::QueenSide => self.queen_side_target,
        }
    }
}

/// Reports which sides `color` may castle toward right now.
///
/// Nothing is available once the King has moved. A side is available when an
/// unmoved Rook of the same color stands at that end of the King's row, three or
/// four columns away, with every cell between them empty.
///
/// # Arguments
///
/// * `board` - The board to inspect.
/// * `color` - The side asking to castle.
///
/// # Returns
///
/// A `CastleInfo` with a flag and target cell per side. Everything is unset
/// when `color` has no King.
pub fn can_castle(board: &Board, color: Color) -> CastleInfo {
    let mut info: CastleInfo = CastleInfo::default();
    let (king_at, king) = match board.king_of(color) {
        Some(found) => found,
        None => return info,
    };
    if king.has_moved() {
        return info;
    }

    info.king_side_target = side_target(board, king_at, king, CastleSide::KingSide);
    info.queen_side_target = side_target(board, king_at, king, CastleSide::QueenSide);
    info.king_side = info.king_side_target.is_some();
    info.queen_side = info.queen_side_target.is_some();
    info.available = info.king_side || info.queen_side;
    info
}

/// Recognises a King's two-column step as a castle and names the side.
pub fn is_castle_move(board: &Board, from: Coordinate, to: Coordinate) -> Option<CastleSide> {
    let king: &Piece = board.occupant_at(from)?;
    if king.kind != PieceKind::King || king.has_moved() || to.row != from.row {
        return None;
    }
    let side: CastleSide = match to.col - from.col {
        d if d == king::CASTLE_KING_STEP => CastleSide::KingSide,
        d if d == -king::CASTLE_KING_STEP => CastleSide::QueenSide,
        _ => return None,
    };
    (side_target(board, from, king, side) == Some(to)).then_some(side)
}

/// Whether `from -> to` has the shape of a castle (King, same row, two columns),
/// regardless of whether it is currently allowed.
pub fn looks_like_castle(board: &Board, from: Coordinate, to: Coordinate) -> bool {
    board
        .occupant_at(from)
        .map_or(false, |piece| piece.kind == PieceKind::King)
        && to.row == from.row
        && (to.col - from.col).abs() == king::CASTLE_KING_STEP
}

/// The King and Rook relocations that make up a castle toward `side`.
///
/// # Arguments
///
/// * `board` - The board the castle is played on.
/// * `color` - The castling side.
/// * `side` - King side or Queen side.
///
/// # Returns
///
/// The King's relocation followed by the Rook's, each as `(piece, from, to)`,
/// ready for `Board::relocate_all`.
pub fn castle_moves(
    board: &Board,
    color: Color,
    side: CastleSide,
) -> EngineResult<[(PieceId, Coordinate, Coordinate); 2]> {
    let (king_at, king) = board
        .king_of(color)
        .ok_or_else(|| EngineError::NotFound(format!("{color} has no King in play")))?;
    let target: Coordinate = side_target(board, king_at, king, side).ok_or_else(|| {
        EngineError::InvalidState(format!("{color} cannot castle {side:?}"))
    })?;
    let rook_at: Coordinate = Coordinate::new(king_at.row, side.rook_column());
    let rook: &Piece = board
        .occupant_at(rook_at)
        .ok_or_else(|| EngineError::Internal(format!("castling Rook vanished from {rook_at}")))?;
    let rook_to: Coordinate = Coordinate::new(king_at.row, king_at.col + side.column_sign());

    Ok([(king.id, king_at, target), (rook.id, rook_at, rook_to)])
}

fn side_target(board: &Board, king_at: Coordinate, king: &Piece, side: CastleSide) -> Option<Coordinate> {
    let rook_at: Coordinate = Coordinate::new(king_at.row, side.rook_column());
    let rook: &Piece = board.occupant_at(rook_at)?;
    if rook.kind != PieceKind::Rook || rook.color != king.color || rook.has_moved() {
        return None;
    }
    let distance: i32 = (rook_at.col - king_at.col).abs();
    if !(3..=4).contains(&distance) {
        return None;
    }
    if board.has_occupant_in_line(king_at, rook_at, false) {
        debug!("{:?} castle for {} blocked between {king_at} and {rook_at}", side, king.color);
        return None;
    }
    let target: Coordinate =
        Coordinate::new(king_at.row, king_at.col + side.column_sign() * king::CASTLE_KING_STEP);
    target.in_bounds().then_some(target)
}
