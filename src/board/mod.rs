//! Piece arena plus position store: the mutable board of one game.

pub mod piece;
pub mod position_store;

use crate::error::{EngineError, EngineResult};
use crate::geometry::{Coordinate, BOARD_DIMENSION};
use crate::validation::pieces::{Color, PieceKind};
use piece::{Piece, PieceId, PieceState};
use position_store::PositionStore;

/// Every piece record ever created for a game, and where the in-play ones stand.
///
/// Records are never removed from the arena; leaving play only changes their state
/// and drops their entry from the position store.
#[derive(Debug, Clone, Default)]
pub struct Board {
    pieces: Vec<Piece>,
    positions: PositionStore,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a piece record and puts it in play at `at`.
    pub fn add_piece(&mut self, color: Color, kind: PieceKind, at: Coordinate) -> EngineResult<PieceId> {
        let id: PieceId = PieceId(self.pieces.len());
        self.positions.insert(at, id)?;
        let mut piece: Piece = Piece::new(id, color, kind);
        piece.state = PieceState::InPlay;
        self.pieces.push(piece);
        Ok(id)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }

    fn piece_mut(&mut self, id: PieceId) -> EngineResult<&mut Piece> {
        self.pieces
            .get_mut(id.0)
            .ok_or_else(|| EngineError::Internal(format!("piece {id} has no arena record")))
    }

    /// Full roster, including pieces that left play.
    pub fn roster(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn positions(&self) -> &PositionStore {
        &self.positions
    }

    pub fn occupant_at(&self, coord: Coordinate) -> Option<&Piece> {
        self.positions
            .occupant_at(coord)
            .and_then(|id| self.piece(id))
    }

    pub fn coordinate_of(&self, id: PieceId) -> Option<Coordinate> {
        self.positions.coordinate_of(id)
    }

    pub fn has_occupant_in_line(&self, from: Coordinate, to: Coordinate, inclusive: bool) -> bool {
        self.positions.has_occupant_in_line(from, to, inclusive)
    }

    /// In-play pieces of `color`, optionally restricted to one kind, in board order.
    pub fn pieces_of(&self, color: Color, kind: Option<PieceKind>) -> Vec<(Coordinate, &Piece)> {
        let mut found: Vec<(Coordinate, &Piece)> = self
            .positions
            .iter()
            .filter_map(|(coord, id)| self.piece(id).map(|piece| (coord, piece)))
            .filter(|(_, piece)| piece.color == color && kind.map_or(true, |k| piece.kind == k))
            .collect();
        found.sort_by_key(|(coord, _)| *coord);
        found
    }

    /// The unique King of `color`, if it is in play.
    pub fn king_of(&self, color: Color) -> Option<(Coordinate, &Piece)> {
        self.pieces_of(color, Some(PieceKind::King)).into_iter().next()
    }

    /// Moves one piece and counts the move against it.
    pub fn relocate(&mut self, id: PieceId, from: Coordinate, to: Coordinate) -> EngineResult<()> {
        self.relocate_all(&[(id, from, to)])
    }

    /// Moves several pieces in one step; nothing changes if any move is refused.
    pub fn relocate_all(&mut self, moves: &[(PieceId, Coordinate, Coordinate)]) -> EngineResult<()> {
        self.positions.relocate_all(moves)?;
        for &(id, _, _) in moves {
            self.piece_mut(id)?.moves += 1;
        }
        Ok(())
    }

    /// Takes the piece on `at` out of play and marks it captured.
    pub fn capture(&mut self, at: Coordinate) -> EngineResult<PieceId> {
        let id: PieceId = self
            .positions
            .remove(at)
            .ok_or_else(|| EngineError::NotFound(format!("no piece to capture at {at}")))?;
        self.piece_mut(id)?.state = PieceState::Captured;
        Ok(id)
    }

    /// Replaces the pawn on `at` with a new record of `kind`.
    ///
    /// `kind` must be one of [`PieceKind::PROMOTIONS`]; anything else is an
    /// `Internal` error and the board is left untouched.
    pub fn promote(&mut self, at: Coordinate, kind: PieceKind) -> EngineResult<PieceId> {
        if !PieceKind::PROMOTIONS.contains(&kind) {
            return Err(EngineError::Internal(format!("a pawn cannot become a {kind}")));
        }
        let pawn_id: PieceId = self
            .positions
            .remove(at)
            .ok_or_else(|| EngineError::Internal(format!("no piece to promote at {at}")))?;
        let pawn: &mut Piece = self.piece_mut(pawn_id)?;
        pawn.state = PieceState::Promoted;
        let (color, moves): (Color, u32) = (pawn.color, pawn.moves);
        let id: PieceId = self.add_piece(color, kind, at)?;
        self.piece_mut(id)?.moves = moves;
        Ok(id)
    }

    /// The row a pawn of `color` is promoted on.
    pub fn promotion_row(color: Color) -> i32 {
        match color {
            Color::Light => BOARD_DIMENSION - 1,
            Color::Dark => 0,
        }
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
        self.positions.clear();
    }
}
