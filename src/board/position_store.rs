use super::piece::PieceId;
use crate::error::{EngineError, EngineResult};
use crate::geometry::Coordinate;
use std::collections::HashMap;

/// Live mapping from occupied coordinate to piece. At most one piece per cell.
#[derive(Debug, Clone, Default)]
pub struct PositionStore {
    cells: HashMap<Coordinate, PieceId>,
}

impl PositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupant_at(&self, coord: Coordinate) -> Option<PieceId> {
        self.cells.get(&coord).copied()
    }

    pub fn is_occupied(&self, coord: Coordinate) -> bool {
        self.cells.contains_key(&coord)
    }

    pub fn coordinate_of(&self, piece: PieceId) -> Option<Coordinate> {
        self.cells
            .iter()
            .find(|(_, id)| **id == piece)
            .map(|(coord, _)| *coord)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, PieceId)> + '_ {
        self.cells.iter().map(|(coord, id)| (*coord, *id))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Places a piece on an empty, in-bounds cell.
    pub fn insert(&mut self, coord: Coordinate, piece: PieceId) -> EngineResult<()> {
        if !coord.in_bounds() {
            return Err(EngineError::OutOfBounds(coord));
        }
        if let Some(existing) = self.occupant_at(coord) {
            return Err(EngineError::InvalidState(format!(
                "cell {coord} already holds piece {existing}"
            )));
        }
        self.cells.insert(coord, piece);
        Ok(())
    }

    pub fn remove(&mut self, coord: Coordinate) -> Option<PieceId> {
        self.cells.remove(&coord)
    }

    /// Moves `piece` from `old` to the empty cell `new`.
    ///
    /// Fails with `OutOfBounds` if either coordinate is off the grid and with
    /// `NotFound` if `piece` is not the occupant of `old`. Nothing changes on failure.
    pub fn relocate(&mut self, piece: PieceId, old: Coordinate, new: Coordinate) -> EngineResult<()> {
        self.relocate_all(&[(piece, old, new)])
    }

    /// Applies several relocations as one step: either every move lands or none does.
    pub fn relocate_all(&mut self, moves: &[(PieceId, Coordinate, Coordinate)]) -> EngineResult<()> {
        for &(piece, old, new) in moves {
            for coord in [old, new] {
                if !coord.in_bounds() {
                    return Err(EngineError::OutOfBounds(coord));
                }
            }
            if self.occupant_at(old) != Some(piece) {
                return Err(EngineError::NotFound(format!("piece {piece} is not at {old}")));
            }
            // A destination may be vacated by another move of the same batch.
            let vacated: bool = moves.iter().any(|&(_, from, _)| from == new);
            if self.is_occupied(new) && !vacated {
                return Err(EngineError::IllegalMove(format!("destination {new} is occupied")));
            }
            if moves.iter().filter(|&&(_, _, to)| to == new).count() > 1 {
                return Err(EngineError::IllegalMove(format!(
                    "two pieces would land on {new}"
                )));
            }
        }

        for &(_, old, _) in moves {
            self.cells.remove(&old);
        }
        for &(piece, _, new) in moves {
            self.cells.insert(new, piece);
        }
        Ok(())
    }

    /// Whether any cell on the straight or diagonal line between `from` and `to`
    /// is occupied. `from` itself is never inspected; `to` only when `inclusive`.
    ///
    /// Coordinates that do not share a line (a knight's jump), or that lie off
    /// the grid, report `false`.
    pub fn has_occupant_in_line(&self, from: Coordinate, to: Coordinate, inclusive: bool) -> bool {
        if !from.in_bounds() || !to.in_bounds() {
            return false;
        }
        let step: Coordinate = match from.line_step(to) {
            Some(step) => step,
            None => return false,
        };
        let mut cursor: Coordinate = from + step;
        while cursor != to {
            if self.is_occupied(cursor) {
                return true;
            }
            cursor = cursor + step;
        }
        inclusive && self.is_occupied(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: i32, col: i32) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn test_insert_rejects_second_occupant() {
        let mut store = PositionStore::new();
        store.insert(c(0, 0), PieceId(0)).unwrap();
        assert!(store.insert(c(0, 0), PieceId(1)).is_err());
        assert_eq!(store.occupant_at(c(0, 0)), Some(PieceId(0)));
        assert!(matches!(store.insert(c(0, 8), PieceId(2)), Err(EngineError::OutOfBounds(_))));
    }

    #[test]
    fn test_relocate_moves_entry() {
        let mut store = PositionStore::new();
        store.insert(c(1, 1), PieceId(3)).unwrap();
        store.relocate(PieceId(3), c(1, 1), c(4, 4)).unwrap();
        assert_eq!(store.occupant_at(c(1, 1)), None);
        assert_eq!(store.occupant_at(c(4, 4)), Some(PieceId(3)));
        assert_eq!(store.coordinate_of(PieceId(3)), Some(c(4, 4)));
    }

    #[test]
    fn test_relocate_errors() {
        let mut store = PositionStore::new();
        store.insert(c(1, 1), PieceId(3)).unwrap();
        assert!(matches!(
            store.relocate(PieceId(3), c(2, 2), c(4, 4)),
            Err(EngineError::NotFound(_))
        ));
        assert!(matches!(
            store.relocate(PieceId(3), c(1, 1), c(-1, 4)),
            Err(EngineError::OutOfBounds(_))
        ));
        assert_eq!(store.occupant_at(c(1, 1)), Some(PieceId(3)));
    }

    #[test]
    fn test_relocate_all_is_atomic() {
        let mut store = PositionStore::new();
        store.insert(c(0, 4), PieceId(0)).unwrap();
        store.insert(c(0, 7), PieceId(1)).unwrap();
        store.insert(c(0, 5), PieceId(2)).unwrap();

        // Second move collides with the piece on (0, 5), so the first must not apply.
        let result = store.relocate_all(&[(PieceId(0), c(0, 4), c(0, 6)), (PieceId(1), c(0, 7), c(0, 5))]);
        assert!(result.is_err());
        assert_eq!(store.occupant_at(c(0, 4)), Some(PieceId(0)));
        assert_eq!(store.occupant_at(c(0, 7)), Some(PieceId(1)));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_line_occlusion() {
        let mut store = PositionStore::new();
        store.insert(c(0, 3), PieceId(0)).unwrap();
        assert!(store.has_occupant_in_line(c(0, 0), c(0, 5), false));
        assert!(!store.has_occupant_in_line(c(0, 0), c(0, 3), false));
        assert!(store.has_occupant_in_line(c(0, 0), c(0, 3), true));
        assert!(!store.has_occupant_in_line(c(3, 0), c(0, 3), false));
        assert!(!store.has_occupant_in_line(c(1, 2), c(0, 4), false));
    }

    #[test]
    fn test_line_off_the_grid() {
        let mut store = PositionStore::new();
        store.insert(c(0, 3), PieceId(0)).unwrap();
        assert!(!store.has_occupant_in_line(c(0, 0), c(0, i32::MAX), true));
        assert!(!store.has_occupant_in_line(c(i32::MIN, 0), c(0, 0), true));
        assert!(!store.has_occupant_in_line(c(0, -1), c(0, 5), false));
    }
}
