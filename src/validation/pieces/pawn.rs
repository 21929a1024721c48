//! Pawn: the only kind whose capture pattern differs from its move pattern.
//!
//! Directions are written from Light's side (advancing toward higher rows);
//! the catalog mirrors them for Dark.

use crate::geometry::Direction;

pub const VALUE: i32 = 1;
pub const SYMBOL: char = 'P';

pub const MOVES: [Direction; 1] = [Direction::new(1.0, 0.0)];

pub const CAPTURES: [Direction; 2] = [Direction::new(1.0, 1.0), Direction::new(1.0, -1.0)];

/// Extra advance a pawn may make from its starting row.
pub const DOUBLE_STEP: Direction = Direction::new(2.0, 0.0);
