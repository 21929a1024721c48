use crate::geometry::Direction;

/// Kings are not scored; losing one ends the game instead.
pub const VALUE: i32 = 0;
pub const SYMBOL: char = 'K';

pub const MOVES: [Direction; 8] = [
    Direction::new(0.0, 1.0),
    Direction::new(0.0, -1.0),
    Direction::new(1.0, 0.0),
    Direction::new(-1.0, 0.0),
    Direction::new(1.0, 1.0),
    Direction::new(1.0, -1.0),
    Direction::new(-1.0, 1.0),
    Direction::new(-1.0, -1.0),
];

/// Columns the King travels when castling.
pub const CASTLE_KING_STEP: i32 = 2;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coordinate;

    #[test]
    fn test_king_single_step() {
        assert_eq!(MOVES.len(), 8);
        assert!(MOVES.iter().any(|d| d.matches(Coordinate::new(-1, 1))));
        assert!(!MOVES.iter().any(|d| d.matches(Coordinate::new(0, 2))));
    }
}
