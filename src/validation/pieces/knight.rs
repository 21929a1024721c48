use crate::geometry::Direction;

pub const VALUE: i32 = 3;
pub const SYMBOL: char = 'N';

/// The eight L-shaped jumps. Never path-checked.
pub const MOVES: [Direction; 8] = [
    Direction::new(2.0, 1.0),
    Direction::new(2.0, -1.0),
    Direction::new(-2.0, 1.0),
    Direction::new(-2.0, -1.0),
    Direction::new(1.0, 2.0),
    Direction::new(1.0, -2.0),
    Direction::new(-1.0, 2.0),
    Direction::new(-1.0, -2.0),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coordinate;

    #[test]
    fn test_knight_jumps() {
        assert!(MOVES.iter().any(|d| d.matches(Coordinate::new(-1, 2))));
        assert!(!MOVES.iter().any(|d| d.matches(Coordinate::new(2, 2))));
        assert!(MOVES.iter().all(|d| !d.is_sliding()));
    }
}
