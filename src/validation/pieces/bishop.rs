use crate::geometry::Direction;

const INF: f64 = Direction::UNBOUNDED;

pub const VALUE: i32 = 3;
pub const SYMBOL: char = 'B';

/// Unbounded diagonal slides.
pub const MOVES: [Direction; 4] = [
    Direction::new(INF, INF),
    Direction::new(INF, -INF),
    Direction::new(-INF, INF),
    Direction::new(-INF, -INF),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coordinate;

    #[test]
    fn test_bishop_stays_on_diagonal() {
        assert!(MOVES.iter().any(|d| d.matches(Coordinate::new(-4, 4))));
        assert!(!MOVES.iter().any(|d| d.matches(Coordinate::new(3, 0))));
        assert!(!MOVES.iter().any(|d| d.matches(Coordinate::new(2, 3))));
    }
}
