use crate::geometry::Direction;

const INF: f64 = Direction::UNBOUNDED;

pub const VALUE: i32 = 5;
pub const SYMBOL: char = 'R';

/// Unbounded slides along the rank and file.
pub const MOVES: [Direction; 4] = [
    Direction::new(INF, 0.0),
    Direction::new(-INF, 0.0),
    Direction::new(0.0, INF),
    Direction::new(0.0, -INF),
];
