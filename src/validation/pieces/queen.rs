use crate::geometry::Direction;

const INF: f64 = Direction::UNBOUNDED;

pub const VALUE: i32 = 9;
pub const SYMBOL: char = 'Q';

/// Rook and bishop slides combined.
pub const MOVES: [Direction; 8] = [
    Direction::new(INF, 0.0),
    Direction::new(-INF, 0.0),
    Direction::new(0.0, INF),
    Direction::new(0.0, -INF),
    Direction::new(INF, INF),
    Direction::new(INF, -INF),
    Direction::new(-INF, INF),
    Direction::new(-INF, -INF),
];
