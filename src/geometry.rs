use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

/// Side length of the square playing grid.
pub const BOARD_DIMENSION: i32 = 8;

/// A grid address, `(row, col)`, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// True when both row and column lie in `[0, BOARD_DIMENSION)`.
    #[inline]
    pub fn in_bounds(self) -> bool {
        (0..BOARD_DIMENSION).contains(&self.row) && (0..BOARD_DIMENSION).contains(&self.col)
    }

    /// Every coordinate of the grid, row by row.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_DIMENSION)
            .flat_map(|row| (0..BOARD_DIMENSION).map(move |col| Coordinate::new(row, col)))
    }

    /// Unit step along the straight or diagonal line from `self` to `to`.
    ///
    /// Returns `None` when the two coordinates are equal or do not share a rank,
    /// file or diagonal (a knight's jump, for instance).
    pub fn line_step(self, to: Coordinate) -> Option<Coordinate> {
        let delta: Coordinate = to - self;
        let straight: bool = delta.row == 0 || delta.col == 0;
        let diagonal: bool = delta.row.abs() == delta.col.abs();
        if delta == Coordinate::new(0, 0) || !(straight || diagonal) {
            return None;
        }
        Some(Coordinate::new(delta.row.signum(), delta.col.signum()))
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    #[inline]
    fn add(self, rhs: Coordinate) -> Self::Output {
        Coordinate::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    #[inline]
    fn sub(self, rhs: Coordinate) -> Self::Output {
        Coordinate::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A move or capture pattern `(d_row, d_col)`.
///
/// A component equal to [`Direction::UNBOUNDED`] (or its negation) stands for
/// "any magnitude with this sign", which is how sliding pieces are described.
#[derive(Debug, Clone, Copy)]
pub struct Direction {
    pub d_row: f64,
    pub d_col: f64,
}

impl Direction {
    pub const UNBOUNDED: f64 = f64::INFINITY;

    pub const fn new(d_row: f64, d_col: f64) -> Self {
        Self { d_row, d_col }
    }

    /// The same pattern seen from the other side of the board.
    pub fn mirrored_rows(self) -> Self {
        Self::new(0.0 - self.d_row, self.d_col)
    }

    pub fn is_sliding(self) -> bool {
        self.d_row.is_infinite() || self.d_col.is_infinite()
    }

    /// Whether a concrete grid delta is an instance of this pattern.
    ///
    /// A finite component must match exactly. An unbounded component matches any
    /// non-zero delta of the same sign; when both components are unbounded the two
    /// magnitudes must also agree, so a diagonal slide stays on its diagonal.
    pub fn matches(self, delta: Coordinate) -> bool {
        let row_ok: bool = axis_matches(self.d_row, delta.row);
        let col_ok: bool = axis_matches(self.d_col, delta.col);
        if !(row_ok && col_ok) {
            return false;
        }
        if self.d_row.is_infinite() && self.d_col.is_infinite() {
            return delta.row.abs() == delta.col.abs();
        }
        true
    }

    /// Unit step for walking a sliding pattern; `None` for finite patterns.
    pub fn slide_step(self) -> Option<Coordinate> {
        if !self.is_sliding() {
            return None;
        }
        Some(Coordinate::new(
            self.d_row.signum() as i32 * (self.d_row != 0.0) as i32,
            self.d_col.signum() as i32 * (self.d_col != 0.0) as i32,
        ))
    }

    /// The concrete delta of a finite pattern; `None` for sliding patterns.
    pub fn fixed_delta(self) -> Option<Coordinate> {
        if self.is_sliding() {
            return None;
        }
        Some(Coordinate::new(self.d_row as i32, self.d_col as i32))
    }
}

fn axis_matches(component: f64, delta: i32) -> bool {
    if component.is_infinite() {
        delta != 0 && (delta > 0) == (component > 0.0)
    } else {
        component == delta as f64
    }
}

impl PartialEq for Direction {
    fn eq(&self, other: &Self) -> bool {
        canonical_bits(self.d_row) == canonical_bits(other.d_row)
            && canonical_bits(self.d_col) == canonical_bits(other.d_col)
    }
}

impl Eq for Direction {}

impl Hash for Direction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        canonical_bits(self.d_row).hash(state);
        canonical_bits(self.d_col).hash(state);
    }
}

// -0.0 and 0.0 are the same pattern component.
fn canonical_bits(component: f64) -> u64 {
    if component == 0.0 {
        0.0f64.to_bits()
    } else {
        component.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INF: f64 = Direction::UNBOUNDED;

    #[test]
    fn test_bounds() {
        assert!(Coordinate::new(0, 0).in_bounds());
        assert!(Coordinate::new(7, 7).in_bounds());
        assert!(!Coordinate::new(8, 0).in_bounds());
        assert!(!Coordinate::new(0, -1).in_bounds());
        assert_eq!(Coordinate::all().count(), 64);
    }

    #[test]
    fn test_line_step() {
        let origin = Coordinate::new(2, 2);
        assert_eq!(origin.line_step(Coordinate::new(2, 6)), Some(Coordinate::new(0, 1)));
        assert_eq!(origin.line_step(Coordinate::new(0, 0)), Some(Coordinate::new(-1, -1)));
        assert_eq!(origin.line_step(Coordinate::new(4, 3)), None);
        assert_eq!(origin.line_step(origin), None);
    }

    #[test]
    fn test_sliding_match() {
        let rook_up = Direction::new(INF, 0.0);
        assert!(rook_up.matches(Coordinate::new(5, 0)));
        assert!(!rook_up.matches(Coordinate::new(-5, 0)));
        assert!(!rook_up.matches(Coordinate::new(5, 1)));

        let diagonal = Direction::new(-INF, INF);
        assert!(diagonal.matches(Coordinate::new(-3, 3)));
        assert!(!diagonal.matches(Coordinate::new(-3, 2)));
    }

    #[test]
    fn test_fixed_match() {
        let knight = Direction::new(2.0, -1.0);
        assert!(knight.matches(Coordinate::new(2, -1)));
        assert!(!knight.matches(Coordinate::new(4, -2)));
        assert_eq!(knight.fixed_delta(), Some(Coordinate::new(2, -1)));
        assert_eq!(Direction::new(-INF, 0.0).slide_step(), Some(Coordinate::new(-1, 0)));
    }

    #[test]
    fn test_direction_equality_and_mirror() {
        assert_eq!(Direction::new(1.0, 1.0).mirrored_rows(), Direction::new(-1.0, 1.0));
        assert_eq!(Direction::new(INF, 0.0).mirrored_rows(), Direction::new(-INF, 0.0));
    }
}
