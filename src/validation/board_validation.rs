use crate::error::{EngineError, EngineResult};
use crate::geometry::Coordinate;
use crate::parsers::layout::LayoutCell;
use crate::validation::pieces::{Color, PieceKind};
use std::collections::HashSet;

/// Checks board-setup data before a game is seeded from it.
///
/// Every code must decode, sit inside the grid and own its cell; each color
/// may field at most one King. Pawns may start anywhere, including a row
/// they would promote on.
pub fn validate_layout(cells: &[LayoutCell]) -> EngineResult<Vec<(Color, PieceKind, Coordinate)>> {
    let mut seen: HashSet<Coordinate> = HashSet::new();
    let mut kings: (u8, u8) = (0, 0);
    let mut placements: Vec<(Color, PieceKind, Coordinate)> = Vec::with_capacity(cells.len());

    for cell in cells {
        let (color, kind): (Color, PieceKind) = cell.decode()?;
        let at: Coordinate = cell.coordinate();
        if !at.in_bounds() {
            return Err(EngineError::Layout(format!("'{}' placed off the board at {at}", cell.code)));
        }
        if !seen.insert(at) {
            return Err(EngineError::Layout(format!("two pieces placed on {at}")));
        }
        match (kind, color) {
            (PieceKind::King, Color::Light) => kings.0 += 1,
            (PieceKind::King, Color::Dark) => kings.1 += 1,
            _ => (),
        }
        placements.push((color, kind, at));
    }

    if kings.0 > 1 || kings.1 > 1 {
        return Err(EngineError::Layout(format!(
            "Invalid number of kings: {} {}",
            kings.0, kings.1
        )));
    }
    Ok(placements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::layout::{parse_grid, LayoutBook, LayoutSource};

    fn cell(code: &str, row: i32, col: i32) -> LayoutCell {
        LayoutCell {
            code: code.to_string(),
            row,
            col,
        }
    }

    #[test]
    fn test_standard_is_valid() {
        let cells = LayoutBook::builtin().layout("standard").unwrap();
        assert_eq!(validate_layout(&cells).unwrap().len(), 32);
    }

    #[test]
    fn test_kingless_layout_is_valid() {
        let cells = vec![cell("LR", 0, 0), cell("DP", 0, 5)];
        assert_eq!(validate_layout(&cells).unwrap()[1], (Color::Dark, PieceKind::Pawn, Coordinate::new(0, 5)));
    }

    #[test]
    fn test_rejections() {
        assert!(validate_layout(&[cell("LR", 0, 0), cell("DR", 0, 0)]).is_err());
        assert!(validate_layout(&[cell("LR", 0, 9)]).is_err());
        assert!(validate_layout(&[cell("LK", 0, 0), cell("LK", 0, 1)]).is_err());
        assert!(validate_layout(&[cell("XP", 3, 3)]).is_err());

        let grid = parse_grid(&["DK .. .. .. .. .. .. DK"]).unwrap();
        assert!(validate_layout(&grid).is_err());
    }
}
