//! Board-setup data: named layouts of two-character piece codes.
//!
//! A code is a team symbol (`L` or `D`) followed by a kind symbol
//! (`P N B R Q K`). In grid form each row is a line of space-separated codes
//! with `..` for an empty cell; the first line is row 0.

use crate::error::{EngineError, EngineResult};
use crate::geometry::{Coordinate, BOARD_DIMENSION};
use crate::validation::pieces::{Color, PieceKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const EMPTY_CELL: &str = "..";

const STANDARD: [&str; 8] = [
    "LR LN LB LQ LK LB LN LR",
    "LP LP LP LP LP LP LP LP",
    ".. .. .. .. .. .. .. ..",
    ".. .. .. .. .. .. .. ..",
    ".. .. .. .. .. .. .. ..",
    ".. .. .. .. .. .. .. ..",
    "DP DP DP DP DP DP DP DP",
    "DR DN DB DQ DK DB DN DR",
];

/// One non-empty cell of a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutCell {
    pub code: String,
    pub row: i32,
    pub col: i32,
}

impl LayoutCell {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.row, self.col)
    }

    /// Splits the code into team and kind.
    pub fn decode(&self) -> EngineResult<(Color, PieceKind)> {
        let mut chars = self.code.chars();
        let (team, kind): (char, char) = match (chars.next(), chars.next(), chars.next()) {
            (Some(team), Some(kind), None) => (team, kind),
            _ => {
                return Err(EngineError::Layout(format!(
                    "code '{}' at ({}, {}) is not two characters",
                    self.code, self.row, self.col
                )))
            }
        };
        let color: Color = Color::from_symbol(team)
            .ok_or_else(|| EngineError::Layout(format!("unknown team symbol '{team}' in '{}'", self.code)))?;
        let kind: PieceKind = PieceKind::from_symbol(kind)
            .ok_or_else(|| EngineError::Layout(format!("unknown piece symbol '{kind}' in '{}'", self.code)))?;
        Ok((color, kind))
    }
}

/// Where `start_game` gets its initial position from.
pub trait LayoutSource {
    fn layout(&self, board_type: &str) -> Option<Vec<LayoutCell>>;
}

/// Named layouts held in memory.
#[derive(Debug, Clone, Default)]
pub struct LayoutBook {
    layouts: HashMap<String, Vec<LayoutCell>>,
}

impl LayoutBook {
    /// The `standard` opening position and an `empty` board.
    pub fn builtin() -> Self {
        let mut book: LayoutBook = LayoutBook::default();
        book.layouts.insert("empty".to_string(), Vec::new());
        // The built-in grid is well-formed; a failure here would be a typo above.
        if let Ok(cells) = parse_grid(&STANDARD) {
            book.layouts.insert("standard".to_string(), cells);
        }
        book
    }

    pub fn insert(&mut self, name: &str, cells: Vec<LayoutCell>) {
        self.layouts.insert(name.to_string(), cells);
    }

    pub fn insert_grid<S: AsRef<str>>(&mut self, name: &str, rows: &[S]) -> EngineResult<()> {
        let cells: Vec<LayoutCell> = parse_grid(rows)?;
        self.insert(name, cells);
        Ok(())
    }

    /// Adds every layout of a JSON object `{ "name": ["row", ...], ... }`.
    pub fn extend_from_json(&mut self, json: &str) -> EngineResult<()> {
        let grids: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        for (name, rows) in grids {
            self.insert_grid(&name, &rows[..])?;
        }
        Ok(())
    }

    pub fn extend_from_file(&mut self, path: &Path) -> EngineResult<()> {
        let content: String = fs::read_to_string(path)?;
        self.extend_from_json(&content)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.layouts.keys().map(String::as_str).collect();
        names.sort();
        names
    }
}

impl LayoutSource for LayoutBook {
    fn layout(&self, board_type: &str) -> Option<Vec<LayoutCell>> {
        self.layouts.get(board_type).cloned()
    }
}

/// Reads a grid of codes. Rows beyond the board or short/long rows are errors.
pub fn parse_grid<S: AsRef<str>>(rows: &[S]) -> EngineResult<Vec<LayoutCell>> {
    if rows.len() > BOARD_DIMENSION as usize {
        return Err(EngineError::Layout(format!(
            "{} rows given, board has {BOARD_DIMENSION}",
            rows.len()
        )));
    }
    let mut cells: Vec<LayoutCell> = Vec::new();
    for (row, line) in rows.iter().enumerate() {
        let codes: Vec<&str> = line.as_ref().split_whitespace().collect();
        if codes.len() != BOARD_DIMENSION as usize {
            return Err(EngineError::Layout(format!(
                "row {row} has {} cells, expected {BOARD_DIMENSION}",
                codes.len()
            )));
        }
        for (col, code) in codes.into_iter().enumerate() {
            if code == EMPTY_CELL {
                continue;
            }
            cells.push(LayoutCell {
                code: code.to_string(),
                row: row as i32,
                col: col as i32,
            });
        }
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout() {
        let book = LayoutBook::builtin();
        let cells = book.layout("standard").unwrap();
        assert_eq!(cells.len(), 32);
        let king = cells.iter().find(|cell| cell.code == "LK").unwrap();
        assert_eq!(king.coordinate(), Coordinate::new(0, 4));
        assert_eq!(king.decode().unwrap(), (Color::Light, PieceKind::King));
        assert!(book.layout("empty").unwrap().is_empty());
        assert!(book.layout("hexagonal").is_none());
    }

    #[test]
    fn test_grid_errors() {
        assert!(parse_grid(&["LR .. .."]).is_err());
        let nine_rows = vec![".. .. .. .. .. .. .. .."; 9];
        assert!(parse_grid(&nine_rows[..]).is_err());
    }

    #[test]
    fn test_decode_errors() {
        let cell = |code: &str| LayoutCell { code: code.to_string(), row: 0, col: 0 };
        assert!(cell("XK").decode().is_err());
        assert!(cell("LX").decode().is_err());
        assert!(cell("LKK").decode().is_err());
        assert_eq!(cell("dq").decode().unwrap(), (Color::Dark, PieceKind::Queen));
    }

    #[test]
    fn test_extend_from_json() {
        let mut book = LayoutBook::builtin();
        let json = r#"{"rook-vs-pawn": [
            "LR .. .. .. .. DP .. ..",
            ".. .. .. .. .. .. .. .."
        ]}"#;
        book.extend_from_json(json).unwrap();
        let cells = book.layout("rook-vs-pawn").unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1].coordinate(), Coordinate::new(0, 5));
        assert_eq!(book.names(), vec!["empty", "rook-vs-pawn", "standard"]);
        assert!(book.extend_from_json("not json").is_err());
    }
}
