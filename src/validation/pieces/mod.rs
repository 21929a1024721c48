//! Piece catalog: per-kind score value, notation symbol and move/capture patterns.

pub mod bishop;
pub mod king;
pub mod knight;
pub mod pawn;
pub mod queen;
pub mod rook;

use crate::geometry::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two teams. Light moves first and starts on the low rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Light, Color::Dark];

    pub fn opponent(self) -> Color {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Team symbol used by board layouts.
    pub fn symbol(self) -> char {
        match self {
            Color::Light => 'L',
            Color::Dark => 'D',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Color> {
        match symbol.to_ascii_uppercase() {
            'L' => Some(Color::Light),
            'D' => Some(Color::Dark),
            _ => None,
        }
    }

    /// Row delta of one step "forward" for this team.
    pub fn forward(self) -> i32 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Light => write!(f, "Light"),
            Color::Dark => write!(f, "Dark"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Static description of one piece kind.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub kind: PieceKind,
    pub value: i32,
    pub symbol: char,
    /// Patterns for moving onto an empty cell, from Light's side.
    pub moves: &'static [Direction],
    /// Patterns for capturing an opposing piece, from Light's side.
    pub captures: &'static [Direction],
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may be promoted to.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn catalog(self) -> CatalogEntry {
        match self {
            PieceKind::Pawn => CatalogEntry {
                kind: self,
                value: pawn::VALUE,
                symbol: pawn::SYMBOL,
                moves: &pawn::MOVES,
                captures: &pawn::CAPTURES,
            },
            PieceKind::Knight => CatalogEntry {
                kind: self,
                value: knight::VALUE,
                symbol: knight::SYMBOL,
                moves: &knight::MOVES,
                captures: &knight::MOVES,
            },
            PieceKind::Bishop => CatalogEntry {
                kind: self,
                value: bishop::VALUE,
                symbol: bishop::SYMBOL,
                moves: &bishop::MOVES,
                captures: &bishop::MOVES,
            },
            PieceKind::Rook => CatalogEntry {
                kind: self,
                value: rook::VALUE,
                symbol: rook::SYMBOL,
                moves: &rook::MOVES,
                captures: &rook::MOVES,
            },
            PieceKind::Queen => CatalogEntry {
                kind: self,
                value: queen::VALUE,
                symbol: queen::SYMBOL,
                moves: &queen::MOVES,
                captures: &queen::MOVES,
            },
            PieceKind::King => CatalogEntry {
                kind: self,
                value: king::VALUE,
                symbol: king::SYMBOL,
                moves: &king::MOVES,
                captures: &king::MOVES,
            },
        }
    }

    pub fn value(self) -> i32 {
        self.catalog().value
    }

    pub fn symbol(self) -> char {
        self.catalog().symbol
    }

    /// Resolves a notation letter (either case) to a kind.
    pub fn from_symbol(symbol: char) -> Option<PieceKind> {
        let symbol: char = symbol.to_ascii_uppercase();
        PieceKind::ALL.into_iter().find(|kind| kind.symbol() == symbol)
    }

    /// Move patterns oriented for `color`.
    pub fn move_directions(self, color: Color) -> Vec<Direction> {
        orient(self.catalog().moves, color)
    }

    /// Capture patterns oriented for `color`.
    pub fn capture_directions(self, color: Color) -> Vec<Direction> {
        orient(self.catalog().captures, color)
    }
}

fn orient(directions: &[Direction], color: Color) -> Vec<Direction> {
    match color {
        Color::Light => directions.to_vec(),
        Color::Dark => directions.iter().map(|d| d.mirrored_rows()).collect(),
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coordinate;

    #[test]
    fn test_symbol_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_symbol(kind.symbol()), Some(kind));
        }
        assert_eq!(PieceKind::from_symbol('n'), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_symbol('X'), None);
    }

    #[test]
    fn test_only_pawn_captures_differ() {
        for kind in PieceKind::ALL {
            let entry = kind.catalog();
            let same: bool = entry.moves == entry.captures;
            assert_eq!(same, kind != PieceKind::Pawn, "{kind}");
        }
    }

    #[test]
    fn test_dark_pawn_is_mirrored() {
        let moves = PieceKind::Pawn.move_directions(Color::Dark);
        assert!(moves.iter().any(|d| d.matches(Coordinate::new(-1, 0))));
        assert!(!moves.iter().any(|d| d.matches(Coordinate::new(1, 0))));
        let captures = PieceKind::Pawn.capture_directions(Color::Dark);
        assert!(captures.iter().any(|d| d.matches(Coordinate::new(-1, 1))));
    }

    #[test]
    fn test_values() {
        assert_eq!(PieceKind::Pawn.value(), 1);
        assert_eq!(PieceKind::Queen.value(), 9);
        assert_eq!(Color::Light.opponent(), Color::Dark);
    }
}
