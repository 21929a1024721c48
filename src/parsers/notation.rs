//! Square names and short algebraic notation.
//!
//! File `a` is column 0 and rank `1` is row 0, so Light's back row reads as rank 1.

use crate::game::move_record::{CapturedPiece, Disambiguation, MoveRecord, MovedPiece, SpecialMove};
use crate::geometry::{Coordinate, BOARD_DIMENSION};
use crate::validation::pieces::PieceKind;

const KING_SIDE_TOKENS: [&str; 2] = ["O-O", "0-0"];
const QUEEN_SIDE_TOKENS: [&str; 2] = ["O-O-O", "0-0-0"];

fn file_of(c: char) -> Option<i32> {
    let col: i32 = (c as i32) - ('a' as i32);
    (0..BOARD_DIMENSION).contains(&col).then_some(col)
}

fn rank_of(c: char) -> Option<i32> {
    let row: i32 = c.to_digit(10)? as i32 - 1;
    (0..BOARD_DIMENSION).contains(&row).then_some(row)
}

/// Converts a square name (e.g. "e2") to a coordinate (e.g. row 1, col 4).
pub fn square_from_name(name: &str) -> Option<Coordinate> {
    let mut chars = name.trim().chars();
    let file: char = chars.next()?; // Column (a-h)
    let rank: char = chars.next()?; // Row (1-8)
    if chars.next().is_some() {
        return None;
    }
    Some(Coordinate::new(rank_of(rank)?, file_of(file.to_ascii_lowercase())?))
}

pub fn to_square_name(coord: Coordinate) -> Option<String> {
    if !coord.in_bounds() {
        return None;
    }
    Some(format!(
        "{}{}",
        (b'a' + coord.col as u8) as char,
        coord.row + 1
    ))
}

/// Normalises raw user input: drops all whitespace and trailing annotation
/// marks (`!`, `?`).
pub fn clean_input(text: &str) -> String {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    compact.trim_end_matches(['!', '?']).to_string()
}

/// Parses short algebraic notation into a proposed move.
///
/// Recognises `O-O` / `O-O-O` (or with zeros), an optional leading piece
/// letter (none means Pawn), a file, rank or square disambiguation, a capture
/// marker (`x` or `:`), the destination square, a promotion (`=Q` or a bare
/// trailing letter) and a trailing `+` or `#`.
///
/// Returns `None` when the piece letter or destination cannot be resolved. The
/// result is not checked against any board.
pub fn parse_notation(text: &str) -> Option<MoveRecord> {
    let cleaned: String = clean_input(text);
    let mut body: &str = cleaned.as_str();

    let (mut check, mut checkmate): (bool, bool) = (false, false);
    if let Some(rest) = body.strip_suffix('#') {
        checkmate = true;
        body = rest;
    } else if let Some(rest) = body.strip_suffix('+') {
        check = true;
        body = rest;
    }

    let castle: Option<SpecialMove> = if KING_SIDE_TOKENS.contains(&body) {
        Some(SpecialMove::KingSideCastle)
    } else if QUEEN_SIDE_TOKENS.contains(&body) {
        Some(SpecialMove::QueenSideCastle)
    } else {
        None
    };
    if let Some(special) = castle {
        return Some(MoveRecord {
            pieces: vec![
                MovedPiece::parsed(PieceKind::King, None),
                MovedPiece::parsed(PieceKind::Rook, None),
            ],
            notation: cleaned.clone(),
            special,
            disambiguation: None,
            check,
            checkmate,
        });
    }

    let mut chars: Vec<char> = body.chars().collect();

    // Promotion: "=Q" or a bare trailing piece letter after the rank.
    let mut promotion: Option<PieceKind> = None;
    if let Some(&last) = chars.last() {
        if last.is_ascii_uppercase() {
            let kind: PieceKind = PieceKind::from_symbol(last)?;
            if !PieceKind::PROMOTIONS.contains(&kind) {
                return None;
            }
            promotion = Some(kind);
            chars.pop();
            if chars.last() == Some(&'=') {
                chars.pop();
            }
        }
    }

    let kind: PieceKind = match chars.first() {
        Some(c) if c.is_ascii_uppercase() => {
            let kind: PieceKind = PieceKind::from_symbol(*c)?;
            chars.remove(0);
            kind
        }
        Some(_) => PieceKind::Pawn,
        None => return None,
    };
    if promotion.is_some() && kind != PieceKind::Pawn {
        return None;
    }

    if chars.len() < 2 {
        return None;
    }
    let rank: char = chars.pop()?;
    let file: char = chars.pop()?;
    let destination: Coordinate = Coordinate::new(rank_of(rank)?, file_of(file)?);

    let capture: bool = matches!(chars.last(), Some('x') | Some(':'));
    if capture {
        chars.pop();
    }

    let disambiguation: Option<Disambiguation> = match chars.as_slice() {
        [] => None,
        [c] if c.is_ascii_digit() => Some(Disambiguation::Rank(rank_of(*c)?)),
        [c] => Some(Disambiguation::File(file_of(*c)?)),
        [f, r] => Some(Disambiguation::Square(Coordinate::new(rank_of(*r)?, file_of(*f)?))),
        _ => return None,
    };

    let captured: Option<CapturedPiece> = capture.then_some(CapturedPiece {
        at: destination,
        piece: None,
        color: None,
        kind: None,
    });
    let special: SpecialMove = match (promotion, captured) {
        (Some(to), captured) => SpecialMove::Promotion { to, captured },
        (None, Some(target)) => SpecialMove::Capture { target },
        (None, None) => SpecialMove::Plain,
    };

    Some(MoveRecord {
        pieces: vec![MovedPiece::parsed(kind, Some(destination))],
        notation: cleaned.clone(),
        special,
        disambiguation,
        check,
        checkmate,
    })
}

/// Renders an engine-produced record in short algebraic notation.
pub fn to_notation(record: &MoveRecord) -> String {
    let suffix: &str = if record.checkmate {
        "#"
    } else if record.check {
        "+"
    } else {
        ""
    };
    match record.special {
        SpecialMove::KingSideCastle => return format!("{}{suffix}", KING_SIDE_TOKENS[0]),
        SpecialMove::QueenSideCastle => return format!("{}{suffix}", QUEEN_SIDE_TOKENS[0]),
        _ => {}
    }

    let mover: &MovedPiece = match record.mover() {
        Some(mover) => mover,
        None => return record.notation.clone(),
    };
    let destination: String = mover.to.and_then(to_square_name).unwrap_or_default();
    let mut text: String = String::new();
    if mover.kind == PieceKind::Pawn {
        if record.captured().is_some() {
            if let Some(from) = mover.from.and_then(to_square_name) {
                text.extend(from.chars().next());
            }
            text.push('x');
        }
    } else {
        text.push(mover.kind.symbol());
        if record.captured().is_some() {
            text.push('x');
        }
    }
    text.push_str(&destination);
    if let Some(kind) = record.promotion() {
        text.push('=');
        text.push(kind.symbol());
    }
    text.push_str(suffix);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_names() {
        assert_eq!(square_from_name("a1"), Some(Coordinate::new(0, 0)));
        assert_eq!(square_from_name("e2"), Some(Coordinate::new(1, 4)));
        assert_eq!(square_from_name("h8"), Some(Coordinate::new(7, 7)));
        assert_eq!(square_from_name("i1"), None);
        assert_eq!(square_from_name("a9"), None);
        assert_eq!(square_from_name("a10"), None);
        assert_eq!(to_square_name(Coordinate::new(0, 5)), Some("f1".to_string()));
        assert_eq!(to_square_name(Coordinate::new(8, 0)), None);
    }

    #[test]
    fn test_clean_input() {
        assert_eq!(clean_input("  N f3 !? "), "Nf3");
        assert_eq!(clean_input("e4"), "e4");
    }

    #[test]
    fn test_castling_tokens() {
        let record = parse_notation("O-O").unwrap();
        assert_eq!(record.special, SpecialMove::KingSideCastle);
        let kinds: Vec<PieceKind> = record.pieces.iter().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![PieceKind::King, PieceKind::Rook]);

        let record = parse_notation("0-0-0+").unwrap();
        assert_eq!(record.special, SpecialMove::QueenSideCastle);
        assert!(record.check);
    }

    #[test]
    fn test_pawn_push() {
        let record = parse_notation("e4").unwrap();
        assert_eq!(record.mover().unwrap().kind, PieceKind::Pawn);
        assert_eq!(record.destination(), Some(Coordinate::new(3, 4)));
        assert_eq!(record.special, SpecialMove::Plain);
        assert_eq!(record.disambiguation, None);
    }

    #[test]
    fn test_piece_capture_with_check() {
        let record = parse_notation("Nxe5+").unwrap();
        assert_eq!(record.mover().unwrap().kind, PieceKind::Knight);
        assert_eq!(record.captured().unwrap().at, Coordinate::new(4, 4));
        assert!(record.check);
        assert!(!record.checkmate);
    }

    #[test]
    fn test_disambiguation() {
        let record = parse_notation("Rad1").unwrap();
        assert_eq!(record.disambiguation, Some(Disambiguation::File(0)));
        let record = parse_notation("R1d4").unwrap();
        assert_eq!(record.disambiguation, Some(Disambiguation::Rank(0)));
        let record = parse_notation("Qh4xe1#").unwrap();
        assert_eq!(record.disambiguation, Some(Disambiguation::Square(Coordinate::new(3, 7))));
        assert!(record.checkmate);
        let record = parse_notation("exd5").unwrap();
        assert_eq!(record.disambiguation, Some(Disambiguation::File(4)));
        assert!(record.captured().is_some());
    }

    #[test]
    fn test_promotion() {
        let record = parse_notation("e8=Q").unwrap();
        assert_eq!(record.promotion(), Some(PieceKind::Queen));
        let record = parse_notation("dxc1N").unwrap();
        assert_eq!(record.promotion(), Some(PieceKind::Knight));
        assert!(record.captured().is_some());
        assert!(parse_notation("e8=K").is_none());
        assert!(parse_notation("Ne8=Q").is_none());
    }

    #[test]
    fn test_unresolvable() {
        assert!(parse_notation("").is_none());
        assert!(parse_notation("Zf3").is_none());
        assert!(parse_notation("Nz3").is_none());
        assert!(parse_notation("N").is_none());
        assert!(parse_notation("Nabcd4").is_none());
    }
}
