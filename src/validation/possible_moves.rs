//! Move validation: pattern matching, path occlusion, destination enumeration,
//! move execution and the check/checkmate probes built on top of them.

use super::castling::{self, CastleSide};
use super::pieces::{pawn, Color, PieceKind};
use crate::board::piece::{Piece, PieceId};
use crate::board::Board;
use crate::error::{EngineError, EngineResult};
use crate::game::move_record::{CapturedPiece, MoveRecord, MovedPiece, SpecialMove};
use crate::geometry::{Coordinate, Direction};
use crate::parsers::notation;
use log::debug;
use rayon::prelude::*;

/// How an accepted request will be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedMove {
    Plain,
    Capture(PieceId),
    Castle(CastleSide),
}

/// Determines the current game status for one side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    /// No in-play piece of the side can move.
    Immobile,
}

/// Whether a straight or diagonal `from -> to` has an occupied cell in between.
/// Jumps (deltas off every line) are never obstructed.
fn path_blocked(board: &Board, from: Coordinate, to: Coordinate) -> bool {
    board.has_occupant_in_line(from, to, false)
}

fn any_matches(directions: &[Direction], delta: Coordinate) -> bool {
    directions.iter().any(|direction| direction.matches(delta))
}

fn is_double_step(piece: &Piece, delta: Coordinate) -> bool {
    let forward: Direction = match piece.color {
        Color::Light => pawn::DOUBLE_STEP,
        Color::Dark => pawn::DOUBLE_STEP.mirrored_rows(),
    };
    piece.kind == PieceKind::Pawn && !piece.has_moved() && forward.matches(delta)
}

/// Whether the piece on `from` could capture on `target`, ignoring what stands there.
pub fn attacks(board: &Board, from: Coordinate, target: Coordinate) -> bool {
    let piece: &Piece = match board.occupant_at(from) {
        Some(piece) => piece,
        None => return false,
    };
    any_matches(&piece.kind.capture_directions(piece.color), target - from)
        && !path_blocked(board, from, target)
}

/// Classifies a request without changing the board.
///
/// Checks run in order: a piece must stand on `from`, `to` must be on the
/// board, a castle shape goes to the castling rules, then capture patterns
/// against an opposing occupant, then move patterns onto an empty cell.
///
/// # Arguments
///
/// * `board` - The board the request is made against. It is not modified.
/// * `from` - The cell of the piece asked to move.
/// * `to` - The cell it is asked to move to.
///
/// # Returns
///
/// The planned plain move, capture or castle, or the error kind of the first
/// check that failed.
pub fn classify(board: &Board, from: Coordinate, to: Coordinate) -> EngineResult<PlannedMove> {
    let piece: &Piece = board
        .occupant_at(from)
        .ok_or_else(|| EngineError::NotFound(format!("no piece at {from}")))?;
    if !to.in_bounds() {
        return Err(EngineError::OutOfBounds(to));
    }
    if from == to {
        return Err(EngineError::IllegalMove(format!("{} at {from} must leave its cell", piece.kind)));
    }

    if castling::looks_like_castle(board, from, to) && !piece.has_moved() {
        return match castling::is_castle_move(board, from, to) {
            Some(side) => Ok(PlannedMove::Castle(side)),
            None => Err(EngineError::InvalidState(format!(
                "{} cannot castle from {from} to {to}",
                piece.color
            ))),
        };
    }

    let delta: Coordinate = to - from;
    if let Some(target) = board.occupant_at(to) {
        if target.color == piece.color {
            return Err(EngineError::IllegalMove(format!("{to} is occupied by a {} {}", target.color, target.kind)));
        }
        if !any_matches(&piece.kind.capture_directions(piece.color), delta) {
            return Err(EngineError::IllegalMove(format!(
                "{} cannot capture from {from} to {to}: delta {delta} matches no capture pattern",
                piece.kind
            )));
        }
        if path_blocked(board, from, to) {
            return Err(EngineError::IllegalMove(format!("path from {from} to {to} is obstructed")));
        }
        return Ok(PlannedMove::Capture(target.id));
    }

    if !any_matches(&piece.kind.move_directions(piece.color), delta) && !is_double_step(piece, delta) {
        return Err(EngineError::IllegalMove(format!(
            "{} cannot move from {from} to {to}: delta {delta} matches no move pattern",
            piece.kind
        )));
    }
    if path_blocked(board, from, to) {
        return Err(EngineError::IllegalMove(format!("path from {from} to {to} is obstructed")));
    }
    Ok(PlannedMove::Plain)
}

/// Every cell the piece on `from` may move to, castling targets included.
///
/// Candidates come from walking each move and capture pattern (sliders stop at
/// the first occupied cell); each candidate is then confirmed by [`classify`],
/// so the list always agrees with what [`try_move`] accepts.
///
/// # Arguments
///
/// * `board` - The board to search.
/// * `from` - The cell of the piece whose destinations are wanted.
///
/// # Returns
///
/// The reachable cells in row-major order, or `NotFound` when `from` is empty.
pub fn possible_destinations(board: &Board, from: Coordinate) -> EngineResult<Vec<Coordinate>> {
    let piece: &Piece = board
        .occupant_at(from)
        .ok_or_else(|| EngineError::NotFound(format!("no piece at {from}")))?;

    let mut patterns: Vec<Direction> = piece.kind.move_directions(piece.color);
    patterns.extend(piece.kind.capture_directions(piece.color));
    if piece.kind == PieceKind::Pawn && !piece.has_moved() {
        patterns.push(match piece.color {
            Color::Light => pawn::DOUBLE_STEP,
            Color::Dark => pawn::DOUBLE_STEP.mirrored_rows(),
        });
    }

    let mut candidates: Vec<Coordinate> = Vec::new();
    for direction in patterns {
        if let Some(step) = direction.slide_step() {
            let mut cursor: Coordinate = from + step;
            while cursor.in_bounds() {
                candidates.push(cursor);
                if board.positions().is_occupied(cursor) {
                    break;
                }
                cursor = cursor + step;
            }
        } else if let Some(delta) = direction.fixed_delta() {
            let target: Coordinate = from + delta;
            if target.in_bounds() {
                candidates.push(target);
            }
        }
    }

    if piece.kind == PieceKind::King {
        let info = castling::can_castle(board, piece.color);
        candidates.extend(info.king_side_target);
        candidates.extend(info.queen_side_target);
    }

    candidates.sort();
    candidates.dedup();
    candidates.retain(|to| classify(board, from, *to).is_ok());
    Ok(candidates)
}

/// Validates and executes `from -> to`, returning the record of what happened.
///
/// A pawn ending on its promotion row becomes `promotion`. Check flags are left
/// unset; the caller fills them in once the whole turn is known.
///
/// # Arguments
///
/// * `board` - The board to change. Left untouched when the move is refused.
/// * `from` - The cell of the moving piece.
/// * `to` - The target cell.
/// * `promotion` - What a pawn reaching its last row becomes.
///
/// # Returns
///
/// The `MoveRecord` of the executed move.
pub fn try_move(
    board: &mut Board,
    from: Coordinate,
    to: Coordinate,
    promotion: PieceKind,
) -> EngineResult<MoveRecord> {
    let plan: PlannedMove = classify(board, from, to)?;
    let mover: Piece = board
        .occupant_at(from)
        .cloned()
        .ok_or_else(|| EngineError::Internal(format!("mover left {from} during validation")))?;
    debug!("{} {} {from} -> {to}: {:?}", mover.color, mover.kind, plan);

    let mut pieces: Vec<MovedPiece> = vec![moved(&mover, from, to)];
    let mut special: SpecialMove = match plan {
        PlannedMove::Plain => {
            board.relocate(mover.id, from, to).map_err(internal)?;
            SpecialMove::Plain
        }
        PlannedMove::Capture(target_id) => {
            let target: Piece = board
                .piece(target_id)
                .cloned()
                .ok_or_else(|| EngineError::Internal(format!("capture target {target_id} has no record")))?;
            board.capture(to).map_err(internal)?;
            board.relocate(mover.id, from, to).map_err(internal)?;
            SpecialMove::Capture {
                target: CapturedPiece {
                    at: to,
                    piece: Some(target.id),
                    color: Some(target.color),
                    kind: Some(target.kind),
                },
            }
        }
        PlannedMove::Castle(side) => {
            let moves = castling::castle_moves(board, mover.color, side)?;
            board.relocate_all(&moves)?;
            let (rook_id, rook_from, rook_to) = moves[1];
            let rook: Piece = board
                .piece(rook_id)
                .cloned()
                .ok_or_else(|| EngineError::Internal(format!("castling Rook {rook_id} has no record")))?;
            pieces.push(moved(&rook, rook_from, rook_to));
            match side {
                CastleSide::KingSide => SpecialMove::KingSideCastle,
                CastleSide::QueenSide => SpecialMove::QueenSideCastle,
            }
        }
    };

    if mover.kind == PieceKind::Pawn && to.row == Board::promotion_row(mover.color) {
        board.promote(to, promotion)?;
        let captured: Option<CapturedPiece> = match special {
            SpecialMove::Capture { target } => Some(target),
            _ => None,
        };
        special = SpecialMove::Promotion { to: promotion, captured };
    }

    let mut record: MoveRecord = MoveRecord {
        pieces,
        notation: String::new(),
        special,
        disambiguation: None,
        check: false,
        checkmate: false,
    };
    record.notation = notation::to_notation(&record);
    Ok(record)
}

fn moved(piece: &Piece, from: Coordinate, to: Coordinate) -> MovedPiece {
    MovedPiece {
        kind: piece.kind,
        color: Some(piece.color),
        piece: Some(piece.id),
        from: Some(from),
        to: Some(to),
    }
}

// A relocation refused after validation passed means the board changed under us.
fn internal(err: EngineError) -> EngineError {
    EngineError::Internal(format!("validated move failed to apply: {err}"))
}

/// Whether `color`'s King stands on a cell some opposing piece attacks.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let king_at: Coordinate = match board.king_of(color) {
        Some((coord, _)) => coord,
        None => return false,
    };
    board
        .pieces_of(color.opponent(), None)
        .iter()
        .any(|(coord, _)| attacks(board, *coord, king_at))
}

/// Whether `color` has lost its King or is in check with no reply that ends it.
///
/// Replies are tried on copies of the board, in parallel.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    let king_lost: bool = board
        .roster()
        .iter()
        .any(|piece| piece.color == color && piece.kind == PieceKind::King)
        && board.king_of(color).is_none();
    if king_lost {
        return true;
    }
    if !is_in_check(board, color) {
        return false;
    }

    let replies: Vec<(Coordinate, Coordinate)> = board
        .pieces_of(color, None)
        .iter()
        .flat_map(|(from, _)| {
            possible_destinations(board, *from)
                .unwrap_or_default()
                .into_iter()
                .map(move |to| (*from, to))
        })
        .collect();

    !replies.into_par_iter().any(|(from, to)| {
        let mut trial: Board = board.clone();
        try_move(&mut trial, from, to, PieceKind::Queen).is_ok() && !is_in_check(&trial, color)
    })
}

/// Whether any in-play piece of `color` has at least one destination.
pub fn has_movable_piece(board: &Board, color: Color) -> bool {
    let origins: Vec<Coordinate> = board
        .pieces_of(color, None)
        .into_iter()
        .map(|(coord, _)| coord)
        .collect();
    origins.into_par_iter().any(|from| {
        possible_destinations(board, from)
            .map(|destinations| !destinations.is_empty())
            .unwrap_or(false)
    })
}

pub fn get_game_status(board: &Board, color: Color) -> GameStatus {
    if is_checkmate(board, color) {
        GameStatus::Checkmate
    } else if !has_movable_piece(board, color) {
        GameStatus::Immobile
    } else if is_in_check(board, color) {
        GameStatus::Check
    } else {
        GameStatus::Ongoing
    }
}
