//! Owns every live game and turns requests into state transitions.

use super::events::{EventHub, GameEvent, Listener};
use super::game_state::{GameState, GameStateView, Phase};
use super::move_record::{MoveRecord, SpecialMove};
use crate::board::piece::Piece;
use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult, ErrorKind};
use crate::geometry::Coordinate;
use crate::parsers::layout::{LayoutBook, LayoutCell, LayoutSource};
use crate::parsers::notation;
use crate::validation::board_validation::validate_layout;
use crate::validation::castling::{self, CastleInfo};
use crate::validation::pieces::{king, Color, PieceKind};
use crate::validation::possible_moves::{self, GameStatus};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// What came of a move request. Rejections carry the reason instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub ok: bool,
    pub attempted: Vec<Coordinate>,
    pub message: String,
    pub error: Option<ErrorKind>,
    pub record: Option<MoveRecord>,
}

impl MoveOutcome {
    fn accepted(attempted: Vec<Coordinate>, record: MoveRecord) -> Self {
        Self {
            ok: true,
            attempted,
            message: format!("moved: {}", record.notation),
            error: None,
            record: Some(record),
        }
    }

    fn rejected(attempted: Vec<Coordinate>, err: &EngineError) -> Self {
        Self {
            ok: false,
            attempted,
            message: err.to_string(),
            error: Some(err.kind()),
            record: None,
        }
    }
}

pub struct Orchestrator {
    config: EngineConfig,
    layouts: Box<dyn LayoutSource>,
    games: HashMap<String, GameState>,
    events: EventHub,
}

impl Orchestrator {
    /// Built-in layouts plus whatever `config.layouts_file` adds.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let mut book: LayoutBook = LayoutBook::builtin();
        if let Some(path) = &config.layouts_file {
            book.extend_from_file(path)?;
            debug!("layouts available: {:?}", book.names());
        }
        Self::with_layouts(config, Box::new(book))
    }

    /// Fails with `Config` when `config` does not pass validation.
    pub fn with_layouts(config: EngineConfig, layouts: Box<dyn LayoutSource>) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            layouts,
            games: HashMap::new(),
            events: EventHub::default(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn subscribe(&mut self, event: GameEvent, listener: Listener) {
        self.events.subscribe(event, listener);
    }

    fn game(&self, id: &str) -> EngineResult<&GameState> {
        self.games
            .get(id)
            .ok_or_else(|| EngineError::NotFound(format!("no game with id '{id}'")))
    }

    fn game_mut(&mut self, id: &str) -> EngineResult<&mut GameState> {
        self.games
            .get_mut(id)
            .ok_or_else(|| EngineError::NotFound(format!("no game with id '{id}'")))
    }

    fn playing(&mut self, id: &str) -> EngineResult<&mut GameState> {
        let state: &mut GameState = self.game_mut(id)?;
        if state.phase != Phase::InProgress {
            return Err(EngineError::InvalidState(format!("game '{id}' is {:?}", state.phase)));
        }
        Ok(state)
    }

    /// Starts `id` on the configured board type.
    pub fn start_game(&mut self, id: &str) -> EngineResult<GameStateView> {
        let board_type: String = self.config.board_type.clone();
        self.start_game_on(id, &board_type)
    }

    pub fn start_game_on(&mut self, id: &str, board_type: &str) -> EngineResult<GameStateView> {
        if self.games.contains_key(id) {
            return Err(EngineError::InvalidState(format!("game '{id}' already exists")));
        }
        let placements: Vec<(Color, PieceKind, Coordinate)> = self.placements(board_type)?;

        let mut state: GameState = GameState::new(id, board_type);
        seed(&mut state, &placements)?;
        let view: GameStateView = state.view();
        self.games.insert(id.to_string(), state);
        info!("game '{id}' started on '{board_type}' with {} pieces", view.pieces.len());
        self.events.emit(GameEvent::StartGame, &view);
        Ok(view)
    }

    /// Clears `id` and seeds it again from the layout it started on.
    ///
    /// Listeners see a fresh `StartGame`. A layout that no longer validates
    /// leaves the game as it was.
    pub fn reset_game(&mut self, id: &str) -> EngineResult<GameStateView> {
        let board_type: String = self.game(id)?.board_type.clone();
        let placements: Vec<(Color, PieceKind, Coordinate)> = self.placements(&board_type)?;

        let state: &mut GameState = self.game_mut(id)?;
        state.reset();
        seed(state, &placements)?;
        let view: GameStateView = state.view();
        info!("game '{id}' reset on '{board_type}'");
        self.events.emit(GameEvent::StartGame, &view);
        Ok(view)
    }

    fn placements(&self, board_type: &str) -> EngineResult<Vec<(Color, PieceKind, Coordinate)>> {
        let cells: Vec<LayoutCell> = self
            .layouts
            .layout(board_type)
            .ok_or_else(|| EngineError::NotFound(format!("no board layout named '{board_type}'")))?;
        validate_layout(&cells)
    }

    /// Validates and applies `from -> to` for the side on turn.
    pub fn request_move(&mut self, id: &str, from: Coordinate, to: Coordinate) -> MoveOutcome {
        self.outcome(id, from, to, None)
    }

    fn outcome(&mut self, id: &str, from: Coordinate, to: Coordinate, promotion: Option<PieceKind>) -> MoveOutcome {
        match self.apply_move(id, from, to, promotion) {
            Ok(record) => MoveOutcome::accepted(vec![from, to], record),
            Err(err) => {
                match &err {
                    EngineError::Internal(_) => warn!("game '{id}': {err}"),
                    _ => info!("game '{id}': rejected {from} -> {to}: {err}"),
                }
                MoveOutcome::rejected(vec![from, to], &err)
            }
        }
    }

    fn apply_move(
        &mut self,
        id: &str,
        from: Coordinate,
        to: Coordinate,
        promotion: Option<PieceKind>,
    ) -> EngineResult<MoveRecord> {
        let enforce_turn_order: bool = self.config.enforce_turn_order;
        let promotion: PieceKind = promotion.unwrap_or(self.config.promotion_kind);
        let state: &mut GameState = self.playing(id)?;

        if state.pending.is_some() {
            return Err(EngineError::InvalidState(format!(
                "{} already moved this turn; advance the turn first",
                state.current_player
            )));
        }
        if let Some(piece) = state.board.occupant_at(from) {
            if enforce_turn_order && piece.color != state.current_player {
                return Err(EngineError::InvalidState(format!(
                    "it is {}'s turn, not {}'s",
                    state.current_player, piece.color
                )));
            }
        }

        let mut record: MoveRecord = possible_moves::try_move(&mut state.board, from, to, promotion)?;
        let mover: Color = record
            .mover()
            .and_then(|moved| moved.color)
            .ok_or_else(|| EngineError::Internal("executed move has no mover color".into()))?;

        if let Some(captured_id) = record.captured().and_then(|captured| captured.piece) {
            let captured: Piece = state
                .board
                .piece(captured_id)
                .cloned()
                .ok_or_else(|| EngineError::Internal(format!("captured piece {captured_id} has no record")))?;
            state.captured.push(captured);
        }

        match possible_moves::get_game_status(&state.board, mover.opponent()) {
            GameStatus::Checkmate => record.checkmate = true,
            GameStatus::Check => record.check = true,
            GameStatus::Ongoing | GameStatus::Immobile => {}
        }
        record.notation = notation::to_notation(&record);
        state.check = record.check;
        state.checkmate = record.checkmate;

        state.history.entry(mover).or_default().push(record.clone());
        state.pending = Some(record.clone());
        let view: GameStateView = state.view();
        info!("game '{id}': {mover} played {}", record.notation);

        self.events.emit(GameEvent::PieceMoved, &view);
        Ok(record)
    }

    /// Every legal destination of the piece on `at`, as the record the move would produce.
    ///
    /// Each move is tried on a copy of the board, so the live game is untouched.
    pub fn possible_destinations(&self, id: &str, at: Coordinate) -> EngineResult<Vec<MoveRecord>> {
        let state: &GameState = self.game(id)?;
        let destinations: Vec<Coordinate> = possible_moves::possible_destinations(&state.board, at)?;
        destinations
            .into_iter()
            .map(|to| {
                let mut trial = state.board.clone();
                possible_moves::try_move(&mut trial, at, to, self.config.promotion_kind)
            })
            .collect()
    }

    pub fn can_castle(&self, id: &str, color: Color) -> EngineResult<CastleInfo> {
        let state: &GameState = self.game(id)?;
        Ok(castling::can_castle(&state.board, color))
    }

    /// Settles the pending move and hands the turn over.
    ///
    /// # Returns
    ///
    /// The player now on turn, or `None` when the game has just ended.
    pub fn advance_turn(&mut self, id: &str) -> EngineResult<Option<Color>> {
        let state: &mut GameState = self.playing(id)?;
        let record: MoveRecord = state
            .pending
            .take()
            .ok_or_else(|| EngineError::InvalidState(format!("no move made in game '{id}' this turn")))?;

        if let Some(captured) = record.captured() {
            let (color, kind): (Color, PieceKind) = match (captured.color, captured.kind) {
                (Some(color), Some(kind)) => (color, kind),
                _ => {
                    return Err(EngineError::Internal(format!(
                        "capture at {} was recorded without its piece",
                        captured.at
                    )))
                }
            };
            let value: i32 = kind.value();
            *state.scores.entry(color.opponent()).or_insert(0) += value;
            *state.scores.entry(color).or_insert(0) -= value;
        }

        let next: Color = state.current_player.opponent();
        state.current_player = next;
        let view: GameStateView = state.view();
        self.events.emit(GameEvent::SuccessfulTurn, &view);

        let state: &mut GameState = self.game_mut(id)?;
        match possible_moves::get_game_status(&state.board, next) {
            GameStatus::Checkmate | GameStatus::Immobile => {
                state.phase = Phase::Ended;
                info!(
                    "game '{id}' ended: {next} cannot continue, scores {:?}",
                    state.scores
                );
                Ok(None)
            }
            _ => {
                debug!("game '{id}': {next} to move");
                Ok(Some(next))
            }
        }
    }

    /// Each side's share of the combined score.
    pub fn win_percentage(&self, id: &str) -> EngineResult<BTreeMap<Color, f64>> {
        let state: &GameState = self.game(id)?;
        let (light, dark): (i32, i32) = (state.score(Color::Light), state.score(Color::Dark));
        let even: BTreeMap<Color, f64> = Color::ALL.into_iter().map(|color| (color, 0.5)).collect();
        if light == dark {
            return Ok(even);
        }

        let shift: i32 = light.min(dark).min(0).abs();
        let (light, dark): (f64, f64) = (f64::from(light + shift), f64::from(dark + shift));
        let total: f64 = light + dark;
        if total == 0.0 {
            return Ok(even);
        }
        Ok(BTreeMap::from([(Color::Light, light / total), (Color::Dark, dark / total)]))
    }

    /// Finds the origin and destination a notation string means for the side on turn.
    pub fn resolve_notation(&self, id: &str, text: &str) -> EngineResult<(Coordinate, Coordinate)> {
        let state: &GameState = self.game(id)?;
        let record: MoveRecord = notation::parse_notation(text)
            .ok_or_else(|| EngineError::Notation(format!("cannot read '{text}'")))?;
        let color: Color = state.current_player;

        let step: Option<i32> = match record.special {
            SpecialMove::KingSideCastle => Some(king::CASTLE_KING_STEP),
            SpecialMove::QueenSideCastle => Some(-king::CASTLE_KING_STEP),
            _ => None,
        };
        if let Some(step) = step {
            let (king_at, _) = state
                .board
                .king_of(color)
                .ok_or_else(|| EngineError::NotFound(format!("{color} has no King to castle with")))?;
            return Ok((king_at, king_at + Coordinate::new(0, step)));
        }

        let mover = record
            .mover()
            .ok_or_else(|| EngineError::Notation(format!("'{text}' names no piece")))?;
        let to: Coordinate = record
            .destination()
            .ok_or_else(|| EngineError::Notation(format!("'{text}' names no destination")))?;

        let candidates: Vec<Coordinate> = state
            .board
            .pieces_of(color, Some(mover.kind))
            .into_iter()
            .map(|(at, _)| at)
            .filter(|at| record.disambiguation.map_or(true, |hint| hint.admits(*at)))
            .filter(|at| {
                possible_moves::possible_destinations(&state.board, *at)
                    .map(|destinations| destinations.contains(&to))
                    .unwrap_or(false)
            })
            .collect();

        let from: Coordinate = match candidates.as_slice() {
            [from] => *from,
            [] => return Err(EngineError::IllegalMove(format!("no {color} {} can play '{text}'", mover.kind))),
            _ => {
                return Err(EngineError::Notation(format!(
                    "'{text}' fits {} {color} pieces",
                    candidates.len()
                )))
            }
        };

        // The markers must describe the move that would actually be played.
        let takes: bool = state
            .board
            .occupant_at(to)
            .map_or(false, |target| target.color != color);
        if record.captured().is_some() && !takes {
            return Err(EngineError::Notation(format!("'{text}' marks a capture but {to} holds no opposing piece")));
        }
        if record.promotion().is_some() && to.row != Board::promotion_row(color) {
            return Err(EngineError::Notation(format!("'{text}' promotes short of the last row")));
        }
        Ok((from, to))
    }

    /// Resolves `text` and applies it. A promotion letter overrides the configured kind.
    pub fn request_notation_move(&mut self, id: &str, text: &str) -> MoveOutcome {
        let (from, to): (Coordinate, Coordinate) = match self.resolve_notation(id, text) {
            Ok(squares) => squares,
            Err(err) => {
                info!("game '{id}': rejected '{text}': {err}");
                return MoveOutcome::rejected(Vec::new(), &err);
            }
        };
        let promotion: Option<PieceKind> = notation::parse_notation(text).and_then(|record| record.promotion());
        self.outcome(id, from, to, promotion)
    }

    /// Stops a game early. Its state stays readable.
    pub fn end_game(&mut self, id: &str) -> EngineResult<GameStateView> {
        let state: &mut GameState = self.game_mut(id)?;
        state.phase = Phase::Ended;
        state.pending = None;
        info!("game '{id}' ended by request");
        Ok(state.view())
    }

    pub fn remove_game(&mut self, id: &str) -> EngineResult<GameState> {
        self.games
            .remove(id)
            .ok_or_else(|| EngineError::NotFound(format!("no game with id '{id}'")))
    }

    pub fn game_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.games.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn snapshot(&self, id: &str) -> EngineResult<GameStateView> {
        Ok(self.game(id)?.view())
    }
}

fn seed(state: &mut GameState, placements: &[(Color, PieceKind, Coordinate)]) -> EngineResult<()> {
    for &(color, kind, at) in placements {
        state.board.add_piece(color, kind, at)?;
    }
    state.phase = Phase::InProgress;
    state.current_player = Color::ALL[0];
    Ok(())
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("games", &self.game_ids())
            .field("events", &self.events)
            .finish()
    }
}
