use board_rules_engine::board::piece::PieceState;
use board_rules_engine::parsers::layout::LayoutBook;
use board_rules_engine::{
    parse_notation, Color, Coordinate, EngineConfig, ErrorKind, GameEvent, GameStateView, Orchestrator, Phase,
    PieceKind,
    SpecialMove,
};
use std::cell::RefCell;
use std::rc::Rc;

fn c(row: i32, col: i32) -> Coordinate {
    Coordinate::new(row, col)
}

fn engine_on(name: &str, rows: &[&str]) -> Orchestrator {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut book = LayoutBook::builtin();
    book.insert_grid(name, rows).unwrap();
    let config = EngineConfig {
        board_type: name.to_string(),
        ..EngineConfig::default()
    };
    Orchestrator::with_layouts(config, Box::new(book)).unwrap()
}

#[test]
fn test_rook_captures_pawn() {
    let mut engine = engine_on("rook-vs-pawn", &["LR .. .. .. .. DP .. .."]);
    engine.start_game("g1").unwrap();

    let outcome = engine.request_move("g1", c(0, 0), c(0, 5));
    assert!(outcome.ok, "{}", outcome.message);
    assert_eq!(outcome.attempted, vec![c(0, 0), c(0, 5)]);

    let view = engine.snapshot("g1").unwrap();
    assert_eq!(view.piece_at(c(0, 5)).unwrap().kind, PieceKind::Rook);
    assert!(view.piece_at(c(0, 0)).is_none());
    assert_eq!(view.captured.len(), 1);
    assert_eq!(view.captured[0].kind, PieceKind::Pawn);
    assert_eq!(view.captured[0].state, PieceState::Captured);
    // Scores settle on advance_turn, not on the move itself.
    assert_eq!(view.scores[&Color::Light], 0);

    engine.advance_turn("g1").unwrap();
    let view = engine.snapshot("g1").unwrap();
    assert_eq!(view.scores[&Color::Light], PieceKind::Pawn.value());
    assert_eq!(view.scores[&Color::Dark], -PieceKind::Pawn.value());
    // Dark has nothing left to move.
    assert_eq!(view.phase, Phase::Ended);
}

#[test]
fn test_castling_king_side() {
    let mut engine = engine_on("castle", &[".. .. .. .. LK .. .. LR"]);
    engine.start_game("g1").unwrap();

    let info = engine.can_castle("g1", Color::Light).unwrap();
    assert!(info.available);
    assert!(info.king_side);
    assert!(!info.queen_side);
    assert_eq!(info.king_side_target, Some(c(0, 6)));

    let outcome = engine.request_move("g1", c(0, 4), c(0, 6));
    assert!(outcome.ok, "{}", outcome.message);
    let record = outcome.record.unwrap();
    assert_eq!(record.special, SpecialMove::KingSideCastle);
    assert_eq!(record.pieces.len(), 2);

    let view = engine.snapshot("g1").unwrap();
    assert_eq!(view.piece_at(c(0, 6)).unwrap().kind, PieceKind::King);
    assert_eq!(view.piece_at(c(0, 5)).unwrap().kind, PieceKind::Rook);
    assert!(view.piece_at(c(0, 7)).is_none());
    assert!(!engine.can_castle("g1", Color::Light).unwrap().available);
}

#[test]
fn test_castling_blocked_side() {
    let mut engine = engine_on("blocked", &["LR .. LB .. LK .. .. LR"]);
    engine.start_game("g1").unwrap();

    let info = engine.can_castle("g1", Color::Light).unwrap();
    assert!(info.king_side);
    assert!(!info.queen_side);

    let outcome = engine.request_move("g1", c(0, 4), c(0, 2));
    assert!(!outcome.ok);
    let view = engine.snapshot("g1").unwrap();
    assert_eq!(view.piece_at(c(0, 4)).unwrap().kind, PieceKind::King);
    assert_eq!(view.piece_at(c(0, 0)).unwrap().kind, PieceKind::Rook);
}

#[test]
fn test_parse_castle_token() {
    let record = parse_notation("O-O").unwrap();
    assert_eq!(record.special, SpecialMove::KingSideCastle);
    let kinds: Vec<PieceKind> = record.pieces.iter().map(|piece| piece.kind).collect();
    assert!(kinds.contains(&PieceKind::King));
    assert!(kinds.contains(&PieceKind::Rook));
}

#[test]
fn test_move_from_empty_cell() {
    let mut engine = Orchestrator::new(EngineConfig::default()).unwrap();
    engine.start_game("g1").unwrap();

    let outcome = engine.request_move("g1", c(3, 3), c(4, 3));
    assert!(!outcome.ok);
    assert_eq!(outcome.error, Some(ErrorKind::NotFound));
    assert!(!outcome.message.is_empty());
}

#[test]
fn test_notation_round_trip() {
    let mut engine = Orchestrator::new(EngineConfig::default()).unwrap();
    engine.start_game("g1").unwrap();

    let record = parse_notation("Nf3").unwrap();
    let to = record.destination().unwrap();
    assert_eq!(to, c(2, 5));
    let outcome = engine.request_move("g1", c(0, 6), to);
    assert!(outcome.ok, "{}", outcome.message);
    assert_eq!(outcome.record.unwrap().notation, "Nf3");
}

#[test]
fn test_knight_and_rook_destinations() {
    let mut engine = Orchestrator::new(EngineConfig::default()).unwrap();
    engine.start_game("g1").unwrap();

    let knight: Vec<Coordinate> = engine
        .possible_destinations("g1", c(0, 1))
        .unwrap()
        .iter()
        .filter_map(|record| record.destination())
        .collect();
    assert_eq!(knight, vec![c(2, 0), c(2, 2)]);

    // Boxed in by its own pieces.
    assert!(engine.possible_destinations("g1", c(0, 0)).unwrap().is_empty());
}

#[test]
fn test_event_order() {
    let seen: Rc<RefCell<Vec<(GameEvent, Color)>>> = Rc::new(RefCell::new(Vec::new()));
    let mut engine = Orchestrator::new(EngineConfig::default()).unwrap();
    for event in [GameEvent::StartGame, GameEvent::PieceMoved, GameEvent::SuccessfulTurn] {
        let log = Rc::clone(&seen);
        engine.subscribe(
            event,
            Box::new(move |event: GameEvent, view: &GameStateView| {
                log.borrow_mut().push((event, view.current_player))
            }),
        );
    }

    engine.start_game("g1").unwrap();
    assert!(engine.request_move("g1", c(1, 4), c(3, 4)).ok);
    engine.advance_turn("g1").unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            (GameEvent::StartGame, Color::Light),
            (GameEvent::PieceMoved, Color::Light),
            (GameEvent::SuccessfulTurn, Color::Dark),
        ]
    );
}

#[test]
fn test_win_percentage_sums_to_one() {
    let mut engine = engine_on(
        "trade",
        &[
            "LR .. .. .. LK .. .. ..",
            ".. .. .. .. .. .. .. ..",
            ".. .. .. .. .. .. .. ..",
            ".. .. .. .. .. .. .. ..",
            "DN .. .. .. .. .. .. ..",
            ".. .. .. .. .. .. .. ..",
            ".. .. .. .. .. .. .. ..",
            ".. .. .. .. DK .. .. ..",
        ],
    );
    engine.start_game("g1").unwrap();
    let even = engine.win_percentage("g1").unwrap();
    assert_eq!(even[&Color::Light], 0.5);
    assert_eq!(even[&Color::Dark], 0.5);

    assert!(engine.request_move("g1", c(0, 0), c(4, 0)).ok);
    engine.advance_turn("g1").unwrap();
    let odds = engine.win_percentage("g1").unwrap();
    let total: f64 = odds.values().sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert!(odds[&Color::Light] > odds[&Color::Dark]);
}
