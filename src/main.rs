use board_rules_engine::game::orchestrator::{MoveOutcome, Orchestrator};
use board_rules_engine::parsers::{
    notation::parse_notation,
    parse_error::ParseError,
    parse_input::{read_and_parse_input, JsonIn, Reason},
    parse_output::ParseOut,
};
use board_rules_engine::{EngineConfig, EngineError, GameStateView, MoveRecord};
use clap::{CommandFactory, Parser};
use env_logger::Env;
use log::{debug, error, info};
use serde_json::json;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "board_engine", version, about = "Board game rules engine")]
struct Cli {
    /// JSON-lines mode: one request per stdin line, one response per stdout line
    #[arg(short, long)]
    cli: bool,

    /// Engine config file (JSON)
    #[arg(long, env = "BOARD_ENGINE_CONFIG")]
    config: Option<PathBuf>,

    /// Layout new games start from, overriding the config
    #[arg(short, long)]
    board_type: Option<String>,

    /// Parse one move in algebraic notation and print it
    #[arg(short, long)]
    parse: Option<String>,
}

enum Step {
    Reply(ParseOut),
    Pong,
    Exit,
}

fn outcome_reply(game: &str, outcome: MoveOutcome, view: GameStateView) -> Result<Step, ParseError> {
    if !outcome.ok {
        return Err(ParseError::from_outcome(&outcome, game));
    }
    let data = json!(outcome);
    Ok(Step::Reply(ParseOut::new(outcome.message, game, Some(view)).with_data(data)))
}

fn parse_reply(game: &str, text: &str) -> Result<ParseOut, ParseError> {
    let record: MoveRecord = parse_notation(text)
        .ok_or_else(|| ParseError::new(&EngineError::Notation(format!("cannot read '{text}'")), Some(game)))?;
    Ok(ParseOut::new(record.notation.clone(), game, None).with_data(json!(record)))
}

/// Serves one request against `engine`.
fn handle(engine: &mut Orchestrator, input: &JsonIn) -> Result<Step, ParseError> {
    let game: &str = input.game.as_str();
    let fail = |e: EngineError| ParseError::new(&e, Some(game));

    let step: Step = match input.reason {
        Reason::Exit => Step::Exit,
        Reason::Ping => Step::Pong,
        Reason::Start => {
            let view: GameStateView = match &input.board_type {
                Some(board_type) => engine.start_game_on(game, board_type),
                None => engine.start_game(game),
            }
            .map_err(fail)?;
            Step::Reply(ParseOut::new("started".into(), game, Some(view)))
        }
        Reason::Reset => {
            let view: GameStateView = engine.reset_game(game).map_err(fail)?;
            Step::Reply(ParseOut::new("reset".into(), game, Some(view)))
        }
        Reason::Move => {
            let from = input.require_from().map_err(fail)?;
            let to = input.require_to().map_err(fail)?;
            let outcome: MoveOutcome = engine.request_move(game, from, to);
            return outcome_reply(game, outcome, engine.snapshot(game).map_err(fail)?);
        }
        Reason::Notation => {
            let outcome: MoveOutcome = engine.request_notation_move(game, &input.notation);
            return outcome_reply(game, outcome, engine.snapshot(game).map_err(fail)?);
        }
        Reason::Destinations => {
            let from = input.require_from().map_err(fail)?;
            let records: Vec<MoveRecord> = engine.possible_destinations(game, from).map_err(fail)?;
            let moves: Vec<String> = records.into_iter().map(|record| record.notation).collect();
            let view: GameStateView = engine.snapshot(game).map_err(fail)?;
            Step::Reply(ParseOut::new("valid".into(), game, Some(view)).with_moves(moves))
        }
        Reason::Advance => {
            let message: String = match engine.advance_turn(game).map_err(fail)? {
                Some(next) => format!("{next} to move"),
                None => "game over".to_string(),
            };
            Step::Reply(ParseOut::new(message, game, Some(engine.snapshot(game).map_err(fail)?)))
        }
        Reason::Odds => {
            let odds = engine.win_percentage(game).map_err(fail)?;
            Step::Reply(ParseOut::new("odds".into(), game, None).with_data(json!(odds)))
        }
        Reason::State => {
            let view: GameStateView = engine.snapshot(game).map_err(fail)?;
            let data = json!(view);
            Step::Reply(ParseOut::new("state".into(), game, Some(view)).with_data(data))
        }
        Reason::Parse => Step::Reply(parse_reply(game, &input.notation)?),
    };
    Ok(step)
}

fn cli(engine: &mut Orchestrator) {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    loop {
        let input: JsonIn = match read_and_parse_input(&mut reader) {
            None => break,
            Some(Ok(input)) => input,
            Some(Err(e)) => {
                ParseError::from(e).print_stderr();
                continue;
            }
        };
        debug!("request {:?} for game '{}'", input.reason, input.game);

        match handle(engine, &input) {
            Ok(Step::Exit) => break,
            Ok(Step::Pong) => println!("pong"),
            Ok(Step::Reply(out)) => out.print_stdout(),
            Err(e) => e.print_stderr(),
        }
    }
}

fn main() -> ExitCode {
    let args: Cli = Cli::parse();
    let loaded = EngineConfig::load(args.config.as_ref());

    // BOARD_ENGINE_LOG wins over the config file's log_level.
    let fallback: &str = loaded.as_ref().map_or("info", EngineConfig::log_filter);
    let env = Env::default().filter_or("BOARD_ENGINE_LOG", fallback);
    env_logger::Builder::from_env(env).init();

    let mut config: EngineConfig = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("cannot load config: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(board_type) = args.board_type {
        config.board_type = board_type;
    }

    if let Some(text) = args.parse {
        return match parse_reply("", &text) {
            Ok(out) => {
                out.print_stdout();
                ExitCode::SUCCESS
            }
            Err(e) => {
                e.print_stderr();
                ExitCode::FAILURE
            }
        };
    }

    if !args.cli {
        if let Err(e) = Cli::command().print_help() {
            error!("cannot print help: {e}");
        }
        return ExitCode::SUCCESS;
    }

    let mut engine: Orchestrator = match Orchestrator::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            error!("cannot build engine: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!("board engine ready, board type '{}'", engine.config().board_type);
    cli(&mut engine);
    ExitCode::SUCCESS
}
