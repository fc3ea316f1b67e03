use std::fs;

use clap::{Args, Parser, Subcommand};
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use lib_tetris::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "tetris-agent")]
struct Cli {
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Runs one headless game to completion (or a move budget).
    Play(PlayOptions),
    /// Runs the genetic weight-training loop.
    Train(TrainOptions),
}

#[derive(Args, Debug)]
struct PlayOptions {
    /// Path to a shape description file; falls back to the built-in 7 tetrominoes.
    #[arg(long)]
    shape_file: Option<String>,

    /// Path to a weights file; falls back to a hand-picked default.
    #[arg(long)]
    weights_file: Option<String>,

    /// RNG seed for the piece stream.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Move budget for the game.
    #[arg(long, default_value_t = 10_000)]
    max_pieces: u64,

    /// Enables one-ply lookahead against the peeked next piece.
    #[arg(long, default_value_t = false)]
    lookahead: bool,
}

/// A hand-picked default weight vector (heavily penalizes height and holes),
/// used when no weights file is given.
const DEFAULT_WEIGHTS: [f64; 7] = [-1.0, -1.0, -1.0, -5.0, -2.0, -1.0, -2.0];

fn main() -> Result<()> {
    // Loaded only if a .env file is present; defaults are fine without one.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _logger = Logger::try_with_env_or_str(cli.log_level.clone().unwrap_or("info".into()).as_str())?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(match cfg!(debug_assertions) {
            true => AdaptiveFormat::WithThread,
            _ => AdaptiveFormat::Default,
        })
        .start()?;

    let result = match &cli.command {
        Command::Play(options) => play(options),
        Command::Train(options) => run_training(options),
    };

    if let Err(ref e) = result {
        log::error!("fatal error: {e}");
    }
    result
}

/// Loads a shape description file, or aborts the process on a read or parse
/// failure. Per §7, a malformed shape file is fatal at init (the agent has no
/// usable piece geometry to fall back to), unlike a malformed weights file,
/// which is a recoverable, reported error.
fn load_shape_table_or_die(path: &str) -> ShapeTable {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        log::error!("failed to read shape file {path}: {e}");
        std::process::exit(1);
    });
    ShapeTable::from_text(&text).unwrap_or_else(|e| {
        log::error!("malformed shape file {path}: {e:#}");
        std::process::exit(1);
    })
}

fn play(options: &PlayOptions) -> Result<()> {
    let shapes = match &options.shape_file {
        Some(path) => load_shape_table_or_die(path),
        None => ShapeTable::standard(),
    };

    let weights = match &options.weights_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read weights file {path}"))?;
            text.parse::<Weights>()
                .with_context(|| format!("malformed weights file {path}"))?
        }
        None => Weights::new(DEFAULT_WEIGHTS),
    };

    let mut stream = BagStream::new(options.seed);
    let mut session = Session::new(10, 20, &shapes, weights, options.lookahead);
    let stats = session.run(&mut stream, options.max_pieces);

    log::info!(
        "game over: {} pieces placed, {} lines cleared",
        stats.pieces_placed,
        stats.lines_cleared
    );
    println!("pieces_placed={} lines_cleared={}", stats.pieces_placed, stats.lines_cleared);
    Ok(())
}

fn run_training(options: &TrainOptions) -> Result<()> {
    let best = train(options);
    fs::write(&options.output, best.to_string())
        .with_context(|| format!("failed to write weights file {}", options.output))?;
    log::info!("wrote fittest weights to {}", options.output);
    Ok(())
}
