use std::{fs::File, path::{Path, PathBuf}, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use term_snake::config::{DEFAULT_HEIGHT, DEFAULT_SNAKE_LENGTH, DEFAULT_TICK_MS, DEFAULT_WIDTH};
use term_snake::game::SnakeGame;
use term_snake::{GameConfig, TermInt};

#[derive(Parser, Debug)]
#[command(name = "term-snake", about = "Play Snake in the terminal")]
struct Args {
    /// Board width in cells (10-50)
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: TermInt,

    /// Board height in cells (10-50)
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: TermInt,

    /// Initial snake length
    #[arg(long, default_value_t = DEFAULT_SNAKE_LENGTH)]
    length: usize,

    /// Delay between moves, in milliseconds
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal itself is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl From<&Args> for GameConfig {
    fn from(args: &Args) -> Self {
        GameConfig {
            width: args.width,
            height: args.height,
            initial_length: args.length,
            tick: Duration::from_millis(args.tick_ms),
            seed: args.seed,
        }
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = GameConfig::from(&args);
    config.validate().context("Invalid game settings")?;

    let mut game = SnakeGame::new(config)?;
    game.initialize()?;

    // The terminal has to be restored even when the game loop fails
    let res = game.run();
    game.restore()?;

    if let Some(summary) = res? {
        println!("{}", summary);
    }
    println!("Thanks for playing!");

    Ok(())
}
