//! Console "find your hat" game.
//!
//! Walk a random field one step at a time, find the hat (`^`) and stay out of the
//! holes (`O`). In hard mode a new hole opens every three moves.
use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use hatfield_core::Difficulty;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use config::Settings;
use game::Game;

mod config;
mod game;

#[derive(Parser)]
#[command(name = "hatfield")]
#[command(about = "Find your hat without falling into a hole")]
#[command(version)]
struct Cli {
    /// Configuration file path (defaults to ./hatfield.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of field rows
    #[arg(long)]
    rows: Option<u8>,

    /// Number of field columns
    #[arg(long)]
    columns: Option<u8>,

    /// Share of free cells turned into holes, 0-100
    #[arg(long)]
    hazard_percent: Option<u8>,

    /// Play every game at this difficulty (easy/hard) instead of asking
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Seed the random source for reproducible fields
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(rows) = self.rows {
            settings.field.rows = rows;
        }
        if let Some(columns) = self.columns {
            settings.field.columns = columns;
        }
        if let Some(hazard_percent) = self.hazard_percent {
            settings.field.hazard_percent = hazard_percent;
        }
        if self.difficulty.is_some() {
            settings.game.difficulty = self.difficulty;
        }
        if self.seed.is_some() {
            settings.game.seed = self.seed;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let mut settings = Settings::load(cli.config.as_deref())?;
    cli.apply(&mut settings);
    let field_config = settings.field_config()?;

    let rng = match settings.game.seed {
        Some(seed) => {
            log::info!("Using fixed seed {}", seed);
            SmallRng::seed_from_u64(seed)
        }
        None => SmallRng::from_rng(&mut rand::rng()),
    };

    let stdin = io::stdin();
    let mut game = Game::new(
        stdin.lock(),
        io::stdout().lock(),
        field_config,
        settings.game.difficulty,
        rng,
    );
    game.run()
}
