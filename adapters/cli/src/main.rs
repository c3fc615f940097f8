#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Homestead in the terminal.

mod config;
mod game;
mod parse;
mod text;

use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use homestead_rendering::{Presentation, RenderingBackend, Scene, BACKGROUND_COLOR};
use homestead_world::query;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{config::Settings, game::Game, text::TextBackend};

/// Command-line arguments accepted by the Homestead binary.
#[derive(Debug, Parser)]
#[command(name = "homestead", about = "Grow crops on a small tile-based farm")]
struct Args {
    /// TOML file overriding grid size, rest and shop settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read input lines from a file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Only print the final frame.
    #[arg(long)]
    quiet: bool,

    /// Paint the farm with terminal colors.
    #[arg(long)]
    color: bool,

    /// Log engine decisions at debug level.
    #[arg(long, short)]
    verbose: bool,
}

/// Entry point for the Homestead command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    info!(
        width = settings.grid.width(),
        height = settings.grid.height(),
        "starting farm"
    );

    let mut game = Game::new(&settings)?;
    let presentation = Presentation::new(
        query::welcome_banner(game.world()),
        BACKGROUND_COLOR,
        Scene::from_world(game.world()),
    );
    let update = move |input, scene: &mut Scene| game.step(input, scene);

    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script at {}", path.display()))?;
            TextBackend::new(BufReader::new(file), io::stdout(), args.quiet)
                .colored(args.color)
                .run(presentation, update)
        }
        None => TextBackend::new(io::stdin().lock(), io::stdout(), args.quiet)
            .colored(args.color)
            .run(presentation, update),
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "warn,homestead=debug"
    } else {
        "warn,homestead=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
