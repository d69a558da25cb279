//! chess-play - play chess in the terminal against yourself.
//!
//! Reads commands from stdin and prints the board after every change. Boards
//! from 8x8 up to 26x26 are supported; setup presets can pre-position pieces.

mod command;
mod config;
mod render;
mod session;

use anyhow::Context;
use chess_rules::Game;
use clap::Parser;
use config::PlayConfig;
use session::Session;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Play chess in the terminal")]
struct Args {
    /// Board edge length (8-26)
    #[arg(long, default_value = "8")]
    size: u8,

    /// Setup preset to apply before the first move
    #[arg(long)]
    setup: Option<String>,

    /// Path to a TOML file with extra setup presets
    #[arg(long, default_value_os_t = PlayConfig::default_path())]
    presets: PathBuf,

    /// Draw pieces with chess glyphs instead of letters
    #[arg(long)]
    unicode: bool,

    /// List available presets and exit
    #[arg(long)]
    list_presets: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let config = PlayConfig::load(&args.presets)
        .with_context(|| format!("loading presets from {:?}", args.presets))?;
    if args.list_presets {
        for name in config.preset_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut game = Game::with_size(args.size)?;
    tracing::info!("New {}x{} game", args.size, args.size);
    if let Some(name) = &args.setup {
        let preset = config.preset(name)?;
        game.apply_setup(&preset.directives)
            .with_context(|| format!("applying preset {name}"))?;
        tracing::info!("Applied preset {}", name);
    }

    let mut session = Session::new(game, args.unicode);
    session.run(io::stdin().lock(), &mut io::stdout().lock())?;
    tracing::info!("Session ended: {}", render::status(session.game()));
    Ok(())
}
