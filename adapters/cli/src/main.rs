#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Race experience.

mod config;
mod fixtures;
mod share;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use maze_race_core::START_POS;
use maze_race_rendering::{
    Color, PlayerPresentation, Presentation, RenderingBackend, Scene, DEFAULT_PLAYER_COLOR,
};
use maze_race_rendering_macroquad::MacroquadBackend;

use crate::config::CliConfig;
use crate::share::MazeShareSnapshot;

/// Solid colour every frame clears to.
const BACKGROUND: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Command-line surface of the Maze Race binary.
#[derive(Debug, Parser)]
#[command(name = "maze-race", about = "Renders and animates mazes in a window")]
struct Cli {
    /// Path to an optional TOML configuration file.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Modes the binary can boot into.
#[derive(Debug, Subcommand)]
enum Command {
    /// Opens the live-play window with a maze and a player avatar.
    Play {
        /// Share code of the maze to load; uses the built-in maze when omitted.
        #[arg(long, value_name = "CODE")]
        share: Option<String>,
    },
    /// Replays the maze being carved open, one passage per frame.
    Demo,
}

/// Entry point for the Maze Race command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Play { share } => play(&config, share),
        Command::Demo => demo(&config),
    }
}

fn play(config: &CliConfig, share: Option<String>) -> Result<()> {
    let grid = match share {
        Some(code) => MazeShareSnapshot::decode(&code)?.grid,
        None => fixtures::demo_maze(),
    };
    let snapshot = MazeShareSnapshot { grid };
    info!("maze share code: {}", snapshot.encode());

    let scene = Scene::new(
        snapshot.grid,
        vec![PlayerPresentation::new(START_POS, DEFAULT_PLAYER_COLOR)],
        None,
    );
    let presentation = Presentation::new(config.window_title.clone(), BACKGROUND, scene);
    let backend = MacroquadBackend::new()
        .with_vsync(config.vsync)
        .with_show_fps(config.show_fps);

    // Movement and state synchronisation collaborators plug in here; until
    // one mutates the scene, the avatar waits at the start position.
    backend.run(presentation, |_frame_dt, _scene| {})
}

fn demo(config: &CliConfig) -> Result<()> {
    let snapshots = fixtures::carve_sequence();
    info!("replaying {} carve snapshots", snapshots.len());

    let backend = MacroquadBackend::new().with_vsync(config.vsync);
    backend.run_playback(
        config.window_title.clone(),
        BACKGROUND,
        snapshots,
        config.frame_delay(),
    )
}
