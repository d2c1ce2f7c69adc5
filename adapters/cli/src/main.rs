#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays scripted input on a Gridwalk level.

mod config;
mod script;

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use gridwalk_core::Pose;
use gridwalk_system_movement::Movement;
use gridwalk_world::{self as world, query, Level, Player};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

use crate::config::Config;

/// Walks a player through a level following a scripted key sequence.
#[derive(Debug, Parser)]
#[command(name = "gridwalk", version)]
struct Cli {
    /// Level file: a wall plane, optionally followed by an object plane.
    #[arg(long)]
    map: PathBuf,
    /// TOML file overriding the map layout and movement speeds.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start pose as `x,y,dx,dy`. Defaults to the level's spawn marker.
    #[arg(long, value_parser = parse_start, allow_hyphen_values = true)]
    start: Option<Pose>,
    /// Whitespace separated ticks, e.g. `w*20 qw*5 . d`.
    #[arg(long, default_value = "")]
    script: String,
    /// Log every movement event.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Gridwalk command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let bytes = fs::read(&cli.map)
        .with_context(|| format!("failed to read level at {}", cli.map.display()))?;
    let level = Level::from_bytes(&bytes, config.map)
        .with_context(|| format!("failed to load level at {}", cli.map.display()))?;

    let Some(start) = cli.start.or_else(|| level.spawn()) else {
        bail!(
            "level {} has no spawn marker; pass --start x,y,dx,dy",
            cli.map.display()
        );
    };
    let inputs = script::parse_script(&cli.script).context("failed to parse --script")?;

    let mut player = Player::from_pose(start).with_tuning(config.movement);
    player.set_map(level.map());
    let mut movement = Movement::new(player.tuning());
    info!(
        x = start.position.x(),
        y = start.position.y(),
        ticks = inputs.len(),
        "starting replay"
    );

    let mut commands = Vec::new();
    let mut events = Vec::new();
    for (tick, input) in inputs.iter().enumerate() {
        commands.clear();
        events.clear();
        movement.handle(input, &mut commands);
        for command in commands.drain(..) {
            world::apply(&mut player, command, &mut events)?;
        }
        for event in &events {
            debug!(tick, ?event, "world event");
        }
    }

    let pose = query::pose(&player);
    info!(cell = ?query::cell_of(&player), "replay finished");
    println!(
        "{:.4} {:.4} {:.4} {:.4}",
        pose.position.x(),
        pose.position.y(),
        pose.facing.dx(),
        pose.facing.dy()
    );
    Ok(())
}

fn parse_start(value: &str) -> Result<Pose, script::ScriptError> {
    script::parse_pose(value)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
