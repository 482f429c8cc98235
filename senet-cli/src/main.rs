//! Senet CLI - Command-line interface
//!
//! Commands:
//! - play: Play a game on the terminal
//! - match: Pit two computer difficulties against each other
//! - throws: Sample the stick-throw distribution

mod config;
mod match_cmd;
mod play_cmd;
mod render;
mod throws_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::SessionConfig;

#[derive(Parser)]
#[command(name = "senet")]
#[command(about = "Senet on the 30-house track")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Random seed for reproducible throws
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// JSON session config file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game on the terminal
    Play(play_cmd::PlayArgs),
    /// Pit two computer difficulties against each other
    Match(match_cmd::MatchArgs),
    /// Sample the stick-throw distribution
    Throws(throws_cmd::ThrowsArgs),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    }
    .with_seed(cli.seed);

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, config),
        Commands::Match(args) => match_cmd::run(args, config),
        Commands::Throws(args) => throws_cmd::run(args, config),
    }
}
