//! CLI interface for tickflow
//!
//! Provides subcommands for:
//! - `run`: Replay the configured tick history through the strategy
//! - `config`: Show the effective configuration

mod run;

pub use run::RunArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tickflow")]
#[command(about = "Streaming tick-replay engine for strategy backtesting")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay tick history through the strategy
    Run(RunArgs),
    /// Show the effective configuration
    Config,
}
