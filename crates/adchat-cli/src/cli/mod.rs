//! CLI command definitions for the `adchat` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod history;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Talk to the ad assistant from your terminal.
#[derive(Parser)]
#[command(name = "adchat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Backend origin, overriding config.toml.
    #[arg(long, global = true, env = "ADCHAT_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds, overriding config.toml.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive conversation about an ad.
    Chat {
        /// Identifier of the ad to discuss.
        subject: String,
    },

    /// Print the stored conversation for an ad without asking anything.
    History {
        /// Identifier of the ad.
        subject: String,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}
