//! adchat CLI entry point.
//!
//! Binary name: `adchat`
//!
//! Parses CLI arguments, initializes tracing and configuration, then
//! dispatches to the requested command.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use adchat_observe::tracing_setup::{filter_for, init_tracing, shutdown_tracing};
use adchat_types::subject::SubjectId;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(filter_for(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "adchat", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(&cli).await?;

    let result = match &cli.command {
        Commands::Chat { subject } => {
            let subject: SubjectId = subject.parse().map_err(anyhow::Error::msg)?;
            cli::chat::loop_runner::run_chat_loop(&state, subject).await
        }
        Commands::History { subject } => {
            let subject: SubjectId = subject.parse().map_err(anyhow::Error::msg)?;
            cli::history::show_history(&state, &subject, cli.json).await
        }
        Commands::Completions { .. } => Ok(()),
    };

    shutdown_tracing();
    result
}
