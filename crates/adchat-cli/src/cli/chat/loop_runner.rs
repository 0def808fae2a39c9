//! Main chat loop orchestration.
//!
//! Opens a `ChatSession` for one ad, bootstraps it, then reads questions
//! until the user leaves. Output goes through the readline `SharedWriter`.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use adchat_core::chat::session::ChatSession;
use adchat_core::chat::turn::{SkipReason, TurnOutcome};
use adchat_infra::http::HttpAssistantBackend;
use adchat_types::subject::SubjectId;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::state::AppState;

use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::render;

type Session = ChatSession<HttpAssistantBackend>;

/// Run a future while showing a spinner.
async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let output = fut.await;
    spinner.finish_and_clear();
    output
}

/// Print messages not shown yet, then suggestions and quota status.
///
/// Returns the number of messages now on screen.
async fn print_update(session: &Session, out: &mut impl Write, shown: usize) -> anyhow::Result<usize> {
    let snapshot = session.snapshot().await;
    for message in snapshot.messages.iter().skip(shown) {
        render::write_message(out, message)?;
    }
    render::print_suggestions(out, &snapshot.suggestions)?;
    render::print_quota(out, &snapshot)?;
    Ok(snapshot.messages.len())
}

async fn activate(session: &Session, out: &mut impl Write) -> anyhow::Result<usize> {
    let outcome = with_spinner("Connecting...", session.activate()).await;
    info!(subject_id = %session.subject(), ?outcome, "Conversation opened");
    print_update(session, out, 0).await
}

fn report_skip(out: &mut impl Write, reason: SkipReason) -> std::io::Result<()> {
    let note = match reason {
        SkipReason::EmptyQuestion => return Ok(()),
        SkipReason::TurnInFlight => "Still waiting for the previous answer.",
        SkipReason::QuotaExhausted => "No questions left for this ad. Type /expert to ask a human.",
        SkipReason::NotActivated => "The conversation is not open yet.",
        SkipReason::UnknownSuggestion => "There is no suggestion with that number.",
    };
    writeln!(out, "\n  {} {note}\n", style("!").yellow().bold())
}

/// Run the interactive chat loop for one ad.
pub async fn run_chat_loop(state: &AppState, subject: SubjectId) -> anyhow::Result<()> {
    let session = ChatSession::new(subject, state.backend()?, state.config.clone());

    let (mut input, mut out) =
        ChatInput::new().map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    render::print_banner(&mut out, session.subject().as_str(), &state.config.base_url)?;
    debug!(data_dir = %state.data_dir.display(), "Using data directory");

    let mut shown = activate(&session, &mut out).await?;

    loop {
        input.set_exhausted(session.is_exhausted().await);

        let text = match input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                writeln!(out, "\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim())?;
                continue;
            }
            InputEvent::Line(text) if text.is_empty() => continue,
            InputEvent::Line(text) => text,
        };

        let outcome = match commands::parse(&text) {
            Some(ChatCommand::Help) => {
                render::print_help(&mut out)?;
                continue;
            }
            Some(ChatCommand::History) => {
                writeln!(out)?;
                shown = print_update(&session, &mut out, 0).await?;
                continue;
            }
            Some(ChatCommand::Reset) => {
                session.reset().await;
                writeln!(out, "\n  {}\n", style("Conversation reopened.").dim())?;
                shown = activate(&session, &mut out).await?;
                continue;
            }
            Some(ChatCommand::Expert) => {
                if session.complete_handoff().await {
                    shown = print_update(&session, &mut out, shown).await?;
                } else if session.is_exhausted().await {
                    writeln!(
                        out,
                        "\n  {} Your expert request was already sent.\n",
                        style("*").cyan().bold()
                    )?;
                } else {
                    writeln!(
                        out,
                        "\n  {} You still have questions left; the expert hand-off opens once they are used up.\n",
                        style("*").cyan().bold()
                    )?;
                }
                continue;
            }
            Some(ChatCommand::Exit) => break,
            Some(ChatCommand::Unknown(what)) => {
                writeln!(
                    out,
                    "\n  {} Unknown command: {}. Type /help for available commands.\n",
                    style("?").yellow().bold(),
                    style(what).dim()
                )?;
                continue;
            }
            Some(ChatCommand::Suggest(n)) => {
                with_spinner(&state.config.thinking_text, session.select_suggestion(n - 1)).await
            }
            None => with_spinner(&state.config.thinking_text, session.submit(&text)).await,
        };

        debug!(?outcome, "Turn finished");
        match outcome {
            TurnOutcome::Skipped(reason) => report_skip(&mut out, reason)?,
            _ => {
                writeln!(out)?;
                shown = print_update(&session, &mut out, shown).await?;
            }
        }
    }

    writeln!(out, "\n  {}", style("Conversation closed.").dim())?;
    input.flush();
    Ok(())
}
