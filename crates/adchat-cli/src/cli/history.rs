//! `adchat history` -- replay the stored conversation for an ad.

use adchat_core::backend::AssistantBackend;
use adchat_core::chat::log_adapter::{self, LogReplay};
use adchat_types::subject::SubjectId;
use console::style;

use crate::state::AppState;

use super::chat::render;

/// Fetch and print the persisted log without asking the assistant anything.
pub async fn show_history(state: &AppState, subject: &SubjectId, json: bool) -> anyhow::Result<()> {
    let backend = state.backend()?;
    let payload = backend.fetch_history(subject).await?;
    let replay = log_adapter::replay(&payload);

    match (replay, json) {
        (LogReplay::History { messages, ask_count }, true) => {
            let out = serde_json::json!({
                "subject": subject,
                "ask_count": ask_count,
                "messages": messages,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        (LogReplay::Empty, true) => {
            let out = serde_json::json!({
                "subject": subject,
                "ask_count": 0,
                "messages": [],
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        (LogReplay::History { messages, ask_count }, false) => {
            println!();
            for message in &messages {
                render::print_message(message);
            }
            println!(
                "  {}",
                style(format!("{ask_count} question(s) asked")).dim()
            );
            println!();
        }
        (LogReplay::Empty, false) => {
            println!(
                "\n  {} No conversation stored for ad {}.\n",
                style("*").cyan().bold(),
                style(subject).bold()
            );
        }
    }

    Ok(())
}
