//! Plain styled output for messages, suggestions and session status.
//!
//! Everything writes to a caller-supplied `Write` so the interactive loop
//! can print above the readline prompt through its `SharedWriter`.

use std::io::{self, Write};

use adchat_core::chat::session::SessionSnapshot;
use adchat_types::chat::{ChatMessage, Sender};
use console::style;

/// Print the banner shown when a conversation opens.
pub fn print_banner(w: &mut impl Write, subject: &str, base_url: &str) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "  * {}", style(format!("Ad assistant for {subject}")).cyan().bold())?;
    writeln!(w, "  {}  {}", style("Backend:").bold(), style(base_url).dim())?;
    writeln!(w)?;
    writeln!(w, "  {}", style("Type /help for commands, Ctrl+D to exit").dim())?;
    writeln!(w, "  {}", style("---").dim())?;
    writeln!(w)
}

/// Print one message with its sender label.
pub fn write_message(w: &mut impl Write, message: &ChatMessage) -> io::Result<()> {
    let label = match message.sender() {
        Sender::User => style("You").green().bold(),
        Sender::Assistant => style("Assistant").cyan().bold(),
    };
    let text = if message.is_pending() {
        style(message.text()).dim().italic().to_string()
    } else {
        message.text().to_string()
    };

    let mut lines = text.lines();
    writeln!(w, "  {label} {}", lines.next().unwrap_or(""))?;
    for line in lines {
        writeln!(w, "      {line}")?;
    }
    writeln!(w)
}

/// Print a message to stdout (non-interactive commands).
pub fn print_message(message: &ChatMessage) {
    let _ = write_message(&mut io::stdout(), message);
}

/// Print the numbered follow-up suggestions, if any.
pub fn print_suggestions(w: &mut impl Write, suggestions: &[String]) -> io::Result<()> {
    if suggestions.is_empty() {
        return Ok(());
    }
    writeln!(w, "  {}", style("Suggested questions:").bold())?;
    for (i, suggestion) in suggestions.iter().enumerate() {
        writeln!(w, "    {} {}", style(format!("[{}]", i + 1)).cyan(), suggestion)?;
    }
    writeln!(w)
}

/// Print remaining quota, and the hand-off hint once it is used up.
pub fn print_quota(w: &mut impl Write, snapshot: &SessionSnapshot) -> io::Result<()> {
    if snapshot.exhausted {
        writeln!(
            w,
            "  {} You've used all your questions for this ad. Type {} to ask a human expert.",
            style("!").yellow().bold(),
            style("/expert").cyan()
        )?;
        return writeln!(w);
    }
    if let (Some(count), Some(limit)) = (snapshot.ask_count, snapshot.ask_limit) {
        writeln!(
            w,
            "  {}",
            style(format!("{} of {limit} questions left", limit.saturating_sub(count))).dim()
        )?;
        writeln!(w)?;
    }
    Ok(())
}

/// Print the help text listing all available commands.
pub fn print_help(w: &mut impl Write) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "  {}", style("Available commands:").bold())?;
    writeln!(w)?;
    for (cmd, help) in [
        ("/help", "Show this help message"),
        ("/suggest N", "Ask suggestion number N (or just type N)"),
        ("/history", "Show the whole conversation again"),
        ("/reset", "Close and reopen the conversation"),
        ("/expert", "Ask a human expert (after the question limit)"),
        ("/exit", "Leave the conversation"),
    ] {
        writeln!(w, "  {:<12} {}", style(cmd).cyan(), help)?;
    }
    writeln!(w)
}
