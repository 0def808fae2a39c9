//! Async line input for the chat loop.
//!
//! `rustyline_async` owns the prompt; the prompt text reflects whether the
//! session can still take questions.

use console::style;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

/// What the user did at the prompt.
#[derive(Debug, PartialEq)]
pub enum InputEvent {
    /// A submitted, trimmed line (may be empty).
    Line(String),
    /// Ctrl+D, or the terminal went away.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Create the input handler. The returned writer prints above the prompt.
    pub fn new() -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt_for(false))?;
        Ok((Self { rl }, stdout))
    }

    /// Switch the prompt once the question quota is used up.
    pub fn set_exhausted(&mut self, exhausted: bool) {
        let _ = self.rl.update_prompt(&prompt_for(exhausted));
    }

    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let trimmed = line.trim().to_string();
                if !trimmed.is_empty() {
                    self.rl.add_history_entry(trimmed.clone());
                }
                InputEvent::Line(trimmed)
            }
            Ok(ReadlineEvent::Eof) | Err(_) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
        }
    }

    /// Restore the terminal before exiting.
    pub fn flush(&mut self) {
        let _ = self.rl.flush();
    }
}

fn prompt_for(exhausted: bool) -> String {
    if exhausted {
        format!("  {} ", style("/expert or /exit >").yellow().bold())
    } else {
        format!("  {} ", style("You >").green().bold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_changes_when_exhausted() {
        assert!(prompt_for(false).contains("You >"));
        assert!(prompt_for(true).contains("/expert"));
    }
}
