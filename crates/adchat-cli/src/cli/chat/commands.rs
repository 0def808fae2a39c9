//! Slash command parsing for the chat loop.

/// Input that controls the loop instead of being asked as a question.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    /// Ask a suggestion by its 1-based number.
    Suggest(usize),
    History,
    Reset,
    /// Submit the human-expert request once the quota is used up.
    Expert,
    Exit,
    Unknown(String),
}

/// Parse user input as a command.
///
/// A bare positive number picks a suggestion. Returns `None` for anything
/// that should be sent as a question.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if let Ok(n) = trimmed.parse::<usize>() {
        return Some(suggestion(n));
    }
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/suggest" | "/s" => match arg.parse::<usize>() {
            Ok(n) => suggestion(n),
            Err(_) => ChatCommand::Unknown("/suggest requires a number".to_string()),
        },
        "/history" => ChatCommand::History,
        "/reset" | "/new" => ChatCommand::Reset,
        "/expert" => ChatCommand::Expert,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        other => ChatCommand::Unknown(other.to_string()),
    };
    Some(command)
}

fn suggestion(n: usize) -> ChatCommand {
    if n == 0 {
        ChatCommand::Unknown("suggestions are numbered from 1".to_string())
    } else {
        ChatCommand::Suggest(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(parse("Is my headline too long?"), None);
        assert_eq!(parse("2 more things"), None);
    }

    #[test]
    fn test_numbers_pick_suggestions() {
        assert_eq!(parse("2"), Some(ChatCommand::Suggest(2)));
        assert_eq!(parse("/suggest 3"), Some(ChatCommand::Suggest(3)));
        assert!(matches!(parse("0"), Some(ChatCommand::Unknown(_))));
        assert!(matches!(parse("/suggest x"), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(parse("/HELP"), Some(ChatCommand::Help));
        assert_eq!(parse("/history"), Some(ChatCommand::History));
        assert_eq!(parse("/new"), Some(ChatCommand::Reset));
        assert_eq!(parse("/expert"), Some(ChatCommand::Expert));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
        assert_eq!(
            parse("/dance"),
            Some(ChatCommand::Unknown("/dance".to_string()))
        );
    }
}
