//! Slash command parsing

/// A line typed at the REPL prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Plain text to send as a message
    Message(String),
    Help,
    Models,
    /// `/model` with an optional new model name
    Model(Option<String>),
    /// `/key` with an optional key; without one the REPL prompts for it
    Key(Option<String>),
    New,
    Conversation,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a trimmed, non-empty input line.
    pub fn parse(line: &str) -> Self {
        let Some(command) = line.strip_prefix('/') else {
            return ReplCommand::Message(line.to_string());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, Some(rest.trim()).filter(|a| !a.is_empty())),
            None => (command, None),
        };
        let arg = arg.map(str::to_string);

        match name {
            "quit" | "exit" | "q" => ReplCommand::Quit,
            "help" | "h" | "?" => ReplCommand::Help,
            "models" => ReplCommand::Models,
            "model" => ReplCommand::Model(arg),
            "key" => ReplCommand::Key(arg),
            "new" | "reset" => ReplCommand::New,
            "conversation" | "id" => ReplCommand::Conversation,
            _ => ReplCommand::Unknown(line.to_string()),
        }
    }
}
