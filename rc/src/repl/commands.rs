//! Slash command parsing

use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    Quit,
    Categories,
    /// Filter by category; `None` when no category was given
    Products(Option<String>),
    Select(Vec<String>),
    Selected,
    AddFlagged,
    Routine,
    History,
    Reload,
    Unknown(String),
}

impl SlashCommand {
    /// Parse a REPL line; returns None for ordinary chat input
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if !input.starts_with('/') {
            return None;
        }

        let (cmd, rest) = match input.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (input, ""),
        };
        debug!(%cmd, %rest, "SlashCommand::parse: called");

        let command = match cmd {
            "/help" | "/h" => Self::Help,
            "/quit" | "/q" | "/exit" => Self::Quit,
            "/categories" | "/cats" => Self::Categories,
            // Categories may contain spaces, so take the whole remainder
            "/products" | "/p" => Self::Products(if rest.is_empty() { None } else { Some(rest.to_string()) }),
            "/select" | "/s" => Self::Select(rest.split_whitespace().map(str::to_string).collect()),
            "/selected" => Self::Selected,
            "/add-flagged" | "/af" => Self::AddFlagged,
            "/routine" | "/r" => Self::Routine,
            "/history" => Self::History,
            "/reload" => Self::Reload,
            other => Self::Unknown(other.to_string()),
        };
        Some(command)
    }
}
