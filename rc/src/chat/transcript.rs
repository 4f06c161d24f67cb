//! Append-only chat transcript

use chrono::{DateTime, Utc};

use crate::llm::Role;

/// One rendered turn
///
/// The text is kept as paragraph blocks so replies and routines display the
/// way they were split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub blocks: Vec<String>,
    pub at: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: Role, blocks: Vec<String>) -> Self {
        Self {
            role,
            blocks,
            at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![text.into()])
    }

    pub fn assistant(blocks: Vec<String>) -> Self {
        Self::new(Role::Assistant, blocks)
    }

    /// Paragraphs joined back into one string
    pub fn text(&self) -> String {
        self.blocks.join("\n")
    }
}

/// Session transcript; turns are only ever appended
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Split reply text on line breaks into paragraph blocks, dropping blank lines
pub fn format_reply(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
