//! Completion request/response types
//!
//! These mirror the chat-completions shape the worker proxies:
//! `{model, messages: [{role, content}]}` in, `{choices: [{message: {content}}]}` out.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        f.write_str(s)
    }
}

/// A message in the outbound request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        debug!("Message::user: called");
        Self {
            role: Role::User,
            content: text.into(),
        }
    }
}

/// A completion request - serialised as-is for the worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub model: String,

    /// System instruction first, then conversation turns, then the new user message
    pub messages: Vec<Message>,
}

/// Reply text extracted from the first choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub content: String,
}

impl CompletionResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

// Worker wire response

#[derive(Debug, Deserialize)]
pub(crate) struct WorkerResponse {
    pub choices: Vec<WorkerChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkerChoice {
    pub message: WorkerMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkerMessage {
    pub content: Option<String>,
}
