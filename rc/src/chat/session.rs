//! Chat session state machine
//!
//! ```text
//! Idle ──begin──> Pending ──finish(Ok)──> Resolved ──> Idle
//!                    │
//!                    └──finish(Err)──> Failed ──> Idle
//! ```
//!
//! Only one request may be pending. Each request carries a sequence number
//! and completions that don't match the pending sequence are dropped.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::matcher::{LiteralSubstringMatcher, ProductMatcher, flag_products};
use super::prompt::{PromptBuilder, PromptError};
use super::transcript::{Transcript, Turn, format_reply};
use crate::catalog::{Catalog, Product};
use crate::llm::{CompletionClient, CompletionRequest, CompletionResponse, Message, RequestError, Role};
use crate::routine::RoutineBlock;
use crate::selection::SelectionStore;

/// Shown while a request is pending
pub const PLACEHOLDER_TEXT: &str = "Thinking...";

/// Appended in place of a reply when the request fails
pub const FALLBACK_TEXT: &str = "Sorry, something went wrong. Please try again later.";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Message is empty")]
    EmptyInput,

    #[error("A request is already in flight (#{pending})")]
    Busy { pending: u64 },

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    Pending { seq: u64 },
}

/// A request that has been started but not finished
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub seq: u64,
    pub request: CompletionRequest,
}

/// What happened to a finished request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Reply appended; `flagged` catalog products were found in it
    Resolved { flagged: usize },
    /// Fallback appended
    Failed,
    /// Completion did not match the pending request and was dropped
    Stale,
}

pub struct ChatSession {
    model: String,
    prompts: PromptBuilder,
    matcher: Box<dyn ProductMatcher>,
    transcript: Transcript,
    state: ChatState,
    next_seq: u64,
    flagged: Vec<Arc<Product>>,
}

impl ChatSession {
    pub fn new(model: impl Into<String>) -> Result<Self, ChatError> {
        Ok(Self::with_parts(
            model,
            PromptBuilder::new()?,
            Box::new(LiteralSubstringMatcher),
        ))
    }

    pub fn with_parts(model: impl Into<String>, prompts: PromptBuilder, matcher: Box<dyn ProductMatcher>) -> Self {
        let model = model.into();
        debug!(%model, matcher = matcher.name(), "ChatSession::with_parts: called");
        Self {
            model,
            prompts,
            matcher,
            transcript: Transcript::new(),
            state: ChatState::Idle,
            next_seq: 1,
            flagged: Vec::new(),
        }
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Placeholder text while a request is pending
    pub fn placeholder(&self) -> Option<&'static str> {
        match self.state {
            ChatState::Pending { .. } => Some(PLACEHOLDER_TEXT),
            ChatState::Idle => None,
        }
    }

    /// Products found in the last successful reply
    pub fn flagged(&self) -> &[Arc<Product>] {
        &self.flagged
    }

    /// Idle -> Pending: record the user turn and build the outbound request
    pub fn begin(
        &mut self,
        input: &str,
        selection: &SelectionStore,
        catalog: &Catalog,
    ) -> Result<PendingRequest, ChatError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ChatError::EmptyInput);
        }
        if let ChatState::Pending { seq } = self.state {
            debug!(pending = seq, "begin: rejected, request in flight");
            return Err(ChatError::Busy { pending: seq });
        }

        let system = self.prompts.build(selection.all(), catalog.products())?;
        let mut messages = Vec::with_capacity(self.transcript.len() + 2);
        messages.push(Message::system(system));
        messages.extend(self.history_messages());
        messages.push(Message::user(input));

        let seq = self.next_seq;
        self.next_seq += 1;
        self.transcript.push(Turn::user(input));
        self.state = ChatState::Pending { seq };
        info!(seq, messages = messages.len(), "Chat request pending");

        Ok(PendingRequest {
            seq,
            request: CompletionRequest {
                model: self.model.clone(),
                messages,
            },
        })
    }

    /// Pending -> Resolved/Failed -> Idle
    pub fn finish(
        &mut self,
        seq: u64,
        result: Result<CompletionResponse, RequestError>,
        catalog: &Catalog,
    ) -> Outcome {
        if self.state != (ChatState::Pending { seq }) {
            warn!(seq, state = ?self.state, "Discarding stale completion");
            return Outcome::Stale;
        }
        self.state = ChatState::Idle;

        match result {
            Ok(response) => {
                self.flagged = flag_products(self.matcher.as_ref(), &response.content, catalog.products());
                self.transcript.push(Turn::assistant(format_reply(&response.content)));
                info!(seq, flagged = self.flagged.len(), "Chat request resolved");
                Outcome::Resolved {
                    flagged: self.flagged.len(),
                }
            }
            Err(e) => {
                error!(seq, error = %e, "Chat request failed");
                self.flagged.clear();
                self.transcript.push(Turn::assistant(vec![FALLBACK_TEXT.to_string()]));
                Outcome::Failed
            }
        }
    }

    /// Run one full request against `client`
    ///
    /// Request failures end in the Failed state with the fallback turn; only
    /// precondition failures (empty input, busy) are returned as errors.
    pub async fn submit(
        &mut self,
        client: &dyn CompletionClient,
        input: &str,
        selection: &SelectionStore,
        catalog: &Catalog,
    ) -> Result<Outcome, ChatError> {
        let pending = self.begin(input, selection, catalog)?;
        let result = client.complete(pending.request).await;
        Ok(self.finish(pending.seq, result, catalog))
    }

    /// Append a generated routine as an assistant turn
    pub fn append_routine(&mut self, routine: &RoutineBlock) {
        debug!(entries = routine.entries.len(), "append_routine: called");
        self.transcript.push(Turn::assistant(routine.blocks()));
    }

    /// Prior user/assistant turns as conversation context
    ///
    /// Fallback turns are local notices, never sent back to the worker.
    fn history_messages(&self) -> impl Iterator<Item = Message> + '_ {
        self.transcript
            .turns()
            .iter()
            .filter(|turn| turn.role != Role::System)
            .filter(|turn| !(turn.role == Role::Assistant && turn.text() == FALLBACK_TEXT))
            .map(|turn| Message {
                role: turn.role,
                content: turn.text(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::{MockCompletionClient, MockReply};
    use crate::routine::build_routine;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new("1", "Aloe Gel", "skincare", "Soothing gel"),
            Product::new("2", "Gel", "haircare", "Styling gel"),
            Product::new("3", "Night Cream", "skincare", "Rich cream"),
        ])
    }

    fn session() -> ChatSession {
        ChatSession::new("gpt-4o").unwrap()
    }

    #[tokio::test]
    async fn test_resolved_reply_is_split_and_flagged() {
        let catalog = catalog();
        let selection = SelectionStore::new();
        let client = MockCompletionClient::replying("We recommend Aloe Gel today.\n\nUse it twice daily.");
        let mut chat = session();

        let outcome = chat.submit(&client, "what helps dry skin?", &selection, &catalog).await.unwrap();

        assert_eq!(outcome, Outcome::Resolved { flagged: 2 });
        assert_eq!(chat.state(), ChatState::Idle);
        assert!(chat.placeholder().is_none());

        let turns = chat.transcript().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[1].blocks, vec!["We recommend Aloe Gel today.", "Use it twice daily."]);

        let names: Vec<&str> = chat.flagged().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Aloe Gel", "Gel"]);
    }

    #[tokio::test]
    async fn test_failed_request_appends_single_fallback() {
        let catalog = catalog();
        let selection = SelectionStore::new();
        let client = MockCompletionClient::failing();
        let mut chat = session();

        let outcome = chat.submit(&client, "hello", &selection, &catalog).await.unwrap();

        assert_eq!(outcome, Outcome::Failed);
        assert!(chat.placeholder().is_none());
        let turns = chat.transcript().turns();
        assert_eq!(turns.last().unwrap().text(), FALLBACK_TEXT);
        assert_eq!(turns.iter().filter(|t| t.text() == FALLBACK_TEXT).count(), 1);
        assert!(!turns.iter().any(|t| t.text() == PLACEHOLDER_TEXT));
    }

    #[tokio::test]
    async fn test_failure_clears_previous_flags() {
        let catalog = catalog();
        let selection = SelectionStore::new();
        let client = MockCompletionClient::new(vec![
            MockReply::Text("Night Cream works".to_string()),
            MockReply::Status(503),
        ]);
        let mut chat = session();

        chat.submit(&client, "one", &selection, &catalog).await.unwrap();
        assert_eq!(chat.flagged().len(), 1);

        chat.submit(&client, "two", &selection, &catalog).await.unwrap();
        assert!(chat.flagged().is_empty());
    }

    #[test]
    fn test_empty_input_rejected() {
        let mut chat = session();
        let err = chat.begin("   ", &SelectionStore::new(), &catalog()).unwrap_err();
        assert!(matches!(err, ChatError::EmptyInput));
        assert!(chat.transcript().is_empty());
    }

    #[test]
    fn test_pending_shows_placeholder_and_rejects_second_submit() {
        let catalog = catalog();
        let selection = SelectionStore::new();
        let mut chat = session();

        let pending = chat.begin("first", &selection, &catalog).unwrap();
        assert_eq!(chat.state(), ChatState::Pending { seq: pending.seq });
        assert_eq!(chat.placeholder(), Some(PLACEHOLDER_TEXT));

        let err = chat.begin("second", &selection, &catalog).unwrap_err();
        assert!(matches!(err, ChatError::Busy { pending } if pending == 1));
        assert_eq!(chat.transcript().len(), 1);
    }

    #[test]
    fn test_stale_completion_discarded() {
        let catalog = catalog();
        let selection = SelectionStore::new();
        let mut chat = session();

        let first = chat.begin("first", &selection, &catalog).unwrap();
        assert_eq!(
            chat.finish(first.seq, Ok(CompletionResponse::new("ok")), &catalog),
            Outcome::Resolved { flagged: 0 }
        );

        let second = chat.begin("second", &selection, &catalog).unwrap();
        assert_ne!(first.seq, second.seq);

        // Late duplicate of the first completion
        let before = chat.transcript().len();
        assert_eq!(
            chat.finish(first.seq, Ok(CompletionResponse::new("late")), &catalog),
            Outcome::Stale
        );
        assert_eq!(chat.transcript().len(), before);
        assert_eq!(chat.state(), ChatState::Pending { seq: second.seq });
    }

    #[test]
    fn test_request_carries_system_history_and_input() {
        let catalog = catalog();
        let mut selection = SelectionStore::new();
        selection.add(catalog.products()[2].clone());
        let mut chat = session();

        let first = chat.begin("hi", &selection, &catalog).unwrap();
        assert_eq!(first.request.model, "gpt-4o");
        assert_eq!(first.request.messages.len(), 2);
        assert_eq!(first.request.messages[0].role, Role::System);
        assert!(first.request.messages[0].content.contains("Selected products:"));
        chat.finish(first.seq, Ok(CompletionResponse::new("hello")), &catalog);

        let second = chat.begin("and then?", &selection, &catalog).unwrap();
        let roles: Vec<Role> = second.request.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant, Role::User]);
        assert_eq!(second.request.messages[3].content, "and then?");
    }

    #[tokio::test]
    async fn test_fallback_turn_not_sent_as_history() {
        let catalog = catalog();
        let selection = SelectionStore::new();
        let client = MockCompletionClient::new(vec![MockReply::Status(502), MockReply::Text("ok".to_string())]);
        let mut chat = session();

        chat.submit(&client, "one", &selection, &catalog).await.unwrap();
        chat.submit(&client, "two", &selection, &catalog).await.unwrap();

        let second = &client.requests()[1];
        let roles: Vec<Role> = second.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::User]);
        assert!(!second.messages.iter().any(|m| m.content == FALLBACK_TEXT));
        assert_eq!(chat.transcript().turns()[1].text(), FALLBACK_TEXT);
    }

    #[tokio::test]
    async fn test_system_instruction_tracks_selection() {
        let catalog = catalog();
        let mut selection = SelectionStore::new();
        let client = MockCompletionClient::new(vec![
            MockReply::Text("a".to_string()),
            MockReply::Text("b".to_string()),
        ]);
        let mut chat = session();

        chat.submit(&client, "one", &selection, &catalog).await.unwrap();
        selection.add(catalog.products()[0].clone());
        chat.submit(&client, "two", &selection, &catalog).await.unwrap();

        let requests = client.requests();
        assert!(!requests[0].messages[0].content.contains("Selected products:"));
        assert!(requests[1].messages[0].content.contains("Selected products:"));
    }

    #[test]
    fn test_append_routine() {
        let catalog = catalog();
        let mut selection = SelectionStore::new();
        selection.add(catalog.products()[0].clone());
        let mut chat = session();

        let routine = build_routine(&selection).unwrap();
        chat.append_routine(&routine);

        let last = chat.transcript().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert!(last.text().contains("Aloe Gel"));
    }
}
