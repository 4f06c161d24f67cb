//! CompletionClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, RequestError};

/// Stateless completion client - each call is independent
///
/// The chat session builds the full message list (system instruction plus
/// prior turns) for every call, so implementations keep no conversation state.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one completion request and wait for the reply
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, RequestError>;
}
