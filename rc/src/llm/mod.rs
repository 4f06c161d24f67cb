//! Completion client module
//!
//! Talks to the remote completion worker that produces recommendations.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod types;
mod worker;

pub use client::CompletionClient;
pub use error::RequestError;
pub use types::{CompletionRequest, CompletionResponse, Message, Role};
pub use worker::WorkerClient;

use crate::config::WorkerConfig;

/// Create the completion client described by the worker config
pub fn create_client(config: &WorkerConfig) -> Result<Arc<dyn CompletionClient>, RequestError> {
    debug!(url = %config.url, model = %config.model, "create_client: called");
    Ok(Arc::new(WorkerClient::from_config(config)?))
}
