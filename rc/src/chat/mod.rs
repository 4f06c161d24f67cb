//! Chat session: transcript, request construction and reply handling

mod matcher;
mod prompt;
mod session;
mod transcript;

pub use matcher::{LiteralSubstringMatcher, ProductMatcher, flag_products};
pub use prompt::{CATALOG_HEADER, PromptBuilder, PromptError, SELECTED_HEADER, build_system_instruction};
pub use session::{ChatError, ChatSession, ChatState, FALLBACK_TEXT, Outcome, PLACEHOLDER_TEXT, PendingRequest};
pub use transcript::{Transcript, Turn, format_reply};
