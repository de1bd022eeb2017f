//! Completion client trait: the boundary to the external language model.
//!
//! One call is one request/response exchange: an ordered list of system
//! instructions plus the user's utterance in, the assistant's text out.

use crate::error::CompletionError;
use async_trait::async_trait;

/// The core CompletionClient trait.
///
/// Implementations: the OpenAI-compatible HTTP client, and scripted fakes in
/// tests.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// A human-readable name for this client (e.g., "openrouter").
    fn name(&self) -> &str;

    /// Run one exchange. Any transport failure, non-success status or
    /// missing payload maps to a `CompletionError` with a readable message.
    async fn complete(
        &self,
        system_instructions: &[String],
        user_utterance: &str,
    ) -> Result<String, CompletionError>;
}
