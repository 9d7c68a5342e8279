use async_trait::async_trait;

use crate::error::RelayError;

/// A chat-completion backend that turns one user prompt into one reply.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider identifier (e.g. "openai").
    fn name(&self) -> &str;

    /// Model the provider sends requests to.
    fn model(&self) -> &str;

    /// Send `prompt` as the only user message and return the first choice's text.
    async fn complete(&self, prompt: &str) -> Result<String, RelayError>;
}
