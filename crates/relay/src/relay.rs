use std::sync::Arc;

use {
    serde_json::Value,
    tracing::{debug, error},
};

use crate::{error::RelayError, model::CompletionProvider, payload::extract_json};

/// Forwards a prompt to the completion provider and returns the JSON
/// document carried in its reply.
#[derive(Clone)]
pub struct PromptRelay {
    provider: Arc<dyn CompletionProvider>,
}

impl PromptRelay {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    pub async fn relay(&self, prompt: &str) -> Result<Value, RelayError> {
        debug!(
            provider = self.provider.name(),
            model = self.provider.model(),
            prompt_len = prompt.len(),
            "relaying prompt"
        );
        let content = self.provider.complete(prompt).await?;

        match extract_json(&content) {
            Some(value) => Ok(value),
            None => {
                error!(raw = %content, "could not parse provider content as JSON");
                Err(RelayError::InvalidPayload { raw: content })
            },
        }
    }
}
