pub mod openai;

use std::sync::Arc;

use {tracing::info, verba_config::ProviderConfig};

use crate::model::CompletionProvider;

/// Build the completion provider described by config.
///
/// Returns `None` when no API key is configured; callers report that as a
/// configuration error on first use.
pub fn from_config(config: &ProviderConfig) -> Option<Arc<dyn CompletionProvider>> {
    let key = config.api_key.clone()?;
    let mut provider =
        openai::OpenAiProvider::new(key, config.model.clone(), config.base_url.clone())
            .with_temperature(config.temperature);
    if let Some(max) = config.max_tokens {
        provider = provider.with_max_tokens(max);
    }
    info!(
        provider = "openai",
        model = %config.model,
        base_url = %config.base_url,
        "completion provider configured"
    );
    Some(Arc::new(provider))
}
