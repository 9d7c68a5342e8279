use std::{sync::Arc, time::Duration};

use {
    tracing::warn,
    verba_config::{PromptTemplates, VerbaConfig},
    verba_oauth::{OAuthConfig, OAuthFlow, PendingFlows},
    verba_relay::{CompletionProvider, PromptRelay, Translator, providers},
};

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct GatewayState {
    /// `None` when no client id is configured.
    pub oauth: Option<Arc<OAuthFlow>>,
    pub pending: Arc<PendingFlows>,
    /// `None` when no provider API key is configured.
    pub relay: Option<PromptRelay>,
    pub translator: Option<Translator>,
}

impl GatewayState {
    pub fn new(
        oauth: Option<OAuthFlow>,
        pending: PendingFlows,
        provider: Option<Arc<dyn CompletionProvider>>,
        templates: PromptTemplates,
    ) -> Self {
        let relay = provider.map(PromptRelay::new);
        let translator = relay
            .clone()
            .map(|relay| Translator::new(relay, templates));
        Self {
            oauth: oauth.map(Arc::new),
            pending: Arc::new(pending),
            relay,
            translator,
        }
    }

    pub fn from_config(config: &VerbaConfig) -> Self {
        let oauth = match &config.oauth.client_id {
            Some(client_id) => Some(OAuthFlow::new(OAuthConfig {
                client_id: client_id.clone(),
                auth_url: config.oauth.auth_url.clone(),
                token_url: config.oauth.token_url.clone(),
                redirect_uri: config.oauth.redirect_uri.clone(),
                scopes: config.oauth.scopes.clone(),
            })),
            None => {
                warn!("CANVA_CLIENT_ID is not set; authorization endpoints will reject requests");
                None
            },
        };

        let provider = providers::from_config(&config.provider);
        if provider.is_none() {
            warn!("OPENAI_API_KEY is not set; relay endpoints will reject requests");
        }

        Self::new(
            oauth,
            PendingFlows::new(Duration::from_secs(config.oauth.state_ttl_secs)),
            provider,
            config.prompts.templates.clone(),
        )
    }
}
