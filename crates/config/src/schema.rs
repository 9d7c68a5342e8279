use std::path::PathBuf;

use {secrecy::SecretString, serde::Deserialize};

use crate::prompts::PromptTemplates;

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerbaConfig {
    pub server: ServerConfig,
    pub oauth: OAuthSettings,
    pub provider: ProviderConfig,
    pub cors: CorsConfig,
    pub prompts: PromptsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Public base URL the plugin UI calls (`CANVA_BACKEND_HOST`).
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".into(),
            port: 3001,
            public_url: None,
        }
    }
}

/// Host platform OAuth settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OAuthSettings {
    pub client_id: Option<String>,
    pub auth_url: String,
    pub token_url: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    /// How long a started authorization may wait for its callback.
    pub state_ttl_secs: u64,
}

impl Default for OAuthSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            auth_url: "https://www.canva.com/oauth/authorize".into(),
            token_url: "https://api.canva.com/oauth/token".into(),
            redirect_uri: "http://127.0.0.1:3001/api/callback".into(),
            scopes: vec!["design:read".into(), "design:write".into()],
            state_ttl_secs: 600,
        }
    }
}

/// Chat-completion provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: Option<u32>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4".into(),
            temperature: 0.7,
            max_tokens: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Exact origins allowed to read responses. `"*"` allows any origin.
    pub allowed_origins: Vec<String>,
    /// Ignored when any origin is allowed.
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["https://app-aagmyybgi1q.canva-apps.com".into()],
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Prompt template settings: inline templates, optionally overridden by a file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    pub file: Option<PathBuf>,
    #[serde(flatten)]
    pub templates: PromptTemplates,
}
