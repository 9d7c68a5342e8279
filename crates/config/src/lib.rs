pub mod loader;
pub mod prompts;
pub mod schema;

pub use {
    loader::{discover_and_load, load_config, parse_config},
    prompts::PromptTemplates,
    schema::{CorsConfig, OAuthSettings, ProviderConfig, ServerConfig, VerbaConfig},
};
