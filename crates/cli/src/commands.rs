use {
    anyhow::{Context, Result},
    verba_config::VerbaConfig,
    verba_oauth::pkce,
    verba_relay::{CompletionProvider, RelayError, providers::openai::OpenAiProvider},
};

const CHECK_PROMPT: &str = "Say hello in one word.";

/// Send a tiny completion to confirm the configured API key works.
pub async fn check_key(config: &VerbaConfig) -> Result<()> {
    let key = config
        .provider
        .api_key
        .clone()
        .context("OPENAI_API_KEY is not set; check your .env file")?;

    let provider = OpenAiProvider::new(
        key,
        config.provider.model.clone(),
        config.provider.base_url.clone(),
    )
    .with_max_tokens(10);

    match provider.complete(CHECK_PROMPT).await {
        Ok(reply) => {
            println!("API key works! Response: {}", reply.trim());
            Ok(())
        },
        Err(RelayError::Provider { status, body }) => {
            let detail = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or(body);
            anyhow::bail!("provider rejected the request (HTTP {status}): {detail}")
        },
        Err(e) => Err(e).context("failed to reach the completion provider"),
    }
}

/// Print a fresh verifier/challenge pair.
pub fn print_pkce(length: usize) {
    let verifier = pkce::generate_verifier(length);
    let challenge = pkce::derive_challenge(&verifier);
    println!("code_verifier:  {verifier}");
    println!("code_challenge: {challenge}");
}
