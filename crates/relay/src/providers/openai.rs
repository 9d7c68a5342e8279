use {
    async_trait::async_trait,
    secrecy::{ExposeSecret, SecretString},
    tracing::{debug, warn},
};

use crate::{error::RelayError, model::CompletionProvider};

/// Content returned when the completion carries no message text.
const EMPTY_CONTENT: &str = "{}";

pub struct OpenAiProvider {
    api_key: SecretString,
    model: String,
    base_url: String,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: SecretString, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            temperature: None,
            max_tokens: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });
        if let Some(t) = self.temperature {
            body["temperature"] = serde_json::json!(t);
        }
        if let Some(n) = self.max_tokens {
            body["max_tokens"] = serde_json::json!(n);
        }
        body
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, RelayError> {
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("content-type", "application/json")
            .json(&self.request_body(prompt))
            .send()
            .await?;

        if let Err(e) = resp.error_for_status_ref() {
            let status = e.status().map(|s| s.as_u16()).unwrap_or(0);
            let body = resp.text().await.unwrap_or_default();
            warn!(status, body = %body, "completion request failed");
            return Err(RelayError::Provider { status, body });
        }

        let resp = resp.json::<serde_json::Value>().await?;

        debug!(
            model = %self.model,
            input_tokens = resp["usage"]["prompt_tokens"].as_u64().unwrap_or(0),
            output_tokens = resp["usage"]["completion_tokens"].as_u64().unwrap_or(0),
            "completion done"
        );

        match resp["choices"][0]["message"]["content"].as_str() {
            Some(text) => Ok(text.to_string()),
            None => {
                warn!(model = %self.model, "completion has no message content");
                Ok(EMPTY_CONTENT.to_string())
            },
        }
    }
}
