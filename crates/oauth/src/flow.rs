use {
    serde_json::Value,
    tracing::{debug, warn},
    url::Url,
};

use crate::{
    error::OAuthError,
    pkce::generate_pkce,
    types::{OAuthConfig, OAuthTokens, PkceChallenge, TokenResponse, unix_now},
};

/// Everything needed to send the user to the consent screen and later
/// finish the exchange.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: String,
    /// Opaque correlation token echoed back on the callback.
    pub state: String,
    pub pkce: PkceChallenge,
}

/// Authorization-code-with-PKCE flow against a single provider.
pub struct OAuthFlow {
    config: OAuthConfig,
    client: reqwest::Client,
}

impl OAuthFlow {
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Generate a PKCE pair and `state`, and build the authorize URL.
    pub fn start(&self) -> Result<AuthorizationRequest, OAuthError> {
        let pkce = generate_pkce();
        let state = uuid::Uuid::new_v4().to_string();
        let url = self.authorize_url(&pkce.challenge, &state)?;
        debug!(state, "built authorize url");
        Ok(AuthorizationRequest { url, state, pkce })
    }

    fn authorize_url(&self, challenge: &str, state: &str) -> Result<String, OAuthError> {
        let scope = self.config.scopes.join(" ");
        let mut params = vec![
            ("response_type", "code"),
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];
        if !scope.is_empty() {
            params.push(("scope", scope.as_str()));
        }
        params.extend([
            ("code_challenge", challenge),
            ("code_challenge_method", "S256"),
            ("state", state),
        ]);
        Ok(Url::parse_with_params(&self.config.auth_url, &params)?.into())
    }

    /// Exchange an authorization code for tokens.
    ///
    /// `verifier` must be the one whose challenge went into the authorize URL.
    pub async fn exchange(&self, code: &str, verifier: &str) -> Result<OAuthTokens, OAuthError> {
        let resp = self
            .client
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("client_id", self.config.client_id.as_str()),
                ("code_verifier", verifier),
            ])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
            warn!(status = status.as_u16(), details = %body, "token exchange failed");
            return Err(OAuthError::TokenExchangeFailed {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TokenResponse = serde_json::from_str(&text)
            .map_err(|e| OAuthError::InvalidTokenResponse(e.to_string()))?;
        Ok(parsed.into_tokens(unix_now()))
    }
}
