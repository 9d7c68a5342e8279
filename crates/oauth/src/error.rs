use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// No pending flow matches the callback (unknown, reused or expired `state`).
    #[error("no pending authorization for this callback")]
    MissingState,

    /// The token endpoint answered with a non-success status.
    #[error("token exchange failed with HTTP {status}")]
    TokenExchangeFailed { status: u16, body: Value },

    #[error("token endpoint returned an unexpected body: {0}")]
    InvalidTokenResponse(String),

    #[error("token request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid authorize url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
