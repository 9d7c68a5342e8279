use {
    axum::{
        Json,
        http::{StatusCode, header},
        response::{IntoResponse, Response},
    },
    serde_json::{Value, json},
    tracing::error,
    verba_oauth::OAuthError,
    verba_relay::RelayError,
};

/// Request-level failure, rendered as an HTTP status plus body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required setting (client id, API key) is absent.
    #[error("missing configuration: {0}")]
    MissingConfiguration(&'static str),

    /// The callback cannot be matched to a started authorization.
    #[error("{0}")]
    MissingState(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("failed to get access token")]
    TokenExchangeFailed { details: Value },

    #[error("provider returned HTTP {status}")]
    ProviderError { status: u16, detail: String },

    #[error("provider returned invalid JSON")]
    InvalidProviderPayload { raw: String },

    #[error("method not allowed")]
    MethodNotAllowed,

    /// Transport or internal failure; only a generic message is returned.
    #[error("{0}")]
    Upstream(&'static str),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingState(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingConfiguration(_)
            | Self::TokenExchangeFailed { .. }
            | Self::ProviderError { .. }
            | Self::InvalidProviderPayload { .. }
            | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::MissingState(msg) | Self::BadRequest(msg) => {
                (status, Json(json!({ "error": msg }))).into_response()
            },
            Self::MissingConfiguration(name) => (
                status,
                Json(json!({ "error": "Server is not configured", "missing": name })),
            )
                .into_response(),
            Self::TokenExchangeFailed { details } => (
                status,
                Json(json!({ "error": "Failed to get access token", "details": details })),
            )
                .into_response(),
            Self::ProviderError { detail, .. } => (
                status,
                Json(json!({ "error": "OpenAI API error", "detail": detail })),
            )
                .into_response(),
            Self::InvalidProviderPayload { raw } => (
                status,
                Json(json!({ "error": "Invalid JSON from OpenAI", "raw": raw })),
            )
                .into_response(),
            Self::MethodNotAllowed => (
                status,
                [(header::ALLOW, "POST, OPTIONS")],
                "Method Not Allowed",
            )
                .into_response(),
            Self::Upstream(msg) => (status, msg).into_response(),
        }
    }
}

impl From<OAuthError> for ApiError {
    fn from(err: OAuthError) -> Self {
        match err {
            OAuthError::MissingState => Self::MissingState("Code verifier missing".into()),
            OAuthError::TokenExchangeFailed { body, .. } => {
                Self::TokenExchangeFailed { details: body }
            },
            other => {
                error!(error = %other, "token request error");
                Self::Upstream("Token request error")
            },
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::Provider { status, body } => Self::ProviderError {
                status,
                detail: body,
            },
            RelayError::InvalidPayload { raw } => Self::InvalidProviderPayload { raw },
            RelayError::InvalidRequest(msg) => Self::BadRequest(msg),
            other => {
                error!(error = %other, "relay failed");
                Self::Upstream("Server error")
            },
        }
    }
}
