use {
    axum::{
        extract::{Query, State},
        http::{StatusCode, header},
        response::{IntoResponse, Response},
    },
    serde::Deserialize,
    tracing::{info, warn},
};

use crate::{error::ApiError, state::GatewayState};

const SUCCESS_MESSAGE: &str =
    "Authorization succeeded. You can close this window and return to the app.";

/// Query parameters the authorization server appends to the redirect URI.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// `GET /api/auth`: start a flow and redirect to the consent screen.
pub async fn begin(State(state): State<GatewayState>) -> Result<Response, ApiError> {
    let flow = state
        .oauth
        .as_ref()
        .ok_or(ApiError::MissingConfiguration("CANVA_CLIENT_ID"))?;

    let req = flow.start()?;
    state.pending.insert(req.state.clone(), req.pkce.verifier);
    info!(state = %req.state, pending = state.pending.len(), "authorization started");

    Ok((StatusCode::FOUND, [(header::LOCATION, req.url)]).into_response())
}

/// `GET /api/callback`: exchange the returned code for tokens.
///
/// Tokens are logged (redacted) and dropped; the caller only gets an
/// acknowledgment.
pub async fn callback(
    State(state): State<GatewayState>,
    Query(params): Query<CallbackParams>,
) -> Result<Response, ApiError> {
    if let Some(error) = params.error {
        let reason = params.error_description.unwrap_or(error);
        warn!(reason = %reason, "authorization denied by provider");
        return Err(ApiError::BadRequest(format!("Authorization denied: {reason}")));
    }

    let flow = state
        .oauth
        .as_ref()
        .ok_or_else(|| ApiError::MissingState("Client id not configured".into()))?;

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::MissingState("Authorization code missing".into()))?;

    let Some(verifier) = params.state.as_deref().and_then(|s| state.pending.take(s)) else {
        warn!(state = ?params.state, "callback without a pending authorization");
        return Err(ApiError::MissingState("Code verifier missing".into()));
    };

    let tokens = flow.exchange(&code, &verifier).await?;

    info!(
        access_token = ?tokens.access_token,
        has_refresh_token = tokens.refresh_token.is_some(),
        expires_at = ?tokens.expires_at,
        "authorization complete"
    );

    Ok(SUCCESS_MESSAGE.into_response())
}
