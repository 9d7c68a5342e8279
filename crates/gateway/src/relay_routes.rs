use {
    axum::{Json, body::Bytes, extract::State},
    serde::{Deserialize, de::DeserializeOwned},
    serde_json::{Value, json},
    verba_relay::{
        SourceText, TranslationRequest,
        languages::{LANGUAGES, Language},
        translate::TranslationOutcome,
    },
};

use crate::{error::ApiError, state::GatewayState};

#[derive(Debug, Deserialize)]
pub struct RelayRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    pub texts: Vec<SourceText>,
}

fn parse_body<T: DeserializeOwned>(body: &Bytes, expected: &str) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("expected {expected}: {e}")))
}

/// `POST /api/openai`: relay a prompt and return the JSON in the reply.
pub async fn relay_prompt(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let req: RelayRequest = parse_body(&body, r#"{"prompt": string}"#)?;
    let relay = state
        .relay
        .as_ref()
        .ok_or(ApiError::MissingConfiguration("OPENAI_API_KEY"))?;
    Ok(Json(relay.relay(&req.prompt).await?))
}

/// `POST /api/translate`: build the translation prompt server-side.
pub async fn translate(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Result<Json<TranslationOutcome>, ApiError> {
    let req: TranslationRequest = parse_body(
        &body,
        r#"{"texts": [{"id", "text"}], "languages": [code], "context"?}"#,
    )?;
    let translator = state
        .translator
        .as_ref()
        .ok_or(ApiError::MissingConfiguration("OPENAI_API_KEY"))?;
    Ok(Json(translator.translate(&req).await?))
}

/// `POST /api/detect`: detect the source language of the selected texts.
pub async fn detect(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let req: DetectRequest = parse_body(&body, r#"{"texts": [{"id", "text"}]}"#)?;
    let translator = state
        .translator
        .as_ref()
        .ok_or(ApiError::MissingConfiguration("OPENAI_API_KEY"))?;
    let language = translator.detect(&req.texts).await?;
    Ok(Json(json!({ "language": language })))
}

/// `GET /api/languages`
pub async fn languages() -> Json<&'static [Language]> {
    Json(LANGUAGES)
}

/// Any method other than POST/OPTIONS on a relay path.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
