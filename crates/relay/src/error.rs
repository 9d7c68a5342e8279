#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The completion API answered with a non-success status.
    #[error("provider returned HTTP {status}: {body}")]
    Provider { status: u16, body: String },

    /// The completion succeeded but its content is not the expected JSON.
    #[error("provider returned content that is not valid JSON")]
    InvalidPayload { raw: String },

    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("prompt rendering failed: {0}")]
    Template(String),
}
