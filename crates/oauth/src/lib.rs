pub mod error;
pub mod flow;
pub mod pending;
pub mod pkce;
pub mod types;

pub use error::OAuthError;
pub use flow::{AuthorizationRequest, OAuthFlow};
pub use pending::PendingFlows;
pub use types::{OAuthConfig, OAuthTokens, PkceChallenge};
