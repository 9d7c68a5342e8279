pub mod auth_routes;
pub mod cors;
pub mod error;
pub mod relay_routes;
pub mod server;
pub mod state;

pub use {error::ApiError, server::start_gateway, state::GatewayState};
