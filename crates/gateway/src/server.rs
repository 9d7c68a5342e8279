use {
    anyhow::Context,
    axum::{
        Json, Router, middleware,
        routing::{get, post},
    },
    serde_json::{Value, json},
    tokio::net::TcpListener,
    tracing::info,
    verba_config::{CorsConfig, VerbaConfig},
};

use crate::{
    auth_routes,
    cors::{cors_layer, preflight_no_content},
    relay_routes,
    state::GatewayState,
};

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

pub fn build_router(state: GatewayState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth", get(auth_routes::begin))
        .route("/api/callback", get(auth_routes::callback))
        .route(
            "/api/openai",
            post(relay_routes::relay_prompt).fallback(relay_routes::method_not_allowed),
        )
        .route(
            "/api/translate",
            post(relay_routes::translate).fallback(relay_routes::method_not_allowed),
        )
        .route(
            "/api/detect",
            post(relay_routes::detect).fallback(relay_routes::method_not_allowed),
        )
        .route("/api/languages", get(relay_routes::languages))
        .layer(cors_layer(cors))
        .layer(middleware::from_fn(preflight_no_content))
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn start_gateway(config: VerbaConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let state = GatewayState::from_config(&config);
    let app = build_router(state, &config.cors);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        addr = %listener.local_addr()?,
        public_url = config.server.public_url.as_deref().unwrap_or("-"),
        redirect_uri = %config.oauth.redirect_uri,
        prompt_version = %config.prompts.templates.version,
        "gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server error")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
