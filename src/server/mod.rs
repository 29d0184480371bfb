//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::middleware::{
    edge_router_middleware, locale_middleware, path_guard_middleware, require_auth_middleware,
    AuthGateState, EdgeState,
};
use crate::session::SessionVerifier;
use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Assembles the middleware chain and routes.
///
/// Layers execute outermost first: trace, path guard, the edge routing
/// decision, locale negotiation, then the authentication gate. The gate
/// deliberately sits innermost so it classifies the final rewritten path.
pub fn build_router(config: &Config) -> Router {
    let environment = config.resolve_environment();
    info!(environment = environment.as_str(), "edge routing environment resolved");

    let edge_state = EdgeState::new(environment, config.base_urls());
    let gate_state = AuthGateState::new(
        SessionVerifier::new(config.session.clone()),
        config.session.sign_in_path.clone(),
    );

    Router::new()
        .route("/healthz", get(api::health::health))
        .fallback(api::page::resolved_page)
        .layer(axum::middleware::from_fn_with_state(
            gate_state,
            require_auth_middleware,
        ))
        .layer(axum::middleware::from_fn(locale_middleware))
        .layer(axum::middleware::from_fn_with_state(
            edge_state,
            edge_router_middleware,
        ))
        .layer(axum::middleware::from_fn(path_guard_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Runs the HTTP server until the process is stopped.
pub async fn run(config: Config) -> Result<()> {
    let app = build_router(&config);
    let listener = TcpListener::bind(config.http_addr()).await?;
    info!("edge service listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
