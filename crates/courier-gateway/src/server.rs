// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router construction and the serving loop.

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, Method, header},
    routing::get,
};
use courier_config::model::ServerConfig;
use courier_core::CourierError;
use courier_relay::Relay;
use tokio_util::sync::CancellationToken;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub relay: Arc<Relay>,
}

/// Builds the application router with the relay mounted at `route`.
pub fn router(route: &str, max_body_bytes: usize, state: GatewayState) -> Router {
    let routes = Router::new()
        .route(
            route,
            get(handlers::health)
                .post(handlers::submit)
                .options(handlers::preflight)
                .head(handlers::method_not_allowed)
                .fallback(handlers::method_not_allowed),
        )
        .with_state(state);
    with_layers(routes, max_body_bytes)
}

/// Wraps `routes` in the middleware stack, outermost first: CORS, tracing,
/// panic recovery, body limit.
pub fn with_layers(routes: Router, max_body_bytes: usize) -> Router {
    routes
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors())
}

fn cors() -> CorsLayer {
    let allowed_headers: [HeaderName; 2] = [header::CONTENT_TYPE, header::AUTHORIZATION];
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS, Method::GET])
        .allow_headers(allowed_headers)
}

/// Binds `host:port` and serves until `shutdown` is cancelled.
///
/// In-flight requests are allowed to finish after cancellation.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), CourierError> {
    let app = router(&config.route, config.max_body_bytes, state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CourierError::Internal(format!("failed to bind {addr}: {e}")))?;

    info!(addr = %addr, route = %config.route, "relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| CourierError::Internal(format!("server error: {e}")))?;

    info!("relay stopped");
    Ok(())
}
