//! Routing module for the cart service

use crate::cart::state::SharedState;
use crate::config::AppConfig;
use axum::{body::Body, extract::Request, middleware::Next, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState, config: &AppConfig) -> Router {
    // Middleware: Log requests
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        let method = req.method().clone();
        let uri = req.uri().clone();
        tracing::info!(%method, %uri, "REQ");
        let res = next.run(req).await;
        if !res.status().is_success() {
            tracing::warn!(%method, %uri, status = %res.status(), "RES (Error)");
        }
        res
    });

    // Cart routes live under the configured mount point
    let cart_routes = crate::cart::routes();
    let app = if config.mount_path == "/" {
        Router::new().merge(cart_routes)
    } else {
        Router::new().nest(&config.mount_path, cart_routes)
    };

    let app = app.route("/health", get(health)).layer(log_layer);

    // Middleware: CORS (Permissive for local dev)
    let app = if config.cors_permissive {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    };

    app.with_state(state)
}

/// Endpoint: GET /health
async fn health() -> Json<Value> {
    Json(json!({ "success": true, "status": "ok" }))
}
