use axum::routing::{delete, get, patch, post};
use axum::{middleware, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{admin, client};
use crate::middleware::{admin_gate, client_gate};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let admin_protected = Router::new()
        .route("/admin/auth/me", get(admin::auth::me))
        .route("/admin/properties", get(admin::properties::list))
        .route(
            "/admin/properties/:id",
            get(admin::properties::detail).delete(admin::properties::remove),
        )
        .route("/admin/properties/:id/status", patch(admin::properties::change_status))
        .route("/admin/roles", get(admin::roles::list))
        .route("/admin/roles/:id", get(admin::roles::detail))
        .route("/admin/accounts", get(admin::accounts::list))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_gate));

    let client_protected = Router::new()
        .route("/api/auth/me", get(client::auth::me))
        .route_layer(middleware::from_fn_with_state(state.clone(), client_gate));

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public client surface
        .route("/api/properties", get(client::properties::list))
        .route("/api/properties/:slug", get(client::properties::detail))
        .route("/api/auth/login", post(client::auth::login))
        .route("/api/auth/refresh", post(client::auth::refresh))
        // Administrator session acquisition
        .route("/admin/auth/login", post(admin::auth::login))
        .route("/admin/auth/logout", delete(admin::auth::logout))
        // Gated surfaces
        .merge(admin_protected)
        .merge(client_protected)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Estate API",
            "version": version,
            "description": "Real-estate listing backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "properties": "/api/properties[/:slug] (public)",
                "client_auth": "/api/auth/login, /api/auth/refresh (public), /api/auth/me (bearer)",
                "admin_auth": "/admin/auth/login, /admin/auth/logout, /admin/auth/me (cookie)",
                "admin": "/admin/properties, /admin/roles, /admin/accounts (cookie + permission)",
            }
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
