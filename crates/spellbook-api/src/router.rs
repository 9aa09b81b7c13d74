//! Route definitions for the Spellbook HTTP API.
//!
//! All routes are mounted under `/api`. Protected groups attach their
//! middleware with `route_layer`; the layer added last runs first.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(public_routes())
        .merge(account_routes(state.clone()))
        .merge(admin_routes(state.clone()));

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Unauthenticated endpoints. Refresh and revoke carry their own bearer.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(handlers::health::health))
        .route("/users", post(handlers::account::register))
        .route("/login", post(handlers::auth::login))
        .route("/refresh", post(handlers::auth::refresh))
        .route("/revoke", post(handlers::auth::revoke))
}

/// Endpoints behind `authenticate`. `PUT /users` merges with the public `POST /users`.
fn account_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users", put(handlers::account::update_account))
        .route("/users/me", get(handlers::account::me))
        .route("/users/delete", post(handlers::account::delete_account))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::auth::authenticate,
        ))
}

/// Endpoints behind `authenticate` then `require_privileged`.
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/users", post(handlers::admin::create_admin))
        .route_layer(axum_middleware::from_fn(
            middleware::rbac::require_privileged,
        ))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::auth::authenticate,
        ))
}
