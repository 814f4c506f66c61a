//! HTTP application wiring (axum router + service wiring).
//!
//! - `services.rs`: the service graph (resolver, team service, stores)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router with in-memory stores (public entrypoint used
/// by `main.rs`).
pub async fn build_app(token_secret: String) -> Router {
    build_app_with(token_secret, Arc::new(services::AppServices::in_memory()))
}

/// Build the router over an existing service graph.
pub fn build_app_with(token_secret: String, services: Arc<services::AppServices>) -> Router {
    let verifier = Arc::new(middleware::Hs256TokenVerifier::new(token_secret.as_bytes()));
    let auth_state = middleware::AuthState { verifier };

    // Protected routes: require an authenticated caller.
    let protected = routes::router(&services)
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::identity_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
