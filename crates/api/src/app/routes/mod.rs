use std::sync::Arc;

use axum::Router;

use crate::app::services::AppServices;

pub mod access;
pub mod businesses;
pub mod system;
pub mod team;

/// Router for all authenticated endpoints.
pub fn router(services: &Arc<AppServices>) -> Router {
    Router::new()
        .nest("/businesses", businesses::router(services))
        .nest("/access", access::router(services))
}
