use std::sync::Arc;

use axum::{Json, Router, extract::Extension, response::IntoResponse, routing::get};

use crate::app::services::AppServices;
use crate::context::AccessContext;
use crate::guard::{self, GuardSpec};

pub fn router(services: &Arc<AppServices>) -> Router {
    // GET and POST both answer so clients can probe with a query string, a
    // header, or a JSON body carrying `businessId`.
    Router::new()
        .route("/check", get(check).post(check))
        .route_layer(axum::middleware::from_fn_with_state(
            services.guard(GuardSpec::member()),
            guard::business_guard,
        ))
}

/// Report the caller's resolved access to the target business.
pub async fn check(Extension(access): Extension<AccessContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "businessId": access.business_id.to_string(),
        "isOwner": access.is_owner,
        "permissions": access.effective_permissions,
    }))
}
