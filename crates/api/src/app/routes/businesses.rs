use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};

use shiftcrew_team::Caller;

use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::app::{dto, routes::team};

pub fn router(services: &Arc<AppServices>) -> Router {
    Router::new()
        .route("/", get(list_accessible).post(register_business))
        .route("/:business_id", delete(delete_business))
        .nest("/:business_id/team", team::router(services))
}

/// Every business the caller can act on: owned plus active memberships.
pub async fn list_accessible(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<Caller>,
) -> Result<impl IntoResponse, ApiError> {
    let ids = services
        .resolver
        .accessible_business_ids(Some(&caller))
        .await?;
    let items = ids.iter().map(ToString::to_string).collect::<Vec<_>>();
    Ok(Json(serde_json::json!({ "items": items })))
}

pub async fn register_business(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<Caller>,
    Json(body): Json<dto::RegisterBusinessRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let business = services
        .team
        .register_business(Some(&caller), &body.name)
        .await?;
    Ok((StatusCode::CREATED, Json(dto::business_to_json(&business))))
}

/// Owner-only; cascades deletion to the business's team records.
pub async fn delete_business(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<Caller>,
    Path(business_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    services
        .team
        .delete_business(Some(&caller), &business_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
