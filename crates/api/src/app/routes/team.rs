use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};

use shiftcrew_access::{InviteMember, UpdateMember};
use shiftcrew_core::TeamMemberId;
use shiftcrew_team::Caller;

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::AccessContext;
use crate::guard::{self, GuardSpec};

pub fn router(services: &Arc<AppServices>) -> Router {
    // Reads run behind the guard; mutations go through the team service,
    // which re-enforces the resolver contract before any write.
    let reads = Router::new()
        .route("/", get(list_members))
        .route_layer(axum::middleware::from_fn_with_state(
            services.guard(GuardSpec::any_of("view_team_members")),
            guard::business_guard,
        ));
    let writes = Router::new()
        .route("/", post(invite_member))
        .route("/:member_id", patch(update_member).delete(remove_member));
    reads.merge(writes)
}

pub async fn list_members(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(access): Extension<AccessContext>,
) -> Result<impl IntoResponse, ApiError> {
    let items = services
        .members
        .list_by_business(access.business_id)
        .await?
        .iter()
        .map(dto::member_to_json)
        .collect::<Vec<_>>();
    Ok(Json(serde_json::json!({ "items": items })))
}

pub async fn invite_member(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<Caller>,
    Path(business_id): Path<String>,
    Json(body): Json<dto::InviteMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let member = services
        .team
        .invite(
            Some(&caller),
            &business_id,
            InviteMember {
                email: body.email,
                name: body.name,
                role: body.role,
                permissions: dto::to_permissions(body.permissions),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(dto::member_to_json(&member))))
}

pub async fn update_member(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<Caller>,
    Path((business_id, member_id)): Path<(String, String)>,
    Json(body): Json<dto::UpdateMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let member_id: TeamMemberId = member_id.parse()?;
    let member = services
        .team
        .update_member(
            Some(&caller),
            &business_id,
            member_id,
            UpdateMember {
                role: body.role,
                permissions: body.permissions.map(dto::to_permissions),
                active: body.active,
            },
        )
        .await?;
    Ok(Json(dto::member_to_json(&member)))
}

pub async fn remove_member(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<Caller>,
    Path((business_id, member_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let member_id: TeamMemberId = member_id.parse()?;
    services
        .team
        .remove_member(Some(&caller), &business_id, member_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
