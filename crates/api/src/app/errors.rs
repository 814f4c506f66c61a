//! Consistent JSON error responses.
//!
//! Each denial kind maps to a stable status code and a message safe to show
//! directly to the end user (no internal identifiers or stack traces).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use shiftcrew_access::{ResolveError, StoreError, TeamServiceError};
use shiftcrew_core::AccessError;
use shiftcrew_team::TeamError;

/// Response-shaped error for handlers and middleware (`?`-friendly).
pub struct ApiError(Response);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.0
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn access_error_to_response(err: &AccessError) -> Response {
    match err {
        AccessError::InvalidRequest(msg) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
        }
        AccessError::Unauthenticated(msg) => {
            json_error(StatusCode::UNAUTHORIZED, "unauthenticated", msg.clone())
        }
        AccessError::NotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", "business not found")
        }
        AccessError::Forbidden(reason) => {
            json_error(StatusCode::FORBIDDEN, "forbidden", reason.to_string())
        }
    }
}

fn store_error_to_response(err: &StoreError) -> Response {
    tracing::error!(error = %err, "store failure");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "store_error",
        "storage is temporarily unavailable",
    )
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        Self(access_error_to_response(&err))
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Denied(e) => e.into(),
            ResolveError::Store(e) => Self(store_error_to_response(&e)),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(store_error_to_response(&err))
    }
}

impl From<TeamServiceError> for ApiError {
    fn from(err: TeamServiceError) -> Self {
        match err {
            TeamServiceError::Resolve(e) => e.into(),
            TeamServiceError::Store(e) => e.into(),
            TeamServiceError::MemberNotFound => Self(json_error(
                StatusCode::NOT_FOUND,
                "not_found",
                "team member not found",
            )),
            TeamServiceError::Domain(e) => match e {
                TeamError::OwnerMustBeEmployer => {
                    Self(json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string()))
                }
                other => Self(json_error(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    other.to_string(),
                )),
            },
        }
    }
}
