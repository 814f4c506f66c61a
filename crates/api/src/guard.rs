//! Request guard: resolves business access before a handler runs.
//!
//! The guard locates the target business id from the request (path param,
//! JSON body, query string, header, then caller defaults), runs the resolver
//! with the route's required permissions, and attaches the result as an
//! [`AccessContext`] extension. Handlers behind the guard never re-resolve.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    RequestPartsExt,
    body::{Body, to_bytes},
    extract::{Path, Query, Request, State},
    middleware::Next,
    response::Response,
};

use shiftcrew_access::{AccessResolver, BusinessStore, RequiredPermissions, ResolveOptions};
use shiftcrew_core::AccessError;
use shiftcrew_team::Caller;

use crate::app::errors::ApiError;
use crate::context::AccessContext;

/// JSON bodies are only sniffed up to this many bytes.
const BODY_SNIFF_LIMIT: usize = 1 << 20;

/// Per-route guard configuration.
#[derive(Debug, Clone)]
pub struct GuardSpec {
    pub required: RequiredPermissions,
    pub options: ResolveOptions,
    /// When false, a request without any resolvable business id passes
    /// through unguarded (no `AccessContext` is attached).
    pub require_business_id: bool,
}

impl GuardSpec {
    /// Membership alone is enough.
    pub fn member() -> Self {
        Self {
            required: RequiredPermissions::none(),
            options: ResolveOptions::default(),
            require_business_id: true,
        }
    }

    /// Any one of the given permissions satisfies the route.
    pub fn any_of(required: impl Into<RequiredPermissions>) -> Self {
        Self {
            required: required.into(),
            options: ResolveOptions::default(),
            require_business_id: true,
        }
    }

    /// Every one of the given permissions is required.
    pub fn all_of(required: impl Into<RequiredPermissions>) -> Self {
        Self {
            required: required.into(),
            options: ResolveOptions {
                require_all: true,
                ..ResolveOptions::default()
            },
            require_business_id: true,
        }
    }

    pub fn optional(mut self) -> Self {
        self.require_business_id = false;
        self
    }
}

/// State handed to [`business_guard`] via `from_fn_with_state`.
#[derive(Clone)]
pub struct GuardState {
    pub resolver: AccessResolver,
    pub businesses: Arc<dyn BusinessStore>,
    pub spec: GuardSpec,
}

pub async fn business_guard(
    State(state): State<GuardState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = req.into_parts();
    let caller = parts.extensions.get::<Caller>().cloned();

    // Highest-priority source: a `business_id` path parameter.
    let mut business_id: Option<String> = None;
    if let Ok(Path(params)) = parts.extract::<Path<HashMap<String, String>>>().await {
        business_id = params.get("business_id").cloned();
    }

    // JSON bodies may carry a `businessId` field. The body is buffered and
    // reattached so the handler still sees it.
    let body = if business_id.is_none() && is_json(&parts.headers) {
        let bytes = to_bytes(body, BODY_SNIFF_LIMIT)
            .await
            .map_err(|_| AccessError::invalid_request("request body too large"))?;
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&bytes) {
            business_id = value
                .get("businessId")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned);
        }
        Body::from(bytes)
    } else {
        body
    };

    if business_id.is_none() {
        if let Ok(Query(params)) = parts.extract::<Query<HashMap<String, String>>>().await {
            business_id = params.get("businessId").cloned();
        }
    }

    if business_id.is_none() {
        business_id = parts
            .headers
            .get("x-business-id")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());
    }

    // Caller defaults: the business selected in their session, then (for
    // employers) their sole owned business.
    if business_id.is_none() {
        business_id = caller
            .as_ref()
            .and_then(|c| c.selected_business)
            .map(|b| b.to_string());
    }
    if business_id.is_none() {
        if let Some(employer) = caller.as_ref().filter(|c| c.is_employer()) {
            business_id = state
                .businesses
                .find_one_by_owner(employer.id)
                .await?
                .map(|b| b.id.to_string());
        }
    }

    let Some(business_id) = business_id else {
        if state.spec.require_business_id {
            return Err(AccessError::invalid_request(
                "businessId is required (path, body, query, or x-business-id header)",
            )
            .into());
        }
        return Ok(next.run(Request::from_parts(parts, body)).await);
    };

    let access = state
        .resolver
        .resolve(
            caller.as_ref(),
            &business_id,
            &state.spec.required,
            state.spec.options,
        )
        .await?;
    parts.extensions.insert(AccessContext::from(&access));

    Ok(next.run(Request::from_parts(parts, body)).await)
}

fn is_json(headers: &axum::http::HeaderMap) -> bool {
    headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}
