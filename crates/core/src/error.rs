//! Access-denial error model.

use thiserror::Error;

/// Result type used across the access layer.
pub type AccessResult<T> = Result<T, AccessError>;

/// Why a business-scoped request was forbidden.
///
/// Denials always identify which check failed so operators can tell a stale
/// membership from a plain missing grant.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenReason {
    /// The caller has no team-member record for the target business.
    #[error("you are not a team member of this business")]
    NotTeamMember,

    /// A team-member record exists but has been deactivated.
    #[error("this team member is inactive")]
    Inactive,

    /// The caller's effective permission set does not satisfy the request.
    #[error("insufficient permissions for this business")]
    InsufficientPermissions,
}

/// Typed denial raised by the access resolver and its callers.
///
/// Every variant is deterministic for a given set of inputs and maps to a
/// stable HTTP status at the API boundary (400 / 401 / 404 / 403). None of
/// these are retried. Infrastructure failures are **not** part of this
/// taxonomy; they propagate through store-level errors instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The caller omitted a resolvable business id, or supplied a malformed
    /// identifier or payload.
    #[error("{0}")]
    InvalidRequest(String),

    /// No valid caller identity was attached to the request. Present as a
    /// defensive check; the identity middleware normally runs first.
    #[error("{0}")]
    Unauthenticated(String),

    /// The referenced business does not exist. Intentionally distinguishable
    /// from `Forbidden` (debuggability over existence-hiding).
    #[error("business not found")]
    NotFound,

    /// The business exists and the caller is identified, but is neither the
    /// owner nor a satisfying active team member.
    #[error("{0}")]
    Forbidden(ForbiddenReason),
}

impl AccessError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn forbidden(reason: ForbiddenReason) -> Self {
        Self::Forbidden(reason)
    }
}
