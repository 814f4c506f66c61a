//! Domain error model for business/team records.

use thiserror::Error;

use shiftcrew_auth::UnknownPermission;

/// Deterministic domain failures raised by record constructors and
/// lifecycle transitions. Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TeamError {
    /// Only employer-type users may own a business.
    #[error("only employer accounts can own a business")]
    OwnerMustBeEmployer,

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The (business, user) pair already has a team-member record.
    #[error("user is already a team member of this business")]
    AlreadyTeamMember,

    /// The (business, email) pair already has a pending or active invite.
    #[error("email is already invited to this business")]
    EmailAlreadyInvited,

    /// An explicit permission grant referenced an identifier outside the
    /// catalog.
    #[error(transparent)]
    UnknownPermission(#[from] UnknownPermission),
}

impl TeamError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
