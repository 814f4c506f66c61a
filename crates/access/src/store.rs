//! Store ports for the access layer.
//!
//! The resolver issues keyed reads only; mutation methods exist for the team
//! service. Implementations wrap whatever document store the deployment uses.
//! Failures here are infrastructure errors — they propagate as-is and are
//! never folded into access denials.

use async_trait::async_trait;
use thiserror::Error;

use shiftcrew_core::{BusinessId, TeamMemberId, UserId};
use shiftcrew_team::{Business, Caller, TeamMember};

/// Infrastructure-level store failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached or a read/write failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A write violated a uniqueness constraint. The service layer pre-checks
    /// duplicates; this is the store-level backstop.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Keyed access to business records.
#[async_trait]
pub trait BusinessStore: Send + Sync {
    async fn find_by_id(&self, id: BusinessId) -> Result<Option<Business>, StoreError>;

    /// All businesses owned by `owner`, as a single batched read.
    async fn find_ids_by_owner(&self, owner: UserId) -> Result<Vec<BusinessId>, StoreError>;

    /// The owner's primary business, if any (guard fallback for employers).
    async fn find_one_by_owner(&self, owner: UserId) -> Result<Option<Business>, StoreError>;

    async fn insert(&self, business: Business) -> Result<(), StoreError>;

    /// Returns whether a record existed.
    async fn delete(&self, id: BusinessId) -> Result<bool, StoreError>;
}

/// Keyed access to team-member records.
#[async_trait]
pub trait TeamMemberStore: Send + Sync {
    async fn find_by_business_and_user(
        &self,
        business: BusinessId,
        user: UserId,
    ) -> Result<Option<TeamMember>, StoreError>;

    async fn find_by_business_and_email(
        &self,
        business: BusinessId,
        email: &str,
    ) -> Result<Option<TeamMember>, StoreError>;

    async fn find_by_business_and_id(
        &self,
        business: BusinessId,
        id: TeamMemberId,
    ) -> Result<Option<TeamMember>, StoreError>;

    async fn list_by_business(&self, business: BusinessId) -> Result<Vec<TeamMember>, StoreError>;

    /// Business ids from the user's membership records, as a single batched
    /// read. With `active_only`, inactive records are excluded.
    async fn business_ids_for_user(
        &self,
        user: UserId,
        active_only: bool,
    ) -> Result<Vec<BusinessId>, StoreError>;

    async fn insert(&self, member: TeamMember) -> Result<(), StoreError>;

    async fn update(&self, member: TeamMember) -> Result<(), StoreError>;

    /// Hard delete of a single record. Returns whether a record existed.
    async fn delete(&self, id: TeamMemberId) -> Result<bool, StoreError>;

    /// Hard delete for the business-deletion cascade. Returns the number of
    /// records removed.
    async fn delete_by_business(&self, business: BusinessId) -> Result<u64, StoreError>;
}

/// Lookup/creation of user records for the invite path.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Caller>, StoreError>;

    /// Create a placeholder account for an invitee with no user record yet;
    /// the implementation assigns a temporary credential.
    async fn create_placeholder(&self, email: &str, name: &str) -> Result<Caller, StoreError>;
}
