use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shiftcrew_core::{BusinessId, UserId};

use crate::caller::Caller;
use crate::error::TeamError;

/// A business: the unit every access decision is scoped to.
///
/// # Invariants
/// - Exactly one owner; the owner reference is immutable after registration.
/// - Ownership confers unconditional access to every catalog permission,
///   bypassing the team-membership path entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    pub id: BusinessId,
    pub owner: UserId,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Business {
    /// Register a new business for `owner`.
    ///
    /// Only employer accounts own businesses.
    pub fn register(
        owner: &Caller,
        name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, TeamError> {
        if !owner.is_employer() {
            return Err(TeamError::OwnerMustBeEmployer);
        }
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(TeamError::validation("business name must not be empty"));
        }
        Ok(Self {
            id: BusinessId::new(),
            owner: owner.id,
            name,
            active: true,
            created_at: now,
        })
    }

    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner == user
    }
}
