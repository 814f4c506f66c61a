use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shiftcrew_auth::{Grant, Permission, Role, catalog};
use shiftcrew_core::{BusinessId, TeamMemberId, UserId};

use crate::error::TeamError;

/// A user's scoped access to a business, short of ownership.
///
/// # Invariants
/// - At most one record per (business, user) pair, and per (business, email)
///   pair — enforced by the store; constructors normalize the email so both
///   checks compare canonical forms.
/// - Explicit `permissions` only ever hold catalog entries.
/// - Deactivation flips `active` and is reversible; removal (and the
///   business-deletion cascade) deletes the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: TeamMemberId,
    pub business: BusinessId,
    pub user: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Explicit grants; may be empty, in which case the role defaults apply.
    pub permissions: Vec<Permission>,
    pub active: bool,
    pub invited_by: UserId,
    pub invited_at: DateTime<Utc>,
    pub joined_at: Option<DateTime<Utc>>,
}

/// Canonical email form used for the (business, email) uniqueness check.
pub fn normalize_email(email: &str) -> Result<String, TeamError> {
    let email = email.trim().to_ascii_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(TeamError::validation("a valid email is required"));
    }
    Ok(email)
}

impl TeamMember {
    /// Create a record for a freshly invited user.
    pub fn invite(
        business: BusinessId,
        user: UserId,
        name: impl Into<String>,
        email: &str,
        role: Role,
        permissions: Vec<Permission>,
        invited_by: UserId,
        now: DateTime<Utc>,
    ) -> Result<Self, TeamError> {
        let email = normalize_email(email)?;
        catalog::validate(&permissions)?;
        Ok(Self {
            id: TeamMemberId::new(),
            business,
            user,
            name: name.into(),
            email,
            role,
            permissions,
            active: true,
            invited_by,
            invited_at: now,
            joined_at: None,
        })
    }

    /// View this record as a grant for permission resolution.
    pub fn grant(&self) -> Grant {
        Grant::Membership {
            role: self.role,
            permissions: self.permissions.clone(),
            active: self.active,
        }
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Replace the explicit permission list. Rejects identifiers outside the
    /// catalog.
    pub fn set_permissions(&mut self, permissions: Vec<Permission>) -> Result<(), TeamError> {
        catalog::validate(&permissions)?;
        self.permissions = permissions;
        Ok(())
    }

    /// Reversible suspension; the record survives for reactivation.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn reactivate(&mut self) {
        self.active = true;
    }

    /// Record that the invitee accepted and signed in for the first time.
    pub fn mark_joined(&mut self, now: DateTime<Utc>) {
        if self.joined_at.is_none() {
            self.joined_at = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(role: Role, permissions: Vec<Permission>) -> TeamMember {
        TeamMember::invite(
            BusinessId::new(),
            UserId::new(),
            "Dana",
            "Dana@Example.COM ",
            role,
            permissions,
            UserId::new(),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn invite_normalizes_the_email() {
        let m = member(Role::Staff, vec![]);
        assert_eq!(m.email, "dana@example.com");
        assert!(m.active);
        assert!(m.joined_at.is_none());
    }

    #[test]
    fn invite_rejects_unknown_permissions() {
        let err = TeamMember::invite(
            BusinessId::new(),
            UserId::new(),
            "Dana",
            "dana@example.com",
            Role::Staff,
            vec![Permission::new("fly_helicopters")],
            UserId::new(),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, TeamError::UnknownPermission(_)));
    }

    #[test]
    fn invite_rejects_a_blank_email() {
        let err = TeamMember::invite(
            BusinessId::new(),
            UserId::new(),
            "Dana",
            "  ",
            Role::Staff,
            vec![],
            UserId::new(),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, TeamError::Validation(_)));
    }

    #[test]
    fn grant_reflects_role_permissions_and_active_flag() {
        let mut m = member(Role::Staff, vec![Permission::new("edit_jobs")]);
        assert!(m.grant().has_all(&[Permission::new("edit_jobs")]));
        m.deactivate();
        assert!(!m.grant().is_active());
        m.reactivate();
        assert!(m.grant().is_active());
    }

    #[test]
    fn mark_joined_is_idempotent() {
        let mut m = member(Role::Staff, vec![]);
        let first = Utc::now();
        m.mark_joined(first);
        m.mark_joined(first + chrono::Duration::hours(1));
        assert_eq!(m.joined_at, Some(first));
    }
}
