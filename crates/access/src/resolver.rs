//! The access resolver: sole authority for "can user U perform an action
//! requiring permission set P on business B".
//!
//! Resolution is a pure query — at most two sequential keyed reads (business,
//! then team member, the second conditioned on the first), no writes, no
//! cross-request cache. Repeated calls with unchanged records yield identical
//! results, so a permission edit takes effect on the very next request.

use std::collections::BTreeSet;
use std::sync::Arc;

use thiserror::Error;

use shiftcrew_auth::{Grant, Permission};
use shiftcrew_core::{AccessError, BusinessId, ForbiddenReason};
use shiftcrew_team::{Business, Caller, TeamMember};

use crate::store::{BusinessStore, StoreError, TeamMemberStore};

/// Resolution failure: either a typed denial for the caller, or an
/// infrastructure error from the backing store. The two never mix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    Denied(#[from] AccessError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Knobs for a single resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// With multiple required permissions: `true` means all must be present,
    /// `false` means any one suffices.
    pub require_all: bool,
    /// Whether an inactive team-member record is rejected. Defaults to true.
    pub require_active: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            require_all: false,
            require_active: true,
        }
    }
}

/// The permissions a guarded operation demands, normalized to a list.
/// An empty list means "membership alone is enough".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredPermissions(Vec<Permission>);

impl RequiredPermissions {
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Permission] {
        &self.0
    }
}

impl From<Permission> for RequiredPermissions {
    fn from(value: Permission) -> Self {
        Self(vec![value])
    }
}

impl From<&'static str> for RequiredPermissions {
    fn from(value: &'static str) -> Self {
        Self(vec![Permission::new(value)])
    }
}

impl From<Vec<Permission>> for RequiredPermissions {
    fn from(value: Vec<Permission>) -> Self {
        Self(value)
    }
}

impl From<&[&'static str]> for RequiredPermissions {
    fn from(value: &[&'static str]) -> Self {
        Self(value.iter().map(|p| Permission::new(*p)).collect())
    }
}

impl FromIterator<Permission> for RequiredPermissions {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Outcome of a successful resolution. Ephemeral — computed fresh per
/// request, attached to the request context, never cached across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAccess {
    pub business: Business,
    pub is_owner: bool,
    pub team_member: Option<TeamMember>,
    pub effective_permissions: BTreeSet<Permission>,
}

impl ResolvedAccess {
    /// Membership test against the effective set, for reuse within the same
    /// request (avoids a second resolution).
    pub fn has(&self, permission: &Permission) -> bool {
        self.effective_permissions.contains(permission)
    }
}

/// The resolver. Cheap to clone; holds only store handles.
#[derive(Clone)]
pub struct AccessResolver {
    businesses: Arc<dyn BusinessStore>,
    members: Arc<dyn TeamMemberStore>,
}

impl AccessResolver {
    pub fn new(businesses: Arc<dyn BusinessStore>, members: Arc<dyn TeamMemberStore>) -> Self {
        Self { businesses, members }
    }

    /// Resolve the caller's access to `business_id`.
    ///
    /// Ownership short-circuits *before* any permission check: owners are the
    /// accountable party and must never be locked out by a missing catalog
    /// entry or a misconfigured role table.
    pub async fn resolve(
        &self,
        caller: Option<&Caller>,
        business_id: &str,
        required: &RequiredPermissions,
        options: ResolveOptions,
    ) -> Result<ResolvedAccess, ResolveError> {
        // 1. Normalize the target id.
        let business_id = business_id.trim();
        if business_id.is_empty() {
            return Err(AccessError::invalid_request("business id is required").into());
        }
        let business_id: BusinessId = business_id.parse()?;

        // 2. Load the business.
        let business = self
            .businesses
            .find_by_id(business_id)
            .await?
            .ok_or(AccessError::NotFound)?;

        // 3. Defensive identity check; the identity middleware normally runs
        // first.
        let caller =
            caller.ok_or_else(|| AccessError::unauthenticated("authentication required"))?;

        // 4. Owner short-circuit: no membership lookup, no permission check.
        if business.is_owned_by(caller.id) {
            return Ok(ResolvedAccess {
                business,
                is_owner: true,
                team_member: None,
                effective_permissions: Grant::Ownership.effective_permissions(),
            });
        }

        // 5. Membership lookup for (business, user).
        let member = self
            .members
            .find_by_business_and_user(business.id, caller.id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(user = %caller.id, business = %business.id, "not a team member");
                AccessError::forbidden(ForbiddenReason::NotTeamMember)
            })?;

        // 6. Stale-membership check.
        if options.require_active && !member.active {
            tracing::debug!(user = %caller.id, business = %business.id, "inactive team member");
            return Err(AccessError::forbidden(ForbiddenReason::Inactive).into());
        }

        // 7. Effective set: explicit grants ∪ role defaults, with the
        // owner/admin roles aliasing the full catalog inside the grant.
        let grant = member.grant();
        let effective_permissions = grant.effective_permissions();

        // 8. Required-permission satisfaction.
        if !required.is_empty() {
            let satisfied = if options.require_all {
                grant.has_all(required.as_slice())
            } else {
                grant.has_any(required.as_slice())
            };
            if !satisfied {
                tracing::debug!(
                    user = %caller.id,
                    business = %business.id,
                    required = ?required.as_slice(),
                    "insufficient permissions"
                );
                return Err(
                    AccessError::forbidden(ForbiddenReason::InsufficientPermissions).into(),
                );
            }
        }

        // 9. Full result for the caller to reuse within this request.
        Ok(ResolvedAccess {
            business,
            is_owner: false,
            team_member: Some(member),
            effective_permissions,
        })
    }

    /// Every business the caller can act on at all: owned ∪ active
    /// memberships. No permission filtering — callers apply the resolver
    /// afterward for mutating operations.
    ///
    /// Two batched source reads, issued concurrently, merged locally.
    pub async fn accessible_business_ids(
        &self,
        caller: Option<&Caller>,
    ) -> Result<BTreeSet<BusinessId>, ResolveError> {
        let Some(caller) = caller else {
            return Ok(BTreeSet::new());
        };

        let (owned, memberships) = tokio::join!(
            self.businesses.find_ids_by_owner(caller.id),
            self.members.business_ids_for_user(caller.id, true),
        );

        let mut ids: BTreeSet<BusinessId> = owned?.into_iter().collect();
        ids.extend(memberships?);
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shiftcrew_auth::{Role, UserType, catalog};
    use shiftcrew_core::UserId;
    use shiftcrew_team::Business;

    use crate::memory::{InMemoryBusinessStore, InMemoryTeamMemberStore};

    struct Fixture {
        resolver: AccessResolver,
        businesses: Arc<InMemoryBusinessStore>,
        members: Arc<InMemoryTeamMemberStore>,
        owner: Caller,
        business: Business,
    }

    async fn fixture() -> Fixture {
        let businesses = Arc::new(InMemoryBusinessStore::new());
        let members = Arc::new(InMemoryTeamMemberStore::new());
        let owner = Caller::new(UserId::new(), "owner@example.com", UserType::Employer);
        let business = Business::register(&owner, "Harbor Cafe", Utc::now()).unwrap();
        businesses.insert(business.clone()).await.unwrap();
        let resolver = AccessResolver::new(businesses.clone(), members.clone());
        Fixture {
            resolver,
            businesses,
            members,
            owner,
            business,
        }
    }

    async fn add_member(
        fx: &Fixture,
        role: Role,
        permissions: Vec<Permission>,
        active: bool,
    ) -> Caller {
        let user = Caller::new(UserId::new(), "member@example.com", UserType::Worker);
        let mut member = TeamMember::invite(
            fx.business.id,
            user.id,
            "Member",
            "member@example.com",
            role,
            permissions,
            fx.owner.id,
            Utc::now(),
        )
        .unwrap();
        member.active = active;
        fx.members.insert(member).await.unwrap();
        user
    }

    fn perm(name: &'static str) -> Permission {
        Permission::new(name)
    }

    #[tokio::test]
    async fn owner_succeeds_with_any_permission_and_no_membership() {
        let fx = fixture().await;
        let access = fx
            .resolver
            .resolve(
                Some(&fx.owner),
                &fx.business.id.to_string(),
                &"delete_business".into(),
                ResolveOptions::default(),
            )
            .await
            .unwrap();
        assert!(access.is_owner);
        assert!(access.team_member.is_none());
        assert_eq!(access.effective_permissions, *catalog::all());
    }

    #[tokio::test]
    async fn owner_bypass_survives_an_inactive_membership_record() {
        let fx = fixture().await;
        // A stale membership record for the owner must not matter.
        let mut member = TeamMember::invite(
            fx.business.id,
            fx.owner.id,
            "Owner",
            "owner@example.com",
            Role::Staff,
            vec![],
            fx.owner.id,
            Utc::now(),
        )
        .unwrap();
        member.active = false;
        fx.members.insert(member).await.unwrap();

        let access = fx
            .resolver
            .resolve(
                Some(&fx.owner),
                &fx.business.id.to_string(),
                &"manage_permissions".into(),
                ResolveOptions::default(),
            )
            .await
            .unwrap();
        assert!(access.is_owner);
    }

    #[tokio::test]
    async fn staff_defaults_exclude_edit_jobs() {
        let fx = fixture().await;
        let user = add_member(&fx, Role::Staff, vec![], true).await;
        let err = fx
            .resolver
            .resolve(
                Some(&user),
                &fx.business.id.to_string(),
                &"edit_jobs".into(),
                ResolveOptions::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::Denied(AccessError::Forbidden(
                ForbiddenReason::InsufficientPermissions
            ))
        );
    }

    #[tokio::test]
    async fn explicit_grant_satisfies_the_requirement() {
        let fx = fixture().await;
        let user = add_member(&fx, Role::Staff, vec![perm("edit_jobs")], true).await;
        let access = fx
            .resolver
            .resolve(
                Some(&user),
                &fx.business.id.to_string(),
                &"edit_jobs".into(),
                ResolveOptions::default(),
            )
            .await
            .unwrap();
        assert!(!access.is_owner);
        assert!(access.has(&perm("edit_jobs")));
        // Union with the role defaults, not a replacement.
        assert!(access.effective_permissions.is_superset(&Role::Staff.default_permissions()));
    }

    #[tokio::test]
    async fn inactive_member_is_forbidden_even_with_the_grant() {
        let fx = fixture().await;
        let user = add_member(&fx, Role::Staff, vec![perm("edit_jobs")], false).await;
        let err = fx
            .resolver
            .resolve(
                Some(&user),
                &fx.business.id.to_string(),
                &"edit_jobs".into(),
                ResolveOptions::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::Denied(AccessError::Forbidden(ForbiddenReason::Inactive))
        );
    }

    #[tokio::test]
    async fn inactive_member_passes_when_require_active_is_off() {
        let fx = fixture().await;
        let user = add_member(&fx, Role::Staff, vec![], false).await;
        let access = fx
            .resolver
            .resolve(
                Some(&user),
                &fx.business.id.to_string(),
                &RequiredPermissions::none(),
                ResolveOptions {
                    require_active: false,
                    ..ResolveOptions::default()
                },
            )
            .await
            .unwrap();
        assert!(!access.team_member.unwrap().active);
    }

    #[tokio::test]
    async fn admin_role_aliases_the_full_catalog() {
        let fx = fixture().await;
        let user = add_member(&fx, Role::Admin, vec![], true).await;
        let access = fx
            .resolver
            .resolve(
                Some(&user),
                &fx.business.id.to_string(),
                &"manage_integrations".into(),
                ResolveOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(access.effective_permissions, *catalog::all());
    }

    #[tokio::test]
    async fn require_all_fails_on_a_partial_set_but_any_of_passes() {
        let fx = fixture().await;
        let user = add_member(&fx, Role::Staff, vec![perm("edit_jobs")], true).await;
        let required: RequiredPermissions = vec![perm("edit_jobs"), perm("delete_jobs")].into();

        let err = fx
            .resolver
            .resolve(
                Some(&user),
                &fx.business.id.to_string(),
                &required,
                ResolveOptions {
                    require_all: true,
                    ..ResolveOptions::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Denied(AccessError::Forbidden(
                ForbiddenReason::InsufficientPermissions
            ))
        ));

        fx.resolver
            .resolve(
                Some(&user),
                &fx.business.id.to_string(),
                &required,
                ResolveOptions::default(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_member_gets_forbidden_not_a_team_member() {
        let fx = fixture().await;
        let stranger = Caller::new(UserId::new(), "s@example.com", UserType::Worker);
        let err = fx
            .resolver
            .resolve(
                Some(&stranger),
                &fx.business.id.to_string(),
                &"view_jobs".into(),
                ResolveOptions::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ResolveError::Denied(AccessError::Forbidden(ForbiddenReason::NotTeamMember))
        );
    }

    #[tokio::test]
    async fn missing_business_is_not_found_never_forbidden() {
        let fx = fixture().await;
        let err = fx
            .resolver
            .resolve(
                Some(&fx.owner),
                &BusinessId::new().to_string(),
                &"view_jobs".into(),
                ResolveOptions::default(),
            )
            .await
            .unwrap_err();
        assert_eq!(err, ResolveError::Denied(AccessError::NotFound));
    }

    #[tokio::test]
    async fn malformed_business_id_is_invalid_request_before_lookup() {
        let fx = fixture().await;
        let err = fx
            .resolver
            .resolve(
                Some(&fx.owner),
                "not-a-real-id",
                &"view_jobs".into(),
                ResolveOptions::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Denied(AccessError::InvalidRequest(_))
        ));

        let err = fx
            .resolver
            .resolve(
                Some(&fx.owner),
                "   ",
                &"view_jobs".into(),
                ResolveOptions::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Denied(AccessError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn missing_caller_is_unauthenticated() {
        let fx = fixture().await;
        let err = fx
            .resolver
            .resolve(
                None,
                &fx.business.id.to_string(),
                &"view_jobs".into(),
                ResolveOptions::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Denied(AccessError::Unauthenticated(_))
        ));
    }

    #[tokio::test]
    async fn resolution_is_idempotent() {
        let fx = fixture().await;
        let user = add_member(&fx, Role::Supervisor, vec![], true).await;
        let required: RequiredPermissions = "manage_schedules".into();
        let first = fx
            .resolver
            .resolve(
                Some(&user),
                &fx.business.id.to_string(),
                &required,
                ResolveOptions::default(),
            )
            .await
            .unwrap();
        let second = fx
            .resolver
            .resolve(
                Some(&user),
                &fx.business.id.to_string(),
                &required,
                ResolveOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn accessible_set_unions_owned_and_active_memberships() {
        let fx = fixture().await;

        // The owner also works an active shift at someone else's business,
        // and holds a stale membership at a third.
        let other_owner = Caller::new(UserId::new(), "other@example.com", UserType::Employer);
        let second = Business::register(&other_owner, "Dockside Deli", Utc::now()).unwrap();
        let third = Business::register(&other_owner, "Pier Nine", Utc::now()).unwrap();
        fx.businesses.insert(second.clone()).await.unwrap();
        fx.businesses.insert(third.clone()).await.unwrap();

        let active = TeamMember::invite(
            second.id,
            fx.owner.id,
            "Owner",
            "owner@example.com",
            Role::Staff,
            vec![],
            other_owner.id,
            Utc::now(),
        )
        .unwrap();
        fx.members.insert(active).await.unwrap();

        let mut stale = TeamMember::invite(
            third.id,
            fx.owner.id,
            "Owner",
            "owner@example.com",
            Role::Manager,
            vec![],
            other_owner.id,
            Utc::now(),
        )
        .unwrap();
        stale.active = false;
        fx.members.insert(stale).await.unwrap();

        let ids = fx
            .resolver
            .accessible_business_ids(Some(&fx.owner))
            .await
            .unwrap();
        assert!(ids.contains(&fx.business.id));
        assert!(ids.contains(&second.id));
        assert!(!ids.contains(&third.id));

        // A user with no relation to anything sees an empty set.
        let stranger = Caller::new(UserId::new(), "s@example.com", UserType::Worker);
        let ids = fx
            .resolver
            .accessible_business_ids(Some(&stranger))
            .await
            .unwrap();
        assert!(ids.is_empty());

        // No caller, no reachable businesses.
        let ids = fx.resolver.accessible_business_ids(None).await.unwrap();
        assert!(ids.is_empty());
    }
}
