//! Team mutation service.
//!
//! Mutations (inviting, editing roles/permissions, deactivating, deleting)
//! live outside the resolver's read path and re-enforce the same resolver
//! contract before any write. No partial side effects: every denial happens
//! before the first store mutation.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use shiftcrew_auth::{Permission, Role};
use shiftcrew_core::{AccessError, BusinessId, ForbiddenReason, TeamMemberId};
use shiftcrew_team::{Business, Caller, TeamError, TeamMember, member::normalize_email};

use crate::resolver::{AccessResolver, ResolveError, ResolveOptions};
use crate::store::{BusinessStore, StoreError, TeamMemberStore, UserDirectory};

#[derive(Debug, Error)]
pub enum TeamServiceError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Domain(#[from] TeamError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("team member not found")]
    MemberNotFound,
}

impl From<AccessError> for TeamServiceError {
    fn from(err: AccessError) -> Self {
        Self::Resolve(ResolveError::Denied(err))
    }
}

/// Invite payload. A missing role defaults to `staff`; explicit permissions
/// may be empty (role defaults then apply).
#[derive(Debug, Clone)]
pub struct InviteMember {
    pub email: String,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub permissions: Vec<Permission>,
}

/// Partial update for an existing record.
#[derive(Debug, Clone, Default)]
pub struct UpdateMember {
    pub role: Option<Role>,
    pub permissions: Option<Vec<Permission>>,
    pub active: Option<bool>,
}

/// Orchestrates team-membership writes behind the resolver contract.
#[derive(Clone)]
pub struct TeamService {
    resolver: AccessResolver,
    businesses: Arc<dyn BusinessStore>,
    members: Arc<dyn TeamMemberStore>,
    users: Arc<dyn UserDirectory>,
}

impl TeamService {
    pub fn new(
        resolver: AccessResolver,
        businesses: Arc<dyn BusinessStore>,
        members: Arc<dyn TeamMemberStore>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            resolver,
            businesses,
            members,
            users,
        }
    }

    /// Register a new business owned by the caller.
    pub async fn register_business(
        &self,
        caller: Option<&Caller>,
        name: &str,
    ) -> Result<Business, TeamServiceError> {
        let caller =
            caller.ok_or_else(|| AccessError::unauthenticated("authentication required"))?;
        let business = Business::register(caller, name, Utc::now())?;
        self.businesses.insert(business.clone()).await?;
        tracing::info!(business = %business.id, owner = %caller.id, "business registered");
        Ok(business)
    }

    pub async fn list_members(
        &self,
        caller: Option<&Caller>,
        business_id: &str,
    ) -> Result<Vec<TeamMember>, TeamServiceError> {
        let access = self
            .resolver
            .resolve(
                caller,
                business_id,
                &"view_team_members".into(),
                ResolveOptions::default(),
            )
            .await?;
        Ok(self.members.list_by_business(access.business.id).await?)
    }

    /// Invite a user onto the team.
    ///
    /// Creates a placeholder user record (with a temporary credential) when
    /// the email has none yet. Rejects duplicate invites on both the
    /// (business, user) and (business, email) axes.
    pub async fn invite(
        &self,
        caller: Option<&Caller>,
        business_id: &str,
        invite: InviteMember,
    ) -> Result<TeamMember, TeamServiceError> {
        let access = self
            .resolver
            .resolve(
                caller,
                business_id,
                &"invite_team_members".into(),
                ResolveOptions::default(),
            )
            .await?;
        let business = access.business;
        let email = normalize_email(&invite.email)?;

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                let name = invite
                    .name
                    .as_deref()
                    .unwrap_or_else(|| email.split('@').next().unwrap_or(&email));
                let user = self.users.create_placeholder(&email, name).await?;
                tracing::info!(user = %user.id, "placeholder user created for invite");
                user
            }
        };

        if self
            .members
            .find_by_business_and_user(business.id, user.id)
            .await?
            .is_some()
        {
            return Err(TeamError::AlreadyTeamMember.into());
        }
        if self
            .members
            .find_by_business_and_email(business.id, &email)
            .await?
            .is_some()
        {
            return Err(TeamError::EmailAlreadyInvited.into());
        }

        // The resolve above already proved the caller is owner or member.
        let invited_by = caller.map(|c| c.id).unwrap_or(business.owner);
        let member = TeamMember::invite(
            business.id,
            user.id,
            invite.name.unwrap_or_else(|| email.clone()),
            &email,
            invite.role.unwrap_or(Role::Staff),
            invite.permissions,
            invited_by,
            Utc::now(),
        )?;
        self.members.insert(member.clone()).await?;
        tracing::info!(member = %member.id, business = %business.id, "team member invited");
        Ok(member)
    }

    /// Edit role / explicit permissions / active flag.
    pub async fn update_member(
        &self,
        caller: Option<&Caller>,
        business_id: &str,
        member_id: TeamMemberId,
        update: UpdateMember,
    ) -> Result<TeamMember, TeamServiceError> {
        let access = self
            .resolver
            .resolve(
                caller,
                business_id,
                &"edit_team_members".into(),
                ResolveOptions::default(),
            )
            .await?;

        let mut member = self
            .members
            .find_by_business_and_id(access.business.id, member_id)
            .await?
            .ok_or(TeamServiceError::MemberNotFound)?;

        if let Some(role) = update.role {
            member.set_role(role);
        }
        if let Some(permissions) = update.permissions {
            member.set_permissions(permissions)?;
        }
        match update.active {
            Some(true) => member.reactivate(),
            Some(false) => member.deactivate(),
            None => {}
        }

        self.members.update(member.clone()).await?;
        Ok(member)
    }

    /// Remove a member outright. For a reversible suspension, use
    /// [`Self::update_member`] with `active: false` instead.
    pub async fn remove_member(
        &self,
        caller: Option<&Caller>,
        business_id: &str,
        member_id: TeamMemberId,
    ) -> Result<(), TeamServiceError> {
        let access = self
            .resolver
            .resolve(
                caller,
                business_id,
                &"remove_team_members".into(),
                ResolveOptions::default(),
            )
            .await?;

        // Scope the lookup to the resolved business so a member id from
        // another business cannot be deleted through this path.
        let member = self
            .members
            .find_by_business_and_id(access.business.id, member_id)
            .await?
            .ok_or(TeamServiceError::MemberNotFound)?;
        self.members.delete(member.id).await?;
        tracing::info!(member = %member.id, business = %access.business.id, "team member removed");
        Ok(())
    }

    /// Delete a business. Owner-only; cascades a hard delete to every
    /// team-member record for that business.
    pub async fn delete_business(
        &self,
        caller: Option<&Caller>,
        business_id: &str,
    ) -> Result<(), TeamServiceError> {
        let access = self
            .resolver
            .resolve(
                caller,
                business_id,
                &"delete_business".into(),
                ResolveOptions::default(),
            )
            .await?;
        if !access.is_owner {
            return Err(AccessError::forbidden(ForbiddenReason::InsufficientPermissions).into());
        }

        let id: BusinessId = access.business.id;
        self.businesses.delete(id).await?;
        let removed = self.members.delete_by_business(id).await?;
        tracing::info!(business = %id, removed, "business deleted with team cascade");
        Ok(())
    }
}
