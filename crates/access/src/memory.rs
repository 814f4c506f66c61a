//! In-memory store implementations.
//!
//! Intended for tests/dev. Not optimized for performance.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use shiftcrew_auth::UserType;
use shiftcrew_core::{BusinessId, TeamMemberId, UserId};
use shiftcrew_team::{Business, Caller, TeamMember};

use crate::store::{BusinessStore, StoreError, TeamMemberStore, UserDirectory};

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

#[derive(Debug, Default)]
pub struct InMemoryBusinessStore {
    businesses: RwLock<HashMap<BusinessId, Business>>,
}

impl InMemoryBusinessStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BusinessStore for InMemoryBusinessStore {
    async fn find_by_id(&self, id: BusinessId) -> Result<Option<Business>, StoreError> {
        let businesses = self.businesses.read().map_err(|_| poisoned())?;
        Ok(businesses.get(&id).cloned())
    }

    async fn find_ids_by_owner(&self, owner: UserId) -> Result<Vec<BusinessId>, StoreError> {
        let businesses = self.businesses.read().map_err(|_| poisoned())?;
        Ok(businesses
            .values()
            .filter(|b| b.owner == owner)
            .map(|b| b.id)
            .collect())
    }

    async fn find_one_by_owner(&self, owner: UserId) -> Result<Option<Business>, StoreError> {
        let businesses = self.businesses.read().map_err(|_| poisoned())?;
        Ok(businesses.values().find(|b| b.owner == owner).cloned())
    }

    async fn insert(&self, business: Business) -> Result<(), StoreError> {
        let mut businesses = self.businesses.write().map_err(|_| poisoned())?;
        businesses.insert(business.id, business);
        Ok(())
    }

    async fn delete(&self, id: BusinessId) -> Result<bool, StoreError> {
        let mut businesses = self.businesses.write().map_err(|_| poisoned())?;
        Ok(businesses.remove(&id).is_some())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryTeamMemberStore {
    members: RwLock<HashMap<TeamMemberId, TeamMember>>,
}

impl InMemoryTeamMemberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamMemberStore for InMemoryTeamMemberStore {
    async fn find_by_business_and_user(
        &self,
        business: BusinessId,
        user: UserId,
    ) -> Result<Option<TeamMember>, StoreError> {
        let members = self.members.read().map_err(|_| poisoned())?;
        Ok(members
            .values()
            .find(|m| m.business == business && m.user == user)
            .cloned())
    }

    async fn find_by_business_and_email(
        &self,
        business: BusinessId,
        email: &str,
    ) -> Result<Option<TeamMember>, StoreError> {
        let members = self.members.read().map_err(|_| poisoned())?;
        Ok(members
            .values()
            .find(|m| m.business == business && m.email == email)
            .cloned())
    }

    async fn find_by_business_and_id(
        &self,
        business: BusinessId,
        id: TeamMemberId,
    ) -> Result<Option<TeamMember>, StoreError> {
        let members = self.members.read().map_err(|_| poisoned())?;
        Ok(members
            .get(&id)
            .filter(|m| m.business == business)
            .cloned())
    }

    async fn list_by_business(&self, business: BusinessId) -> Result<Vec<TeamMember>, StoreError> {
        let members = self.members.read().map_err(|_| poisoned())?;
        let mut list: Vec<TeamMember> = members
            .values()
            .filter(|m| m.business == business)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.invited_at.cmp(&b.invited_at));
        Ok(list)
    }

    async fn business_ids_for_user(
        &self,
        user: UserId,
        active_only: bool,
    ) -> Result<Vec<BusinessId>, StoreError> {
        let members = self.members.read().map_err(|_| poisoned())?;
        Ok(members
            .values()
            .filter(|m| m.user == user && (!active_only || m.active))
            .map(|m| m.business)
            .collect())
    }

    async fn insert(&self, member: TeamMember) -> Result<(), StoreError> {
        let mut members = self.members.write().map_err(|_| poisoned())?;
        // Uniqueness on (business, user) and (business, email).
        let duplicate = members.values().any(|m| {
            m.business == member.business && (m.user == member.user || m.email == member.email)
        });
        if duplicate {
            return Err(StoreError::Conflict(format!(
                "duplicate team member for business {}",
                member.business
            )));
        }
        members.insert(member.id, member);
        Ok(())
    }

    async fn update(&self, member: TeamMember) -> Result<(), StoreError> {
        let mut members = self.members.write().map_err(|_| poisoned())?;
        if !members.contains_key(&member.id) {
            return Err(StoreError::Conflict(format!(
                "no team member record {}",
                member.id
            )));
        }
        members.insert(member.id, member);
        Ok(())
    }

    async fn delete(&self, id: TeamMemberId) -> Result<bool, StoreError> {
        let mut members = self.members.write().map_err(|_| poisoned())?;
        Ok(members.remove(&id).is_some())
    }

    async fn delete_by_business(&self, business: BusinessId) -> Result<u64, StoreError> {
        let mut members = self.members.write().map_err(|_| poisoned())?;
        let before = members.len();
        members.retain(|_, m| m.business != business);
        Ok((before - members.len()) as u64)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, Caller>>,
    /// Temporary credentials handed to placeholder accounts, keyed by user.
    credentials: RwLock<HashMap<UserId, String>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing user record.
    pub fn insert(&self, user: Caller) {
        if let Ok(mut users) = self.users.write() {
            users.insert(user.id, user);
        }
    }

    /// The temporary credential assigned to a placeholder account, if any.
    pub fn temporary_credential(&self, user: UserId) -> Option<String> {
        self.credentials.read().ok()?.get(&user).cloned()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<Caller>, StoreError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create_placeholder(&self, email: &str, _name: &str) -> Result<Caller, StoreError> {
        let user = Caller::new(UserId::new(), email.to_ascii_lowercase(), UserType::Worker);
        let mut users = self.users.write().map_err(|_| poisoned())?;
        let mut credentials = self.credentials.write().map_err(|_| poisoned())?;
        credentials.insert(user.id, format!("temp-{}", Uuid::now_v7()));
        users.insert(user.id, user.clone());
        Ok(user)
    }
}
