use std::sync::Arc;

use shiftcrew_access::{
    AccessResolver, BusinessStore, InMemoryBusinessStore, InMemoryTeamMemberStore,
    InMemoryUserDirectory, TeamMemberStore, TeamService, UserDirectory,
};

use crate::guard::{GuardSpec, GuardState};

/// Service graph shared by every handler.
pub struct AppServices {
    pub resolver: AccessResolver,
    pub team: TeamService,
    pub businesses: Arc<dyn BusinessStore>,
    pub members: Arc<dyn TeamMemberStore>,
    pub users: Arc<dyn UserDirectory>,
}

impl AppServices {
    pub fn new(
        businesses: Arc<dyn BusinessStore>,
        members: Arc<dyn TeamMemberStore>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        let resolver = AccessResolver::new(businesses.clone(), members.clone());
        let team = TeamService::new(
            resolver.clone(),
            businesses.clone(),
            members.clone(),
            users.clone(),
        );
        Self {
            resolver,
            team,
            businesses,
            members,
            users,
        }
    }

    /// In-memory wiring (tests and dev).
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryBusinessStore::new()),
            Arc::new(InMemoryTeamMemberStore::new()),
            Arc::new(InMemoryUserDirectory::new()),
        )
    }

    /// Guard state for a route with the given spec.
    pub fn guard(&self, spec: GuardSpec) -> GuardState {
        GuardState {
            resolver: self.resolver.clone(),
            businesses: self.businesses.clone(),
            spec,
        }
    }
}
