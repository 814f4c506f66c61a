//! `shiftcrew-access` — the business access & permission resolution core.
//!
//! This crate answers "can user U perform an action requiring permission set P
//! on business B". It is defined against async store ports so the surrounding
//! document store stays an external collaborator; in-memory implementations
//! back tests and dev.

pub mod memory;
pub mod resolver;
pub mod service;
pub mod store;

pub use memory::{InMemoryBusinessStore, InMemoryTeamMemberStore, InMemoryUserDirectory};
pub use resolver::{
    AccessResolver, RequiredPermissions, ResolveError, ResolveOptions, ResolvedAccess,
};
pub use service::{InviteMember, TeamService, TeamServiceError, UpdateMember};
pub use store::{BusinessStore, StoreError, TeamMemberStore, UserDirectory};
