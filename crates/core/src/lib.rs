//! `shiftcrew-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers and the access-denial error model shared by
//! every other crate in the workspace.

pub mod error;
pub mod id;

pub use error::{AccessError, AccessResult, ForbiddenReason};
pub use id::{BusinessId, TeamMemberId, UserId};
