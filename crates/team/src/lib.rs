//! `shiftcrew-team` — domain records for businesses and their teams.
//!
//! This crate contains the business and team-member records and their
//! lifecycle transitions, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod business;
pub mod caller;
pub mod error;
pub mod member;

pub use business::Business;
pub use caller::Caller;
pub use error::TeamError;
pub use member::TeamMember;
