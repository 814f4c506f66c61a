//! `shiftcrew-auth` — pure authorization vocabulary for business-scoped access.
//!
//! This crate is intentionally decoupled from HTTP and storage. It owns the
//! closed permission catalog, the role enumeration with its default grants,
//! the consolidated grant representation, and deterministic claims validation.

pub mod catalog;
pub mod claims;
pub mod grant;
pub mod permission;
pub mod role;

pub use catalog::UnknownPermission;
pub use claims::{CallerClaims, TokenValidationError, UserType, validate_claims};
pub use grant::{Grant, LegacyAccessFlags};
pub use permission::Permission;
pub use role::{Role, UnknownRole};
