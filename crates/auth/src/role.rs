use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog;
use crate::permission::Permission;

/// Team-member role within a business.
///
/// A closed enumeration; the default permission subset for each role lives in
/// [`crate::catalog`]. `Owner` and `Admin` resolve to the full catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    Manager,
    Supervisor,
    Staff,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Supervisor => "supervisor",
            Role::Staff => "staff",
        }
    }

    /// Whether this role grants the full catalog regardless of any explicit
    /// permission list (delegated admins match real owners).
    pub fn grants_full_catalog(&self) -> bool {
        matches!(self, Role::Owner | Role::Admin)
    }

    /// Default permission set for this role.
    pub fn default_permissions(&self) -> BTreeSet<Permission> {
        catalog::defaults_for_role(self.as_str())
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "owner" => Ok(Role::Owner),
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "supervisor" => Ok(Role::Supervisor),
            "staff" => Ok(Role::Staff),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!("STAFF".parse::<Role>().unwrap(), Role::Staff);
        assert!("recruiter".parse::<Role>().is_err());
    }

    #[test]
    fn only_owner_and_admin_grant_the_full_catalog() {
        assert!(Role::Owner.grants_full_catalog());
        assert!(Role::Admin.grants_full_catalog());
        assert!(!Role::Manager.grants_full_catalog());
        assert!(!Role::Supervisor.grants_full_catalog());
        assert!(!Role::Staff.grants_full_catalog());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Supervisor).unwrap(), "\"supervisor\"");
    }
}
