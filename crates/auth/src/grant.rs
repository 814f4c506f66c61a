//! Consolidated grant representation.
//!
//! The system historically carried two grant vocabularies: the team-member
//! model (role + explicit permission list) and a legacy field-by-field
//! permission-flag model. Internally there is exactly one representation —
//! [`Grant`] — and legacy records are mapped once at the boundary via
//! [`Grant::from_legacy_flags`], never inside the resolver.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::permission::Permission;
use crate::role::Role;

/// What a caller holds against a business, independent of how it was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Grant {
    /// The caller is the business owner: unconditional full access.
    Ownership,
    /// The caller is a team member with a role and explicit permissions.
    Membership {
        role: Role,
        permissions: Vec<Permission>,
        active: bool,
    },
}

impl Grant {
    /// Whether this grant is currently usable. Ownership never deactivates.
    pub fn is_active(&self) -> bool {
        match self {
            Grant::Ownership => true,
            Grant::Membership { active, .. } => *active,
        }
    }

    /// Effective permission set for this grant.
    ///
    /// Ownership and the owner/admin roles alias the full catalog; otherwise
    /// the set is the union of explicit permissions and the role's defaults.
    pub fn effective_permissions(&self) -> BTreeSet<Permission> {
        match self {
            Grant::Ownership => catalog::all().clone(),
            Grant::Membership { role, permissions, .. } => {
                if role.grants_full_catalog() {
                    return catalog::all().clone();
                }
                let mut set = role.default_permissions();
                set.extend(permissions.iter().cloned());
                set
            }
        }
    }

    /// All-of check against the effective set.
    pub fn has_all(&self, required: &[Permission]) -> bool {
        let effective = self.effective_permissions();
        required.iter().all(|p| effective.contains(p))
    }

    /// Any-of check against the effective set.
    pub fn has_any(&self, required: &[Permission]) -> bool {
        let effective = self.effective_permissions();
        required.iter().any(|p| effective.contains(p))
    }

    /// Map a legacy business-employee record onto the consolidated model.
    ///
    /// The legacy role vocabulary (`manager`, `recruiter`,
    /// `attendance_officer`, `viewer`, `custom`) collapses to the closed
    /// role enum; the boolean flags expand to catalog permissions.
    pub fn from_legacy_flags(legacy: &LegacyAccessFlags) -> Self {
        let role = match legacy.role.to_ascii_lowercase().as_str() {
            "manager" => Role::Manager,
            _ => Role::Staff,
        };

        let mut permissions: Vec<Permission> = Vec::new();
        let mut grant = |names: &[&'static str]| {
            permissions.extend(names.iter().map(|n| Permission::new(*n)));
        };

        if legacy.can_manage_jobs {
            grant(&["create_jobs", "edit_jobs", "delete_jobs", "post_jobs"]);
        }
        if legacy.can_view_applications {
            grant(&["view_applications"]);
        }
        if legacy.can_manage_applications {
            grant(&["manage_applications", "approve_applications", "reject_applications"]);
        }
        if legacy.can_manage_attendance {
            grant(&["view_attendance", "manage_attendance", "approve_attendance"]);
        }
        if legacy.can_view_reports {
            grant(&["view_reports", "view_analytics"]);
        }
        if legacy.can_edit_business_profile {
            grant(&["view_business_profile", "edit_business_profile"]);
        }
        if legacy.can_manage_payments {
            grant(&["view_payments", "manage_payments"]);
        }

        Grant::Membership {
            role,
            permissions,
            active: legacy.active,
        }
    }
}

/// A legacy business-employee permission record, as imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyAccessFlags {
    pub role: String,
    pub active: bool,
    pub can_manage_jobs: bool,
    pub can_view_applications: bool,
    pub can_manage_applications: bool,
    pub can_manage_attendance: bool,
    pub can_view_reports: bool,
    pub can_edit_business_profile: bool,
    pub can_manage_payments: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn perm(name: &'static str) -> Permission {
        Permission::new(name)
    }

    #[test]
    fn ownership_is_the_full_catalog() {
        assert_eq!(Grant::Ownership.effective_permissions(), *catalog::all());
        assert!(Grant::Ownership.is_active());
    }

    #[test]
    fn admin_membership_aliases_the_full_catalog() {
        let grant = Grant::Membership {
            role: Role::Admin,
            permissions: vec![],
            active: true,
        };
        assert_eq!(grant.effective_permissions(), *catalog::all());
    }

    #[test]
    fn membership_unions_explicit_permissions_with_role_defaults() {
        let grant = Grant::Membership {
            role: Role::Staff,
            permissions: vec![perm("edit_jobs")],
            active: true,
        };
        let effective = grant.effective_permissions();
        assert!(effective.contains(&perm("edit_jobs")));
        assert!(effective.is_superset(&Role::Staff.default_permissions()));
    }

    #[test]
    fn has_all_and_has_any_differ_on_partial_sets() {
        let grant = Grant::Membership {
            role: Role::Staff,
            permissions: vec![perm("edit_jobs")],
            active: true,
        };
        let required = [perm("edit_jobs"), perm("delete_jobs")];
        assert!(grant.has_any(&required));
        assert!(!grant.has_all(&required));
    }

    #[test]
    fn legacy_manager_flags_map_to_manager_membership() {
        let legacy = LegacyAccessFlags {
            role: "manager".to_string(),
            active: true,
            can_manage_jobs: true,
            can_view_applications: true,
            can_manage_applications: false,
            can_manage_attendance: false,
            can_view_reports: true,
            can_edit_business_profile: false,
            can_manage_payments: false,
        };
        let grant = Grant::from_legacy_flags(&legacy);
        match &grant {
            Grant::Membership { role, active, .. } => {
                assert_eq!(*role, Role::Manager);
                assert!(*active);
            }
            Grant::Ownership => panic!("legacy records never map to ownership"),
        }
        assert!(grant.has_all(&[perm("create_jobs"), perm("view_reports")]));
    }

    #[test]
    fn legacy_viewer_maps_to_staff_and_stays_inactive_when_suspended() {
        let legacy = LegacyAccessFlags {
            role: "viewer".to_string(),
            active: false,
            can_manage_jobs: false,
            can_view_applications: true,
            can_manage_applications: false,
            can_manage_attendance: false,
            can_view_reports: false,
            can_edit_business_profile: false,
            can_manage_payments: false,
        };
        let grant = Grant::from_legacy_flags(&legacy);
        assert!(!grant.is_active());
        match grant {
            Grant::Membership { role, .. } => assert_eq!(role, Role::Staff),
            Grant::Ownership => panic!("legacy records never map to ownership"),
        }
    }

    #[test]
    fn legacy_flags_expand_only_to_catalog_entries() {
        let legacy = LegacyAccessFlags {
            role: "custom".to_string(),
            active: true,
            can_manage_jobs: true,
            can_view_applications: true,
            can_manage_applications: true,
            can_manage_attendance: true,
            can_view_reports: true,
            can_edit_business_profile: true,
            can_manage_payments: true,
        };
        match Grant::from_legacy_flags(&legacy) {
            Grant::Membership { permissions, .. } => {
                assert!(catalog::validate(&permissions).is_ok());
            }
            Grant::Ownership => panic!("legacy records never map to ownership"),
        }
    }

    proptest! {
        #[test]
        fn effective_permissions_never_escape_the_catalog(
            role_idx in 0usize..5,
            explicit in proptest::collection::vec(0usize..10, 0..6),
        ) {
            let role = [Role::Owner, Role::Admin, Role::Manager, Role::Supervisor, Role::Staff][role_idx];
            // Explicit grants are drawn from the catalog, as the mutation
            // paths enforce before persisting.
            let pool: Vec<Permission> = catalog::all().iter().take(10).cloned().collect();
            let permissions: Vec<Permission> = explicit.iter().map(|i| pool[*i].clone()).collect();
            let grant = Grant::Membership { role, permissions, active: true };
            prop_assert!(grant.effective_permissions().is_subset(catalog::all()));
        }
    }
}
