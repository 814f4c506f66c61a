//! The permission catalog: single source of truth for valid permission
//! identifiers and role→permission-set defaults.
//!
//! The catalog is closed and enumerable; there is no runtime mutation. Every
//! permission referenced anywhere in the system (role defaults, explicit
//! grants, guard requirements) must exist here.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use thiserror::Error;

use crate::permission::Permission;

/// Every registered permission, as `(identifier, display label)`.
const CATALOG: &[(&str, &str)] = &[
    // Business management
    ("create_business", "Create Business"),
    ("edit_business", "Edit Business"),
    ("delete_business", "Delete Business"),
    ("view_business_analytics", "View Business Analytics"),
    // Job management
    ("create_jobs", "Create Jobs"),
    ("edit_jobs", "Edit Jobs"),
    ("delete_jobs", "Delete Jobs"),
    ("view_jobs", "View Jobs"),
    ("post_jobs", "Post Jobs"),
    // Worker & application management
    ("hire_workers", "Hire Workers"),
    ("fire_workers", "Fire Workers"),
    ("view_applications", "View Applications"),
    ("manage_applications", "Manage Applications"),
    ("approve_applications", "Approve Applications"),
    ("reject_applications", "Reject Applications"),
    // Schedule & attendance management
    ("create_schedules", "Create Schedules"),
    ("edit_schedules", "Edit Schedules"),
    ("delete_schedules", "Delete Schedules"),
    ("manage_schedules", "Manage Schedules"),
    ("view_schedules", "View Schedules"),
    ("view_attendance", "View Attendance"),
    ("manage_attendance", "Manage Attendance"),
    ("approve_attendance", "Approve Attendance"),
    // Payment & financial management
    ("view_payments", "View Payments"),
    ("manage_payments", "Manage Payments"),
    ("process_payments", "Process Payments"),
    ("view_financial_reports", "View Financial Reports"),
    // Team management
    ("invite_team_members", "Invite Team Members"),
    ("edit_team_members", "Edit Team Members"),
    ("view_team_members", "View Team Members"),
    ("manage_team_members", "Manage Team Members"),
    ("remove_team_members", "Remove Team Members"),
    ("manage_permissions", "Manage Permissions"),
    // Communication & messaging
    ("view_messages", "View Messages"),
    ("send_messages", "Send Messages"),
    ("view_notifications", "View Notifications"),
    ("send_notifications", "Send Notifications"),
    // Business profile & settings
    ("view_business_profile", "View Business Profile"),
    ("edit_business_profile", "Edit Business Profile"),
    ("view_dashboard", "View Dashboard"),
    ("view_budget", "View Budget"),
    ("manage_budget", "Manage Budget"),
    ("manage_subscriptions", "Manage Subscriptions"),
    // Analytics & reporting
    ("view_analytics", "View Analytics"),
    ("view_reports", "View Reports"),
    ("export_data", "Export Data"),
    // System administration
    ("manage_settings", "Manage Settings"),
    ("view_audit_logs", "View Audit Logs"),
    ("manage_integrations", "Manage Integrations"),
];

/// Default permission subset for the `manager` role.
const MANAGER_DEFAULTS: &[&str] = &[
    "edit_business",
    "view_business_analytics",
    "view_business_profile",
    "edit_business_profile",
    "view_dashboard",
    "create_jobs",
    "edit_jobs",
    "view_jobs",
    "post_jobs",
    "hire_workers",
    "view_applications",
    "manage_applications",
    "approve_applications",
    "reject_applications",
    "create_schedules",
    "edit_schedules",
    "manage_schedules",
    "view_schedules",
    "view_attendance",
    "manage_attendance",
    "approve_attendance",
    "view_payments",
    "manage_payments",
    "process_payments",
    "view_financial_reports",
    "view_budget",
    "manage_budget",
    "invite_team_members",
    "edit_team_members",
    "view_team_members",
    "manage_team_members",
    "view_messages",
    "send_messages",
    "view_notifications",
    "send_notifications",
    "view_analytics",
    "view_reports",
    "export_data",
];

/// Default permission subset for the `supervisor` role.
const SUPERVISOR_DEFAULTS: &[&str] = &[
    "view_business_profile",
    "view_dashboard",
    "view_jobs",
    "post_jobs",
    "view_applications",
    "manage_applications",
    "create_schedules",
    "edit_schedules",
    "manage_schedules",
    "view_schedules",
    "view_attendance",
    "manage_attendance",
    "view_payments",
    "view_budget",
    "view_team_members",
    "view_messages",
    "send_messages",
    "view_notifications",
    "view_analytics",
    "view_reports",
];

/// Default permission subset for the `staff` role.
const STAFF_DEFAULTS: &[&str] = &[
    "view_business_profile",
    "view_dashboard",
    "view_jobs",
    "view_applications",
    "view_schedules",
    "view_attendance",
    "view_team_members",
    "view_messages",
    "send_messages",
    "view_notifications",
    "view_analytics",
];

fn set_of(names: &[&'static str]) -> BTreeSet<Permission> {
    names.iter().map(|n| Permission::new(*n)).collect()
}

/// The full catalog as a permission set.
///
/// `owner` and `admin` resolve to this set by alias, so adding a catalog entry
/// grants it to both without a second edit site.
pub fn all() -> &'static BTreeSet<Permission> {
    static ALL: OnceLock<BTreeSet<Permission>> = OnceLock::new();
    ALL.get_or_init(|| CATALOG.iter().map(|(name, _)| Permission::new(*name)).collect())
}

/// Whether `permission` is a registered catalog entry.
pub fn contains(permission: &Permission) -> bool {
    all().contains(permission)
}

/// Human-readable display label for a catalog entry.
pub fn label(permission: &Permission) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|(name, _)| *name == permission.as_str())
        .map(|(_, label)| *label)
}

/// Default permission set for a role name.
///
/// Unrecognized role names yield the empty set (fails closed, not with an
/// error); this also covers role strings imported from legacy records.
pub fn defaults_for_role(role: &str) -> BTreeSet<Permission> {
    match role.to_ascii_lowercase().as_str() {
        "owner" | "admin" => all().clone(),
        "manager" => set_of(MANAGER_DEFAULTS),
        "supervisor" => set_of(SUPERVISOR_DEFAULTS),
        "staff" => set_of(STAFF_DEFAULTS),
        _ => BTreeSet::new(),
    }
}

/// A permission identifier outside the catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown permission: '{0}'")]
pub struct UnknownPermission(pub String);

/// Validate that every identifier in `permissions` is a catalog entry.
///
/// Used by the invite/edit mutation paths before persisting explicit grants.
pub fn validate<'a>(
    permissions: impl IntoIterator<Item = &'a Permission>,
) -> Result<(), UnknownPermission> {
    for permission in permissions {
        if !contains(permission) {
            return Err(UnknownPermission(permission.as_str().to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn catalog_has_no_duplicate_identifiers() {
        assert_eq!(all().len(), CATALOG.len());
    }

    #[test]
    fn owner_and_admin_alias_the_full_catalog() {
        assert_eq!(defaults_for_role("owner"), *all());
        assert_eq!(defaults_for_role("admin"), *all());
        assert_eq!(defaults_for_role("ADMIN"), *all());
    }

    #[test]
    fn unrecognized_role_fails_closed() {
        assert!(defaults_for_role("recruiter").is_empty());
        assert!(defaults_for_role("").is_empty());
    }

    #[test]
    fn role_defaults_are_catalog_subsets() {
        for role in ["manager", "supervisor", "staff"] {
            let defaults = defaults_for_role(role);
            assert!(!defaults.is_empty(), "{role} defaults empty");
            assert!(defaults.is_subset(all()), "{role} defaults escape the catalog");
        }
    }

    #[test]
    fn staff_defaults_exclude_edit_jobs() {
        assert!(!defaults_for_role("staff").contains(&Permission::new("edit_jobs")));
    }

    #[test]
    fn every_entry_has_a_label() {
        for permission in all() {
            assert!(label(permission).is_some(), "{permission} has no label");
        }
    }

    #[test]
    fn validate_rejects_unknown_identifiers() {
        let perms = vec![Permission::new("view_jobs"), Permission::new("launch_rockets")];
        let err = validate(&perms).unwrap_err();
        assert_eq!(err.0, "launch_rockets");
    }

    proptest! {
        #[test]
        fn arbitrary_role_names_never_grant_anything(name in "[a-z_]{1,24}") {
            prop_assume!(!matches!(
                name.as_str(),
                "owner" | "admin" | "manager" | "supervisor" | "staff"
            ));
            prop_assert!(defaults_for_role(&name).is_empty());
        }
    }
}
