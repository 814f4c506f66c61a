use std::collections::BTreeSet;

use shiftcrew_access::ResolvedAccess;
use shiftcrew_auth::Permission;
use shiftcrew_core::BusinessId;

/// Resolved access for the current request, attached as a request extension
/// by the guard so downstream handlers avoid a second resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    pub business_id: BusinessId,
    pub is_owner: bool,
    pub effective_permissions: BTreeSet<Permission>,
}

impl AccessContext {
    pub fn has(&self, permission: &Permission) -> bool {
        self.effective_permissions.contains(permission)
    }
}

impl From<&ResolvedAccess> for AccessContext {
    fn from(access: &ResolvedAccess) -> Self {
        Self {
            business_id: access.business.id,
            is_owner: access.is_owner,
            effective_permissions: access.effective_permissions.clone(),
        }
    }
}
