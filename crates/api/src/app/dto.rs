use serde::Deserialize;

use shiftcrew_auth::{Permission, Role};
use shiftcrew_team::{Business, TeamMember};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterBusinessRequest {
    pub name: String,
}

/// Invite payload. An extra `businessId` field may ride along for the guard's
/// extraction chain; unknown fields are ignored here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteMemberRequest {
    pub email: String,
    pub name: Option<String>,
    pub role: Option<Role>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub role: Option<Role>,
    pub permissions: Option<Vec<String>>,
    pub active: Option<bool>,
}

pub fn to_permissions(names: Vec<String>) -> Vec<Permission> {
    names.into_iter().map(Permission::from).collect()
}

// -------------------------
// Response mapping
// -------------------------

pub fn business_to_json(business: &Business) -> serde_json::Value {
    serde_json::json!({
        "id": business.id.to_string(),
        "name": business.name,
        "owner": business.owner.to_string(),
        "active": business.active,
        "createdAt": business.created_at,
    })
}

pub fn member_to_json(member: &TeamMember) -> serde_json::Value {
    serde_json::json!({
        "id": member.id.to_string(),
        "businessId": member.business.to_string(),
        "userId": member.user.to_string(),
        "name": member.name,
        "email": member.email,
        "role": member.role.as_str(),
        "permissions": member.permissions,
        "active": member.active,
        "invitedAt": member.invited_at,
        "joinedAt": member.joined_at,
    })
}
