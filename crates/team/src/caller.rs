use serde::{Deserialize, Serialize};

use shiftcrew_auth::{CallerClaims, UserType};
use shiftcrew_core::{BusinessId, UserId};

/// Authenticated caller identity, as supplied by the upstream identity step.
///
/// The resolver treats this as a given value; how it was produced (token
/// validation, session lookup) is not this crate's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub id: UserId,
    pub email: String,
    pub user_type: UserType,
    pub selected_business: Option<BusinessId>,
}

impl Caller {
    pub fn new(id: UserId, email: impl Into<String>, user_type: UserType) -> Self {
        Self {
            id,
            email: email.into(),
            user_type,
            selected_business: None,
        }
    }

    pub fn with_selected_business(mut self, business: BusinessId) -> Self {
        self.selected_business = Some(business);
        self
    }

    pub fn is_employer(&self) -> bool {
        self.user_type == UserType::Employer
    }
}

impl From<&CallerClaims> for Caller {
    fn from(claims: &CallerClaims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email.clone(),
            user_type: claims.user_type,
            selected_business: claims.selected_business,
        }
    }
}
