pub mod admin;
pub mod group;
pub mod membership;

use axum::Json;
use serde::Serialize;

use awase_auth_types::identity::Identity;
use awase_domain::role::UserRole;

use crate::error::GroupsServiceError;

/// Body of every mutation endpoint that has nothing else to report.
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

pub(crate) fn is_admin(identity: &Identity) -> bool {
    UserRole::from_u8(identity.user_role).is_some_and(UserRole::is_admin)
}

pub(crate) fn require_admin(identity: &Identity) -> Result<(), GroupsServiceError> {
    if is_admin(identity) {
        Ok(())
    } else {
        Err(GroupsServiceError::Forbidden)
    }
}
