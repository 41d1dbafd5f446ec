use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use awase_auth_types::identity::Identity;
use awase_domain::pagination::PageRequest;
use awase_domain::role::UserRole;

use crate::domain::types::{User, UserFilter, UserSortBy};
use crate::error::GroupsServiceError;
use crate::handlers::{SuccessResponse, require_admin};
use crate::state::AppState;
use crate::usecase::admin_user::{
    HardDeleteUserUseCase, ListUsersUseCase, RestoreUserUseCase, SoftDeleteUserUseCase,
};
use crate::usecase::leadership::TransferLeadershipUseCase;
use crate::usecase::membership::RemoveMemberUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub role: u8,
    pub is_banned: bool,
    #[serde(serialize_with = "awase_core::serde::to_rfc3339_ms_opt")]
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "awase_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "awase_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            is_banned: user.is_banned,
            deleted_at: user.deleted_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── DELETE /admin/groups/{id}/members/{user_id} ──────────────────────────────

pub async fn admin_remove_member(
    identity: Identity,
    State(state): State<AppState>,
    Path((group_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SuccessResponse>, GroupsServiceError> {
    require_admin(&identity)?;
    let usecase = RemoveMemberUseCase {
        groups: state.group_repo(),
        memberships: state.membership_repo(),
    };
    usecase
        .execute(identity.user_id, true, group_id, member_id)
        .await?;
    Ok(SuccessResponse::ok())
}

// ── PATCH /admin/groups/{id}/leader ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangeLeaderRequest {
    pub new_leader_id: Uuid,
}

pub async fn admin_change_leader(
    identity: Identity,
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Json(body): Json<ChangeLeaderRequest>,
) -> Result<Json<SuccessResponse>, GroupsServiceError> {
    require_admin(&identity)?;
    let usecase = TransferLeadershipUseCase {
        groups: state.group_repo(),
        memberships: state.membership_repo(),
    };
    usecase
        .execute(identity.user_id, true, group_id, body.new_leader_id)
        .await?;
    Ok(SuccessResponse::ok())
}

// ── GET /admin/users ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AdminUserListQuery {
    pub role: Option<String>,
    pub deleted: Option<bool>,
    pub sort_by: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_users(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<AdminUserListQuery>,
) -> Result<Json<Vec<UserResponse>>, GroupsServiceError> {
    require_admin(&identity)?;

    // Filter and sort values outside the allow-list are 400, never passed
    // through to the store.
    let role = query
        .role
        .as_deref()
        .map(|s| UserRole::from_kebab_case(s).ok_or(GroupsServiceError::InvalidQuery))
        .transpose()?;
    let sort_by = query
        .sort_by
        .as_deref()
        .map(|s| UserSortBy::from_kebab_case(s).ok_or(GroupsServiceError::InvalidQuery))
        .transpose()?
        .unwrap_or_default();

    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };

    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let users = usecase
        .execute(
            UserFilter {
                role,
                deleted: query.deleted,
            },
            sort_by,
            page,
        )
        .await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── DELETE /admin/users/{id}/delete ──────────────────────────────────────────

pub async fn soft_delete_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, GroupsServiceError> {
    require_admin(&identity)?;
    let usecase = SoftDeleteUserUseCase {
        users: state.user_repo(),
        groups: state.group_repo(),
        memberships: state.membership_repo(),
    };
    usecase.execute(user_id).await?;
    Ok(SuccessResponse::ok())
}

// ── DELETE /admin/users/{id}/permanent-delete ────────────────────────────────

pub async fn hard_delete_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, GroupsServiceError> {
    require_admin(&identity)?;
    let usecase = HardDeleteUserUseCase {
        users: state.user_repo(),
        groups: state.group_repo(),
        memberships: state.membership_repo(),
    };
    usecase.execute(user_id).await?;
    Ok(SuccessResponse::ok())
}

// ── POST /admin/users/{id}/restore ───────────────────────────────────────────

pub async fn restore_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, GroupsServiceError> {
    require_admin(&identity)?;
    let usecase = RestoreUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(user_id).await?;
    Ok(Json(user.into()))
}
