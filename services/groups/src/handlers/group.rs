use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use awase_auth_types::identity::Identity;

use crate::domain::types::{Group, Membership};
use crate::error::GroupsServiceError;
use crate::state::AppState;
use crate::usecase::group::{CreateGroupInput, CreateGroupUseCase, GetGroupUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub event_id: String,
    pub code: String,
    pub name: String,
    pub theme: Option<String>,
    pub description: Option<String>,
    pub owner_note: Option<String>,
    pub max_members: Option<i32>,
    pub leader_user_id: String,
    #[serde(serialize_with = "awase_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "awase_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            id: group.id.to_string(),
            event_id: group.event_id.to_string(),
            code: group.code,
            name: group.name,
            theme: group.theme,
            description: group.description,
            owner_note: group.owner_note,
            max_members: group.max_members,
            leader_user_id: group.leader_user_id.to_string(),
            created_at: group.created_at,
            updated_at: group.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct MemberResponse {
    pub user_id: String,
    #[serde(serialize_with = "awase_core::serde::to_rfc3339_ms")]
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

impl From<Membership> for MemberResponse {
    fn from(membership: Membership) -> Self {
        Self {
            user_id: membership.user_id.to_string(),
            joined_at: membership.joined_at,
        }
    }
}

#[derive(Serialize)]
pub struct GroupDetailResponse {
    #[serde(flatten)]
    pub group: GroupResponse,
    pub member_count: usize,
    pub members: Vec<MemberResponse>,
}

// ── POST /groups ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateGroupRequest {
    pub event_id: Uuid,
    pub name: String,
    pub theme: Option<String>,
    pub description: Option<String>,
    pub owner_note: Option<String>,
    pub max_members: Option<i32>,
}

pub async fn create_group(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<GroupResponse>), GroupsServiceError> {
    let usecase = CreateGroupUseCase {
        groups: state.group_repo(),
        participations: state.participation_repo(),
    };
    let group = usecase
        .execute(
            identity.user_id,
            CreateGroupInput {
                event_id: body.event_id,
                name: body.name,
                theme: body.theme,
                description: body.description,
                owner_note: body.owner_note,
                max_members: body.max_members,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(group.into())))
}

// ── GET /groups/{id} ─────────────────────────────────────────────────────────

pub async fn get_group(
    _identity: Identity,
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<GroupDetailResponse>, GroupsServiceError> {
    let usecase = GetGroupUseCase {
        groups: state.group_repo(),
        memberships: state.membership_repo(),
    };
    let (group, members) = usecase.execute(group_id).await?;
    Ok(Json(GroupDetailResponse {
        group: group.into(),
        member_count: members.len(),
        members: members.into_iter().map(MemberResponse::from).collect(),
    }))
}
