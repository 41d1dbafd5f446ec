use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use awase_auth_types::identity::Identity;

use crate::error::GroupsServiceError;
use crate::handlers::group::GroupResponse;
use crate::handlers::{SuccessResponse, is_admin};
use crate::state::AppState;
use crate::usecase::leadership::TransferLeadershipUseCase;
use crate::usecase::membership::{JoinGroupUseCase, LeaveGroupUseCase, RemoveMemberUseCase};

// ── POST /groups/{id}/join ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct JoinGroupResponse {
    #[serde(flatten)]
    pub group: GroupResponse,
    pub member_count: u64,
}

/// The UI sends a `force` hint in the body; it is accepted and ignored, so
/// no body is read here at all.
pub async fn join_group(
    identity: Identity,
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<JoinGroupResponse>, GroupsServiceError> {
    let usecase = JoinGroupUseCase {
        groups: state.group_repo(),
        memberships: state.membership_repo(),
        participations: state.participation_repo(),
    };
    let output = usecase.execute(identity.user_id, group_id).await?;
    Ok(Json(JoinGroupResponse {
        group: output.group.into(),
        member_count: output.member_count,
    }))
}

// ── DELETE /groups/{id}/leave ────────────────────────────────────────────────

pub async fn leave_group(
    identity: Identity,
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, GroupsServiceError> {
    let usecase = LeaveGroupUseCase {
        groups: state.group_repo(),
        memberships: state.membership_repo(),
    };
    usecase.execute(identity.user_id, group_id).await?;
    Ok(SuccessResponse::ok())
}

// ── DELETE /groups/{id}/members/{user_id} ────────────────────────────────────

pub async fn remove_member(
    identity: Identity,
    State(state): State<AppState>,
    Path((group_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SuccessResponse>, GroupsServiceError> {
    let usecase = RemoveMemberUseCase {
        groups: state.group_repo(),
        memberships: state.membership_repo(),
    };
    usecase
        .execute(identity.user_id, is_admin(&identity), group_id, member_id)
        .await?;
    Ok(SuccessResponse::ok())
}

// ── PATCH /groups/{id}/transfer ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct TransferLeadershipRequest {
    pub new_leader_id: Uuid,
}

pub async fn transfer_leadership(
    identity: Identity,
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Json(body): Json<TransferLeadershipRequest>,
) -> Result<Json<SuccessResponse>, GroupsServiceError> {
    let usecase = TransferLeadershipUseCase {
        groups: state.group_repo(),
        memberships: state.membership_repo(),
    };
    usecase
        .execute(identity.user_id, false, group_id, body.new_leader_id)
        .await?;
    Ok(SuccessResponse::ok())
}
