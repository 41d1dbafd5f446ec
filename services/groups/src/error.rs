use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

/// Groups service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum GroupsServiceError {
    #[error("group not found")]
    GroupNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("membership not found")]
    MembershipNotFound,
    #[error("forbidden")]
    Forbidden,
    #[error("not a participant of this event")]
    NotEventParticipant,
    #[error("not the group leader")]
    NotGroupLeader,
    #[error("the leader cannot leave the group")]
    LeaderCannotLeave,
    #[error("the group leader cannot be removed")]
    CannotRemoveLeader,
    #[error("cannot transfer leadership to yourself")]
    SelfTransfer,
    #[error("new leader is not a member of the group")]
    NewLeaderNotMember,
    #[error("user is already deleted")]
    UserAlreadyDeleted,
    #[error("user is not deleted")]
    UserNotDeleted,
    #[error("invalid query parameter")]
    InvalidQuery,
    #[error("leadership transfer failed for group {group_name}")]
    LeadershipTransferFailed {
        group_id: Uuid,
        group_name: String,
        message: String,
    },
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl GroupsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GroupNotFound => "GROUP_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::MembershipNotFound => "MEMBERSHIP_NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::NotEventParticipant => "NOT_EVENT_PARTICIPANT",
            Self::NotGroupLeader => "NOT_GROUP_LEADER",
            Self::LeaderCannotLeave => "LEADER_CANNOT_LEAVE",
            Self::CannotRemoveLeader => "CANNOT_REMOVE_LEADER",
            Self::SelfTransfer => "SELF_TRANSFER",
            Self::NewLeaderNotMember => "NEW_LEADER_NOT_MEMBER",
            Self::UserAlreadyDeleted => "USER_ALREADY_DELETED",
            Self::UserNotDeleted => "USER_NOT_DELETED",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::LeadershipTransferFailed { .. } => "LEADERSHIP_TRANSFER_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for GroupsServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::GroupNotFound | Self::UserNotFound | Self::MembershipNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::Forbidden
            | Self::NotEventParticipant
            | Self::NotGroupLeader
            | Self::LeaderCannotLeave => StatusCode::FORBIDDEN,
            Self::CannotRemoveLeader
            | Self::SelfTransfer
            | Self::NewLeaderNotMember
            | Self::UserAlreadyDeleted
            | Self::UserNotDeleted
            | Self::InvalidQuery => StatusCode::BAD_REQUEST,
            Self::LeadershipTransferFailed { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // responses; 4xx carry no extra context worth a log line.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = self.kind(), "internal error");
        }
        let body = match &self {
            // Surfaced for admin remediation: which group blocked the deletion, and why.
            Self::LeadershipTransferFailed {
                group_id,
                group_name,
                message,
            } => {
                tracing::error!(
                    group_id = %group_id,
                    group_name = %group_name,
                    error = %message,
                    kind = self.kind(),
                    "leadership transfer failed",
                );
                serde_json::json!({
                    "error": self.to_string(),
                    "message": message,
                    "details": {
                        "group_id": group_id.to_string(),
                        "group_name": group_name,
                    },
                })
            }
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        (status, axum::Json(body)).into_response()
    }
}
