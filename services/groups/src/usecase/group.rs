use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{GroupRepository, MembershipRepository, ParticipationRepository};
use crate::domain::types::{Group, Membership};
use crate::error::GroupsServiceError;

/// Attempts to mint a unique group code before giving up. Collisions are
/// astronomically rare at 31^8 combinations, so repeated misses mean the
/// store is misbehaving.
const CODE_RETRIES: usize = 4;

// ── CreateGroup ──────────────────────────────────────────────────────────────

pub struct CreateGroupInput {
    pub event_id: Uuid,
    pub name: String,
    pub theme: Option<String>,
    pub description: Option<String>,
    pub owner_note: Option<String>,
    pub max_members: Option<i32>,
}

pub struct CreateGroupUseCase<G: GroupRepository, P: ParticipationRepository> {
    pub groups: G,
    pub participations: P,
}

impl<G: GroupRepository, P: ParticipationRepository> CreateGroupUseCase<G, P> {
    /// Creates the group with the caller as leader and sole member, in one
    /// store transaction.
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CreateGroupInput,
    ) -> Result<Group, GroupsServiceError> {
        if !self
            .participations
            .is_event_participant(input.event_id, user_id)
            .await?
        {
            return Err(GroupsServiceError::NotEventParticipant);
        }

        let code = self.fresh_code().await?;
        let now = Utc::now();
        let group = Group {
            id: Uuid::now_v7(),
            event_id: input.event_id,
            code,
            name: input.name,
            theme: input.theme,
            description: input.description,
            owner_note: input.owner_note,
            max_members: input.max_members,
            leader_user_id: user_id,
            created_at: now,
            updated_at: now,
        };
        self.groups.create_with_leader(&group).await?;
        Ok(group)
    }

    async fn fresh_code(&self) -> Result<String, GroupsServiceError> {
        for _ in 0..CODE_RETRIES {
            let code = awase_domain::code::generate();
            if !self.groups.code_exists(&code).await? {
                return Ok(code);
            }
        }
        Err(GroupsServiceError::Internal(anyhow::anyhow!(
            "could not mint a unique group code after {CODE_RETRIES} attempts"
        )))
    }
}

// ── GetGroup ─────────────────────────────────────────────────────────────────

pub struct GetGroupUseCase<G: GroupRepository, M: MembershipRepository> {
    pub groups: G,
    pub memberships: M,
}

impl<G: GroupRepository, M: MembershipRepository> GetGroupUseCase<G, M> {
    /// Group plus its roster, ordered by join time ascending.
    pub async fn execute(
        &self,
        group_id: Uuid,
    ) -> Result<(Group, Vec<Membership>), GroupsServiceError> {
        let group = self
            .groups
            .find_by_id(group_id)
            .await?
            .ok_or(GroupsServiceError::GroupNotFound)?;
        let members = self.memberships.list_by_group(group_id).await?;
        Ok((group, members))
    }
}
