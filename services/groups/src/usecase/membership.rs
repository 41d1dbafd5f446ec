use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{GroupRepository, MembershipRepository, ParticipationRepository};
use crate::domain::types::{Group, Membership};
use crate::error::GroupsServiceError;

// ── JoinGroup ────────────────────────────────────────────────────────────────

pub struct JoinGroupOutput {
    pub group: Group,
    pub member_count: u64,
}

pub struct JoinGroupUseCase<G: GroupRepository, M: MembershipRepository, P: ParticipationRepository>
{
    pub groups: G,
    pub memberships: M,
    pub participations: P,
}

impl<G: GroupRepository, M: MembershipRepository, P: ParticipationRepository>
    JoinGroupUseCase<G, M, P>
{
    /// Idempotent join: a second call for the same (user, group) is a no-op
    /// success. Never touches the per-event group pointer; only leave and
    /// removal recompute it.
    pub async fn execute(
        &self,
        user_id: Uuid,
        group_id: Uuid,
    ) -> Result<JoinGroupOutput, GroupsServiceError> {
        let group = self
            .groups
            .find_by_id(group_id)
            .await?
            .ok_or(GroupsServiceError::GroupNotFound)?;

        if !self
            .participations
            .is_event_participant(group.event_id, user_id)
            .await?
        {
            return Err(GroupsServiceError::NotEventParticipant);
        }

        let membership = Membership {
            group_id,
            user_id,
            joined_at: Utc::now(),
        };
        // false means the row already existed; both outcomes are success.
        let _ = self.memberships.upsert(&membership).await?;

        let member_count = self.memberships.member_count(group_id).await?;
        Ok(JoinGroupOutput {
            group,
            member_count,
        })
    }
}

// ── LeaveGroup ───────────────────────────────────────────────────────────────

pub struct LeaveGroupUseCase<G: GroupRepository, M: MembershipRepository> {
    pub groups: G,
    pub memberships: M,
}

impl<G: GroupRepository, M: MembershipRepository> LeaveGroupUseCase<G, M> {
    pub async fn execute(&self, user_id: Uuid, group_id: Uuid) -> Result<(), GroupsServiceError> {
        let group = self
            .groups
            .find_by_id(group_id)
            .await?
            .ok_or(GroupsServiceError::GroupNotFound)?;

        // The leader must transfer leadership or disband instead.
        if group.leader_user_id == user_id {
            return Err(GroupsServiceError::LeaderCannotLeave);
        }

        remove_membership(&self.memberships, &group, user_id).await
    }
}

// ── RemoveMember ─────────────────────────────────────────────────────────────

pub struct RemoveMemberUseCase<G: GroupRepository, M: MembershipRepository> {
    pub groups: G,
    pub memberships: M,
}

impl<G: GroupRepository, M: MembershipRepository> RemoveMemberUseCase<G, M> {
    /// Same deletion-plus-repoint sequence as leaving, keyed on the target
    /// member. Permitted to the group's leader or to an admin actor.
    pub async fn execute(
        &self,
        actor_id: Uuid,
        actor_is_admin: bool,
        group_id: Uuid,
        member_id: Uuid,
    ) -> Result<(), GroupsServiceError> {
        let group = self
            .groups
            .find_by_id(group_id)
            .await?
            .ok_or(GroupsServiceError::GroupNotFound)?;

        if !actor_is_admin && group.leader_user_id != actor_id {
            return Err(GroupsServiceError::NotGroupLeader);
        }
        if member_id == group.leader_user_id {
            return Err(GroupsServiceError::CannotRemoveLeader);
        }

        remove_membership(&self.memberships, &group, member_id).await
    }
}

/// Deletes the membership and rewrites the (user, event) group pointer to the
/// earliest-joined remaining membership's group, or null if none remain. The
/// delete and the pointer write are one store transaction.
async fn remove_membership<M: MembershipRepository>(
    memberships: &M,
    group: &Group,
    user_id: Uuid,
) -> Result<(), GroupsServiceError> {
    if memberships.find(group.id, user_id).await?.is_none() {
        return Err(GroupsServiceError::MembershipNotFound);
    }

    let remaining = memberships
        .list_by_user_and_event(user_id, group.event_id)
        .await?;
    let next_group_id = remaining
        .iter()
        .find(|m| m.group_id != group.id)
        .map(|m| m.group_id);

    memberships
        .remove_and_repoint(group.id, user_id, group.event_id, next_group_id)
        .await
}
