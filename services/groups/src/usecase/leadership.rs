use uuid::Uuid;

use crate::domain::repository::{GroupRepository, MembershipRepository};
use crate::domain::types::ReassignMode;
use crate::error::GroupsServiceError;

// ── TransferLeadership ───────────────────────────────────────────────────────

pub struct TransferLeadershipUseCase<G: GroupRepository, M: MembershipRepository> {
    pub groups: G,
    pub memberships: M,
}

impl<G: GroupRepository, M: MembershipRepository> TransferLeadershipUseCase<G, M> {
    /// Points the group at a new leader. The self-service path requires the
    /// actor to be the current leader; the admin path skips that check. Both
    /// paths require the new leader to be a current member and reject a
    /// transfer to the actor themself.
    pub async fn execute(
        &self,
        actor_id: Uuid,
        actor_is_admin: bool,
        group_id: Uuid,
        new_leader_id: Uuid,
    ) -> Result<(), GroupsServiceError> {
        let group = self
            .groups
            .find_by_id(group_id)
            .await?
            .ok_or(GroupsServiceError::GroupNotFound)?;

        if !actor_is_admin && group.leader_user_id != actor_id {
            return Err(GroupsServiceError::NotGroupLeader);
        }
        if new_leader_id == actor_id {
            return Err(GroupsServiceError::SelfTransfer);
        }
        // Membership is checked before the write and never revoked by this
        // operation, so the leader-is-member invariant holds.
        if self
            .memberships
            .find(group_id, new_leader_id)
            .await?
            .is_none()
        {
            return Err(GroupsServiceError::NewLeaderNotMember);
        }

        let updated = self.groups.update_leader(group_id, new_leader_id).await?;
        if !updated {
            return Err(GroupsServiceError::GroupNotFound);
        }
        Ok(())
    }
}

// ── Leadership reassignment cascade ──────────────────────────────────────────

/// Walks every group led by a user being deleted and either promotes the
/// earliest-joined remaining member or, when the leader was the sole member,
/// deletes the group.
///
/// Failure policy per group:
/// - group deletion failures are logged and never abort (both modes);
/// - promotion failures abort with diagnostics in [`ReassignMode::Strict`]
///   and are logged-and-skipped in [`ReassignMode::Lenient`].
pub async fn reassign_led_groups<G: GroupRepository, M: MembershipRepository>(
    groups: &G,
    memberships: &M,
    user_id: Uuid,
    mode: ReassignMode,
) -> Result<(), GroupsServiceError> {
    let led = groups.list_led_by(user_id).await?;

    for group in led {
        let members = memberships.list_by_group(group.id).await?;
        let successor = members.iter().find(|m| m.user_id != user_id);

        match successor {
            None => {
                // Sole member: the group goes with them.
                if let Err(e) = groups.delete(group.id).await {
                    tracing::warn!(
                        group_id = %group.id,
                        group_name = %group.name,
                        error = %e,
                        "failed to delete empty group during user deletion",
                    );
                }
            }
            Some(next) => {
                let result = groups.update_leader(group.id, next.user_id).await;
                let failure = match result {
                    Ok(true) => None,
                    Ok(false) => Some("group row disappeared during update".to_owned()),
                    Err(e) => Some(e.to_string()),
                };
                if let Some(message) = failure {
                    match mode {
                        ReassignMode::Strict => {
                            return Err(GroupsServiceError::LeadershipTransferFailed {
                                group_id: group.id,
                                group_name: group.name,
                                message,
                            });
                        }
                        ReassignMode::Lenient => {
                            tracing::warn!(
                                group_id = %group.id,
                                group_name = %group.name,
                                error = %message,
                                "failed to reassign leadership, continuing",
                            );
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
