use chrono::Utc;
use uuid::Uuid;

use awase_domain::pagination::PageRequest;

use crate::domain::repository::{GroupRepository, MembershipRepository, UserRepository};
use crate::domain::types::{ReassignMode, User, UserFilter, UserSortBy};
use crate::error::GroupsServiceError;
use crate::usecase::leadership::reassign_led_groups;

// ── SoftDeleteUser ───────────────────────────────────────────────────────────

pub struct SoftDeleteUserUseCase<U: UserRepository, G: GroupRepository, M: MembershipRepository> {
    pub users: U,
    pub groups: G,
    pub memberships: M,
}

impl<U: UserRepository, G: GroupRepository, M: MembershipRepository>
    SoftDeleteUserUseCase<U, G, M>
{
    /// Logical deletion: strict leadership cascade first, then set the
    /// marker. A failed promotion aborts before `deleted_at` is touched, so
    /// the user stays live and the operation can be retried.
    pub async fn execute(&self, user_id: Uuid) -> Result<(), GroupsServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(GroupsServiceError::UserNotFound)?;
        if user.is_deleted() {
            return Err(GroupsServiceError::UserAlreadyDeleted);
        }

        reassign_led_groups(&self.groups, &self.memberships, user_id, ReassignMode::Strict)
            .await?;

        let updated = self.users.set_deleted_at(user_id, Some(Utc::now())).await?;
        if !updated {
            return Err(GroupsServiceError::UserNotFound);
        }
        Ok(())
    }
}

// ── HardDeleteUser ───────────────────────────────────────────────────────────

pub struct HardDeleteUserUseCase<U: UserRepository, G: GroupRepository, M: MembershipRepository> {
    pub users: U,
    pub groups: G,
    pub memberships: M,
}

impl<U: UserRepository, G: GroupRepository, M: MembershipRepository>
    HardDeleteUserUseCase<U, G, M>
{
    /// Physical deletion of an already soft-deleted user. The cascade runs
    /// lenient: leadership was normally already reassigned by the logical
    /// deletion, so whatever is left is best-effort cleanup of a row being
    /// purged anyway.
    pub async fn execute(&self, user_id: Uuid) -> Result<(), GroupsServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(GroupsServiceError::UserNotFound)?;
        if !user.is_deleted() {
            return Err(GroupsServiceError::UserNotDeleted);
        }

        reassign_led_groups(
            &self.groups,
            &self.memberships,
            user_id,
            ReassignMode::Lenient,
        )
        .await?;

        let deleted = self.users.delete(user_id).await?;
        if !deleted {
            return Err(GroupsServiceError::UserNotFound);
        }
        Ok(())
    }
}

// ── RestoreUser ──────────────────────────────────────────────────────────────

pub struct RestoreUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RestoreUserUseCase<U> {
    /// Clears the soft-delete marker. Leadership lost during the deletion
    /// cascade is not reinstated. Restoring a live user is a no-op success.
    pub async fn execute(&self, user_id: Uuid) -> Result<User, GroupsServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(GroupsServiceError::UserNotFound)?;

        self.users.set_deleted_at(user_id, None).await?;

        Ok(User {
            deleted_at: None,
            ..user
        })
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(
        &self,
        filter: UserFilter,
        sort_by: UserSortBy,
        page: PageRequest,
    ) -> Result<Vec<User>, GroupsServiceError> {
        self.users.list(filter, sort_by, page.clamped()).await
    }
}
