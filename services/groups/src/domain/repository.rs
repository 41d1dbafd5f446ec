#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use awase_domain::pagination::PageRequest;

use crate::domain::types::{Group, Membership, User, UserFilter, UserSortBy};
use crate::error::GroupsServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, GroupsServiceError>;

    async fn list(
        &self,
        filter: UserFilter,
        sort_by: UserSortBy,
        page: PageRequest,
    ) -> Result<Vec<User>, GroupsServiceError>;

    /// Set or clear the soft-delete marker. Returns `true` if a row was
    /// updated.
    async fn set_deleted_at(
        &self,
        id: Uuid,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<bool, GroupsServiceError>;

    /// Hard-delete the row. The store cascades memberships, event entries,
    /// participations, and any group still led by the user. Returns `true`
    /// if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, GroupsServiceError>;
}

/// Repository for groups.
pub trait GroupRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, GroupsServiceError>;

    async fn code_exists(&self, code: &str) -> Result<bool, GroupsServiceError>;

    /// Groups currently led by the given user, ordered by creation time
    /// ascending.
    async fn list_led_by(&self, leader_user_id: Uuid) -> Result<Vec<Group>, GroupsServiceError>;

    /// Insert the group and its creator's membership (`joined_at` equal to
    /// the group's `created_at`) in one transaction.
    async fn create_with_leader(&self, group: &Group) -> Result<(), GroupsServiceError>;

    /// Point `leader_user_id` at the new leader. Returns `true` if a row was
    /// updated.
    async fn update_leader(
        &self,
        group_id: Uuid,
        new_leader_id: Uuid,
    ) -> Result<bool, GroupsServiceError>;

    /// Delete the group; the store cascades its memberships and clears any
    /// event entries still pointing at it. Deleting an absent group is not
    /// an error.
    async fn delete(&self, group_id: Uuid) -> Result<(), GroupsServiceError>;
}

/// Repository for group memberships and the per-event group pointer.
pub trait MembershipRepository: Send + Sync {
    async fn find(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Membership>, GroupsServiceError>;

    /// All members of the group, ordered by join time ascending (ties in
    /// store order).
    async fn list_by_group(&self, group_id: Uuid) -> Result<Vec<Membership>, GroupsServiceError>;

    /// The user's memberships within one event, ordered by join time
    /// ascending (ties in store order).
    async fn list_by_user_and_event(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<Vec<Membership>, GroupsServiceError>;

    /// Idempotent insert. Returns `true` if a row was created, `false` if
    /// the membership already existed.
    async fn upsert(&self, membership: &Membership) -> Result<bool, GroupsServiceError>;

    async fn member_count(&self, group_id: Uuid) -> Result<u64, GroupsServiceError>;

    /// Atomically delete the membership and write the (user, event) group
    /// pointer to `next_group_id` (or clear it).
    async fn remove_and_repoint(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        event_id: Uuid,
        next_group_id: Option<Uuid>,
    ) -> Result<(), GroupsServiceError>;
}

/// Port for the external event-registration records (read-only here).
pub trait ParticipationRepository: Send + Sync {
    async fn is_event_participant(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, GroupsServiceError>;
}
