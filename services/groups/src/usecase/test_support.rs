//! In-memory repository mocks shared by the usecase unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use awase_domain::pagination::{PageRequest, Sort};

use crate::domain::repository::{
    GroupRepository, MembershipRepository, ParticipationRepository, UserRepository,
};
use crate::domain::types::{Group, Membership, User, UserFilter, UserSortBy};
use crate::error::GroupsServiceError;

pub fn test_user() -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        email: "driver@example.com".into(),
        display_name: Some("driver".into()),
        role: 0,
        is_banned: false,
        deleted_at: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_group(leader_user_id: Uuid) -> Group {
    let now = Utc::now();
    Group {
        id: Uuid::now_v7(),
        event_id: Uuid::now_v7(),
        code: "MIKUMIKU".into(),
        name: "Team Miku".into(),
        theme: None,
        description: None,
        owner_note: None,
        max_members: None,
        leader_user_id,
        created_at: now,
        updated_at: now,
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::with(vec![])
    }

    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, GroupsServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn list(
        &self,
        filter: UserFilter,
        sort_by: UserSortBy,
        page: PageRequest,
    ) -> Result<Vec<User>, GroupsServiceError> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| filter.role.is_none_or(|r| u.role == r.as_u8()))
            .filter(|u| filter.deleted.is_none_or(|d| u.is_deleted() == d))
            .cloned()
            .collect();
        match sort_by {
            UserSortBy::CreatedAt(Sort::Asc) => users.sort_by_key(|u| u.created_at),
            UserSortBy::CreatedAt(Sort::Desc) => {
                users.sort_by_key(|u| std::cmp::Reverse(u.created_at))
            }
            UserSortBy::Email(Sort::Asc) => users.sort_by(|a, b| a.email.cmp(&b.email)),
            UserSortBy::Email(Sort::Desc) => users.sort_by(|a, b| b.email.cmp(&a.email)),
        }
        Ok(users
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn set_deleted_at(
        &self,
        id: Uuid,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<bool, GroupsServiceError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.deleted_at = deleted_at;
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, GroupsServiceError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

// ── MockGroupRepo ────────────────────────────────────────────────────────────

pub struct MockGroupRepo {
    groups: Arc<Mutex<Vec<Group>>>,
}

impl MockGroupRepo {
    pub fn with(groups: Vec<Group>) -> Self {
        Self {
            groups: Arc::new(Mutex::new(groups)),
        }
    }

    pub fn empty() -> Self {
        Self::with(vec![])
    }

    pub fn groups_handle(&self) -> Arc<Mutex<Vec<Group>>> {
        Arc::clone(&self.groups)
    }
}

impl GroupRepository for MockGroupRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, GroupsServiceError> {
        Ok(self
            .groups
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == id)
            .cloned())
    }

    async fn code_exists(&self, code: &str) -> Result<bool, GroupsServiceError> {
        Ok(self.groups.lock().unwrap().iter().any(|g| g.code == code))
    }

    async fn list_led_by(&self, leader_user_id: Uuid) -> Result<Vec<Group>, GroupsServiceError> {
        let mut led: Vec<Group> = self
            .groups
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.leader_user_id == leader_user_id)
            .cloned()
            .collect();
        led.sort_by_key(|g| g.created_at);
        Ok(led)
    }

    async fn create_with_leader(&self, group: &Group) -> Result<(), GroupsServiceError> {
        self.groups.lock().unwrap().push(group.clone());
        Ok(())
    }

    async fn update_leader(
        &self,
        group_id: Uuid,
        new_leader_id: Uuid,
    ) -> Result<bool, GroupsServiceError> {
        let mut groups = self.groups.lock().unwrap();
        match groups.iter_mut().find(|g| g.id == group_id) {
            Some(group) => {
                group.leader_user_id = new_leader_id;
                group.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, group_id: Uuid) -> Result<(), GroupsServiceError> {
        self.groups.lock().unwrap().retain(|g| g.id != group_id);
        Ok(())
    }
}

// ── MockMembershipRepo ───────────────────────────────────────────────────────

pub struct MockMembershipRepo {
    rows: Arc<Mutex<Vec<Membership>>>,
    // Group list shared with MockGroupRepo so memberships can be scoped to
    // an event.
    groups: Arc<Mutex<Vec<Group>>>,
    pointers: Arc<Mutex<HashMap<(Uuid, Uuid), Option<Uuid>>>>,
}

impl MockMembershipRepo {
    pub fn for_groups(groups: &MockGroupRepo) -> Self {
        Self {
            rows: Arc::new(Mutex::new(vec![])),
            groups: groups.groups_handle(),
            pointers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn empty() -> Self {
        Self {
            rows: Arc::new(Mutex::new(vec![])),
            groups: Arc::new(Mutex::new(vec![])),
            pointers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Adds a membership row directly, with `joined_at` following insertion
    /// order.
    pub fn seed(&self, group_id: Uuid, user_id: Uuid) {
        self.rows.lock().unwrap().push(Membership {
            group_id,
            user_id,
            joined_at: Utc::now(),
        });
    }

    pub fn rows_handle(&self) -> Arc<Mutex<Vec<Membership>>> {
        Arc::clone(&self.rows)
    }

    pub fn pointers_handle(&self) -> Arc<Mutex<HashMap<(Uuid, Uuid), Option<Uuid>>>> {
        Arc::clone(&self.pointers)
    }

    fn event_of(&self, group_id: Uuid) -> Option<Uuid> {
        self.groups
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == group_id)
            .map(|g| g.event_id)
    }
}

impl MembershipRepository for MockMembershipRepo {
    async fn find(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Membership>, GroupsServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.group_id == group_id && m.user_id == user_id)
            .cloned())
    }

    async fn list_by_group(&self, group_id: Uuid) -> Result<Vec<Membership>, GroupsServiceError> {
        let mut members: Vec<Membership> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect();
        members.sort_by_key(|m| m.joined_at);
        Ok(members)
    }

    async fn list_by_user_and_event(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<Vec<Membership>, GroupsServiceError> {
        let mut members: Vec<Membership> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id && self.event_of(m.group_id) == Some(event_id))
            .cloned()
            .collect();
        members.sort_by_key(|m| m.joined_at);
        Ok(members)
    }

    async fn upsert(&self, membership: &Membership) -> Result<bool, GroupsServiceError> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|m| m.group_id == membership.group_id && m.user_id == membership.user_id)
        {
            return Ok(false);
        }
        rows.push(membership.clone());
        Ok(true)
    }

    async fn member_count(&self, group_id: Uuid) -> Result<u64, GroupsServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.group_id == group_id)
            .count() as u64)
    }

    async fn remove_and_repoint(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        event_id: Uuid,
        next_group_id: Option<Uuid>,
    ) -> Result<(), GroupsServiceError> {
        self.rows
            .lock()
            .unwrap()
            .retain(|m| !(m.group_id == group_id && m.user_id == user_id));
        self.pointers
            .lock()
            .unwrap()
            .insert((user_id, event_id), next_group_id);
        Ok(())
    }
}

// ── MockParticipationRepo ────────────────────────────────────────────────────

pub struct MockParticipationRepo {
    allow: bool,
}

impl MockParticipationRepo {
    pub fn allowing_all() -> Self {
        Self { allow: true }
    }

    pub fn denying_all() -> Self {
        Self { allow: false }
    }
}

impl ParticipationRepository for MockParticipationRepo {
    async fn is_event_participant(
        &self,
        _event_id: Uuid,
        _user_id: Uuid,
    ) -> Result<bool, GroupsServiceError> {
        Ok(self.allow)
    }
}
