use chrono::{DateTime, Utc};
use uuid::Uuid;

use awase_domain::pagination::Sort;
use awase_domain::role::UserRole;

/// User account as seen by the groups service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub role: u8,
    pub is_banned: bool,
    /// Soft-delete marker. `Some` means the account is logically deleted
    /// and can still be restored.
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// An itasha group within one event.
///
/// Invariant: `leader_user_id` always references a current member. Every
/// mutation that touches membership or leadership checks this before
/// writing.
#[derive(Debug, Clone)]
pub struct Group {
    pub id: Uuid,
    pub event_id: Uuid,
    /// Human-shareable code members paste into chat.
    pub code: String,
    pub name: String,
    pub theme: Option<String>,
    pub description: Option<String>,
    pub owner_note: Option<String>,
    pub max_members: Option<i32>,
    pub leader_user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The join relation between a user and a group.
#[derive(Debug, Clone)]
pub struct Membership {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub joined_at: DateTime<Utc>,
}

/// Failure policy for the leadership-reassignment cascade that runs when a
/// user is deleted.
///
/// Logical deletion is reversible, so it must not leave leadership broken:
/// a failed promotion aborts the whole deletion. Physical deletion is
/// already gated behind a successful logical deletion, so it cleans up
/// best-effort and never aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReassignMode {
    Strict,
    Lenient,
}

/// Allow-listed filters for the admin user list.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub deleted: Option<bool>,
}

/// Sort options for the admin user list.
#[derive(Debug, Clone, Copy)]
pub enum UserSortBy {
    CreatedAt(Sort),
    Email(Sort),
}

impl Default for UserSortBy {
    fn default() -> Self {
        Self::CreatedAt(Sort::Desc)
    }
}

impl UserSortBy {
    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "created-at-desc" => Some(Self::CreatedAt(Sort::Desc)),
            "created-at-asc" => Some(Self::CreatedAt(Sort::Asc)),
            "email-desc" => Some(Self::Email(Sort::Desc)),
            "email-asc" => Some(Self::Email(Sort::Asc)),
            _ => None,
        }
    }
}
