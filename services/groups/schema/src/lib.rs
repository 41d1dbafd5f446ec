//! sea-orm entities for the groups service.

pub mod event_entries;
pub mod event_participants;
pub mod events;
pub mod group_members;
pub mod groups;
pub mod users;
