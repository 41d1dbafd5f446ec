use sea_orm_migration::prelude::*;

mod m20260815_000001_create_users;
mod m20260815_000002_create_events;
mod m20260815_000003_create_groups;
mod m20260815_000004_create_group_members;
mod m20260815_000005_create_event_participants;
mod m20260815_000006_create_event_entries;
mod m20260815_000007_add_membership_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_create_users::Migration),
            Box::new(m20260815_000002_create_events::Migration),
            Box::new(m20260815_000003_create_groups::Migration),
            Box::new(m20260815_000004_create_group_members::Migration),
            Box::new(m20260815_000005_create_event_participants::Migration),
            Box::new(m20260815_000006_create_event_entries::Migration),
            Box::new(m20260815_000007_add_membership_indexes::Migration),
        ]
    }
}
