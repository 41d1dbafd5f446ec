use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Groups::Table)
                    .col(Groups::LeaderUserId)
                    .name("idx_groups_leader_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(GroupMembers::Table)
                    .col(GroupMembers::UserId)
                    .name("idx_group_members_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(EventEntries::Table)
                    .col(EventEntries::GroupId)
                    .name("idx_event_entries_group_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_event_entries_group_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_group_members_user_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_groups_leader_user_id").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Groups {
    Table,
    LeaderUserId,
}

#[derive(Iden)]
enum GroupMembers {
    Table,
    UserId,
}

#[derive(Iden)]
enum EventEntries {
    Table,
    GroupId,
}
