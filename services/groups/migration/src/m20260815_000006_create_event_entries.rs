use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventEntries::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EventEntries::UserId).uuid().not_null())
                    .col(ColumnDef::new(EventEntries::EventId).uuid().not_null())
                    .col(ColumnDef::new(EventEntries::GroupId).uuid())
                    .col(
                        ColumnDef::new(EventEntries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(EventEntries::UserId)
                            .col(EventEntries::EventId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EventEntries::Table, EventEntries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EventEntries::Table, EventEntries::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    // A dropped group must clear the pointer, not delete the entry.
                    .foreign_key(
                        ForeignKey::create()
                            .from(EventEntries::Table, EventEntries::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventEntries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum EventEntries {
    Table,
    UserId,
    EventId,
    GroupId,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
}

#[derive(Iden)]
enum Groups {
    Table,
    Id,
}
