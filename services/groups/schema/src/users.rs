use sea_orm::entity::prelude::*;

/// User account. `deleted_at` is the soft-delete marker; the row survives
/// until an admin runs the permanent delete.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(nullable)]
    pub display_name: Option<String>,
    pub role: i16,
    pub is_banned: bool,
    #[sea_orm(nullable)]
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::groups::Entity")]
    LedGroups,
    #[sea_orm(has_many = "super::group_members::Entity")]
    GroupMembers,
    #[sea_orm(has_many = "super::event_entries::Entity")]
    EventEntries,
    #[sea_orm(has_many = "super::event_participants::Entity")]
    EventParticipants,
}

impl Related<super::group_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GroupMembers.def()
    }
}

impl Related<super::event_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventEntries.def()
    }
}

impl Related<super::event_participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventParticipants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
