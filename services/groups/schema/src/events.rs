use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub approved: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::groups::Entity")]
    Groups,
    #[sea_orm(has_many = "super::event_entries::Entity")]
    EventEntries,
    #[sea_orm(has_many = "super::event_participants::Entity")]
    EventParticipants,
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Groups.def()
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
