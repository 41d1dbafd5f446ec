use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use awase_domain::pagination::{PageRequest, Sort};
use awase_groups_schema::{event_entries, event_participants, group_members, groups, users};

use crate::domain::repository::{
    GroupRepository, MembershipRepository, ParticipationRepository, UserRepository,
};
use crate::domain::types::{Group, Membership, User, UserFilter, UserSortBy};
use crate::error::GroupsServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, GroupsServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn list(
        &self,
        filter: UserFilter,
        sort_by: UserSortBy,
        page: PageRequest,
    ) -> Result<Vec<User>, GroupsServiceError> {
        let mut query = users::Entity::find();
        if let Some(role) = filter.role {
            query = query.filter(users::Column::Role.eq(role.as_u8() as i16));
        }
        if let Some(deleted) = filter.deleted {
            query = if deleted {
                query.filter(users::Column::DeletedAt.is_not_null())
            } else {
                query.filter(users::Column::DeletedAt.is_null())
            };
        }
        query = match sort_by {
            UserSortBy::CreatedAt(Sort::Desc) => query.order_by_desc(users::Column::CreatedAt),
            UserSortBy::CreatedAt(Sort::Asc) => query.order_by_asc(users::Column::CreatedAt),
            UserSortBy::Email(Sort::Desc) => query.order_by_desc(users::Column::Email),
            UserSortBy::Email(Sort::Asc) => query.order_by_asc(users::Column::Email),
        };
        let models = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn set_deleted_at(
        &self,
        id: Uuid,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<bool, GroupsServiceError> {
        let result = users::Entity::update_many()
            .filter(users::Column::Id.eq(id))
            .col_expr(users::Column::DeletedAt, Expr::value(deleted_at))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("set user deleted_at")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, GroupsServiceError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        display_name: model.display_name,
        role: model.role as u8,
        is_banned: model.is_banned,
        deleted_at: model.deleted_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Group repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbGroupRepository {
    pub db: DatabaseConnection,
}

impl GroupRepository for DbGroupRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, GroupsServiceError> {
        let model = groups::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find group by id")?;
        Ok(model.map(group_from_model))
    }

    async fn code_exists(&self, code: &str) -> Result<bool, GroupsServiceError> {
        let count = groups::Entity::find()
            .filter(groups::Column::Code.eq(code))
            .count(&self.db)
            .await
            .context("count groups by code")?;
        Ok(count > 0)
    }

    async fn list_led_by(&self, leader_user_id: Uuid) -> Result<Vec<Group>, GroupsServiceError> {
        let models = groups::Entity::find()
            .filter(groups::Column::LeaderUserId.eq(leader_user_id))
            .order_by_asc(groups::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list groups led by user")?;
        Ok(models.into_iter().map(group_from_model).collect())
    }

    async fn create_with_leader(&self, group: &Group) -> Result<(), GroupsServiceError> {
        let group = group.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    groups::ActiveModel {
                        id: Set(group.id),
                        event_id: Set(group.event_id),
                        code: Set(group.code.clone()),
                        name: Set(group.name.clone()),
                        theme: Set(group.theme.clone()),
                        description: Set(group.description.clone()),
                        owner_note: Set(group.owner_note.clone()),
                        max_members: Set(group.max_members),
                        leader_user_id: Set(group.leader_user_id),
                        created_at: Set(group.created_at),
                        updated_at: Set(group.updated_at),
                    }
                    .insert(txn)
                    .await?;

                    group_members::ActiveModel {
                        group_id: Set(group.id),
                        user_id: Set(group.leader_user_id),
                        joined_at: Set(group.created_at),
                    }
                    .insert(txn)
                    .await?;
                    Ok(())
                })
            })
            .await
            .context("create group with leader membership")?;
        Ok(())
    }

    async fn update_leader(
        &self,
        group_id: Uuid,
        new_leader_id: Uuid,
    ) -> Result<bool, GroupsServiceError> {
        let result = groups::Entity::update_many()
            .filter(groups::Column::Id.eq(group_id))
            .col_expr(groups::Column::LeaderUserId, Expr::value(new_leader_id))
            .col_expr(groups::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("update group leader")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, group_id: Uuid) -> Result<(), GroupsServiceError> {
        groups::Entity::delete_by_id(group_id)
            .exec(&self.db)
            .await
            .context("delete group")?;
        Ok(())
    }
}

fn group_from_model(model: groups::Model) -> Group {
    Group {
        id: model.id,
        event_id: model.event_id,
        code: model.code,
        name: model.name,
        theme: model.theme,
        description: model.description,
        owner_note: model.owner_note,
        max_members: model.max_members,
        leader_user_id: model.leader_user_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Membership repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMembershipRepository {
    pub db: DatabaseConnection,
}

impl MembershipRepository for DbMembershipRepository {
    async fn find(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Membership>, GroupsServiceError> {
        let model = group_members::Entity::find_by_id((group_id, user_id))
            .one(&self.db)
            .await
            .context("find membership")?;
        Ok(model.map(membership_from_model))
    }

    async fn list_by_group(&self, group_id: Uuid) -> Result<Vec<Membership>, GroupsServiceError> {
        let models = group_members::Entity::find()
            .filter(group_members::Column::GroupId.eq(group_id))
            .order_by_asc(group_members::Column::JoinedAt)
            .all(&self.db)
            .await
            .context("list group members")?;
        Ok(models.into_iter().map(membership_from_model).collect())
    }

    async fn list_by_user_and_event(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<Vec<Membership>, GroupsServiceError> {
        let models = group_members::Entity::find()
            .filter(group_members::Column::UserId.eq(user_id))
            .join(JoinType::InnerJoin, group_members::Relation::Group.def())
            .filter(groups::Column::EventId.eq(event_id))
            .order_by_asc(group_members::Column::JoinedAt)
            .all(&self.db)
            .await
            .context("list memberships by user and event")?;
        Ok(models.into_iter().map(membership_from_model).collect())
    }

    async fn upsert(&self, membership: &Membership) -> Result<bool, GroupsServiceError> {
        let row = group_members::ActiveModel {
            group_id: Set(membership.group_id),
            user_id: Set(membership.user_id),
            joined_at: Set(membership.joined_at),
        };
        // The composite PK is the idempotency guard: a second join hits the
        // conflict arm and affects zero rows.
        let inserted = group_members::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    group_members::Column::GroupId,
                    group_members::Column::UserId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("upsert membership")?;
        Ok(inserted > 0)
    }

    async fn member_count(&self, group_id: Uuid) -> Result<u64, GroupsServiceError> {
        let count = group_members::Entity::find()
            .filter(group_members::Column::GroupId.eq(group_id))
            .count(&self.db)
            .await
            .context("count group members")?;
        Ok(count)
    }

    async fn remove_and_repoint(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        event_id: Uuid,
        next_group_id: Option<Uuid>,
    ) -> Result<(), GroupsServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    group_members::Entity::delete_many()
                        .filter(group_members::Column::GroupId.eq(group_id))
                        .filter(group_members::Column::UserId.eq(user_id))
                        .exec(txn)
                        .await?;

                    let entry = event_entries::ActiveModel {
                        user_id: Set(user_id),
                        event_id: Set(event_id),
                        group_id: Set(next_group_id),
                        updated_at: Set(Utc::now()),
                    };
                    event_entries::Entity::insert(entry)
                        .on_conflict(
                            OnConflict::columns([
                                event_entries::Column::UserId,
                                event_entries::Column::EventId,
                            ])
                            .update_columns([
                                event_entries::Column::GroupId,
                                event_entries::Column::UpdatedAt,
                            ])
                            .to_owned(),
                        )
                        .exec_without_returning(txn)
                        .await?;
                    Ok(())
                })
            })
            .await
            .context("remove membership and repoint event entry")?;
        Ok(())
    }
}

fn membership_from_model(model: group_members::Model) -> Membership {
    Membership {
        group_id: model.group_id,
        user_id: model.user_id,
        joined_at: model.joined_at,
    }
}

// ── Participation repository ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbParticipationRepository {
    pub db: DatabaseConnection,
}

impl ParticipationRepository for DbParticipationRepository {
    async fn is_event_participant(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, GroupsServiceError> {
        let model = event_participants::Entity::find_by_id((event_id, user_id))
            .one(&self.db)
            .await
            .context("find event participant")?;
        Ok(model.is_some())
    }
}
