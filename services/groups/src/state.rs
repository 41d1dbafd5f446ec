use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbGroupRepository, DbMembershipRepository, DbParticipationRepository, DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn group_repo(&self) -> DbGroupRepository {
        DbGroupRepository {
            db: self.db.clone(),
        }
    }

    pub fn membership_repo(&self) -> DbMembershipRepository {
        DbMembershipRepository {
            db: self.db.clone(),
        }
    }

    pub fn participation_repo(&self) -> DbParticipationRepository {
        DbParticipationRepository {
            db: self.db.clone(),
        }
    }
}
