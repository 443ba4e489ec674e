use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use serde_json::Value;
use tracing::instrument;

use crate::entity::{save_data, stats, user};
use crate::error::HostError;

/// Durable storage for users, save blobs and per-game statistics.
///
/// The store is the only owner of these rows; the launch coordinator
/// is the only writer of save and stats data during normal operation.
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn connect(db_url: &str) -> Result<Self, DbErr> {
        Ok(Self::new(crate::database::init_db(db_url).await?))
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    #[instrument(skip(self))]
    pub async fn create_user(&self, username: &str) -> Result<user::Model, HostError> {
        let new_user = user::ActiveModel {
            username: Set(username.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        new_user.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                HostError::DuplicateUser(username.to_owned())
            }
            _ => HostError::Db(e),
        })
    }

    pub async fn user_by_name(&self, username: &str) -> Result<user::Model, HostError> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .ok_or_else(|| HostError::UnknownUser(username.to_owned()))
    }

    pub async fn users(&self) -> Result<Vec<user::Model>, HostError> {
        Ok(user::Entity::find()
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await?)
    }

    /// Saves a game's serialized state, replacing any previous blob
    /// for the same (user, game) pair wholesale.
    pub async fn save_state(
        &self,
        user_id: i32,
        game_name: &str,
        data: Value,
    ) -> Result<(), HostError> {
        let row = save_data::ActiveModel {
            user_id: Set(user_id),
            game_name: Set(game_name.to_owned()),
            data: Set(data),
            updated_at: Set(Utc::now()),
        };

        save_data::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([save_data::Column::UserId, save_data::Column::GameName])
                    .update_columns([save_data::Column::Data, save_data::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn load_state(
        &self,
        user_id: i32,
        game_name: &str,
    ) -> Result<Option<Value>, HostError> {
        Ok(save_data::Entity::find_by_id((user_id, game_name.to_owned()))
            .one(&self.db)
            .await?
            .map(|row| row.data))
    }

    /// Records one completed session.
    ///
    /// First occurrence inserts the row; conflicts resolve the
    /// MAX/increment/accumulate triple inside the single upsert
    /// statement, so there is no read-then-write window.
    #[instrument(skip(self))]
    pub async fn record_session(
        &self,
        user_id: i32,
        game_name: &str,
        score: i64,
        playtime_secs: i64,
    ) -> Result<(), HostError> {
        let row = stats::ActiveModel {
            user_id: Set(user_id),
            game_name: Set(game_name.to_owned()),
            high_score: Set(score),
            times_played: Set(1),
            total_playtime: Set(playtime_secs),
            last_played: Set(Utc::now()),
        };

        stats::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([stats::Column::UserId, stats::Column::GameName])
                    .value(
                        stats::Column::HighScore,
                        Expr::cust("MAX(high_score, excluded.high_score)"),
                    )
                    .value(
                        stats::Column::TimesPlayed,
                        Expr::col(stats::Column::TimesPlayed).add(1),
                    )
                    .value(
                        stats::Column::TotalPlaytime,
                        Expr::col(stats::Column::TotalPlaytime).add(playtime_secs),
                    )
                    .update_column(stats::Column::LastPlayed)
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// All statistics rows for a user, best score first.
    pub async fn stats_for(&self, user_id: i32) -> Result<Vec<stats::Model>, HostError> {
        Ok(stats::Entity::find()
            .filter(stats::Column::UserId.eq(user_id))
            .order_by_desc(stats::Column::HighScore)
            .all(&self.db)
            .await?)
    }

    pub async fn stats(
        &self,
        user_id: i32,
        game_name: &str,
    ) -> Result<Option<stats::Model>, HostError> {
        Ok(stats::Entity::find_by_id((user_id, game_name.to_owned()))
            .one(&self.db)
            .await?)
    }
}
