use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Aggregate statistics per (user, game), upserted after every
/// completed session.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_stats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i32,
    #[sea_orm(primary_key)]
    pub game_name: String,

    /// Running maximum across sessions.
    pub high_score: i64,
    /// Monotonic session counter.
    pub times_played: i32,
    /// Accumulated playtime in seconds.
    pub total_playtime: i64,

    pub last_played: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
