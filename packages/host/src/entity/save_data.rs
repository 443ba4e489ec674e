use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Last-known save state per (user, game). At most one row per pair;
/// every save replaces the payload wholesale.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "save_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i32,
    #[sea_orm(primary_key)]
    pub game_name: String,

    pub data: Json,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
