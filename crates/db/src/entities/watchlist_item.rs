//! Watchlist item entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "watchlist_item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// External ID of the owning user
    pub user_id: String,

    /// Movie database ID
    pub movie_id: String,

    pub title: String,

    #[sea_orm(nullable)]
    pub poster_path: Option<String>,

    #[sea_orm(nullable)]
    pub release_date: Option<String>,

    pub added_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
