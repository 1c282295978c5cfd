//! Activity entity (append-only log of user actions).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Activity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    #[sea_orm(string_value = "watched")]
    Watched,
    #[sea_orm(string_value = "review")]
    Review,
    #[sea_orm(string_value = "watchlist")]
    Watchlist,
    #[sea_orm(string_value = "friend")]
    Friend,
    #[sea_orm(string_value = "post")]
    Post,
    #[sea_orm(string_value = "comment")]
    Comment,
    #[sea_orm(string_value = "like")]
    Like,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// External ID of the acting user
    pub user_id: String,

    pub activity_type: ActivityType,

    #[sea_orm(nullable)]
    pub movie_id: Option<String>,

    #[sea_orm(nullable)]
    pub movie_title: Option<String>,

    #[sea_orm(nullable)]
    pub movie_poster_path: Option<String>,

    /// Star rating, 0 to 5 (reviews only)
    #[sea_orm(nullable)]
    pub rating: Option<f32>,

    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,

    /// Counterpart external ID (friend activities only)
    #[sea_orm(nullable)]
    pub friend_id: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
