//! User entity (local mirror of an identity-provider account).

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Denormalized set of friend external IDs.
///
/// Stored as a JSON array; set semantics are maintained by
/// [`FriendIds::insert`], not by a storage constraint.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult,
)]
pub struct FriendIds(pub Vec<String>);

impl FriendIds {
    /// Whether the set contains `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|f| f == id)
    }

    /// Add-to-set: insert `id` if absent. Returns true if inserted.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.0.push(id.to_string());
        true
    }

    /// Number of friends.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Identity-provider subject ID; immutable correlation key.
    #[sea_orm(unique)]
    pub external_id: String,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    /// Avatar URL from the identity provider (empty if unset)
    #[sea_orm(default_value = "")]
    pub profile_picture: String,

    /// Denormalized friends set (external IDs), maintained by the
    /// friendship materializer
    #[sea_orm(column_type = "Json")]
    pub friends: FriendIds,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
