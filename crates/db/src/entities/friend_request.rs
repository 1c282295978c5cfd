//! Friend request entity (the relationship-request ledger).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Friend request status.
///
/// `Accepted` and `Rejected` are terminal; cancellation deletes the row
/// instead of adding a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "friend_request")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// External ID of the user who sent the request
    pub sender_id: String,

    /// External ID of the user who received the request
    pub receiver_id: String,

    /// Normalized unordered pair key (sorted `"{lo}:{hi}"`).
    ///
    /// Unique, so both orderings of the same pair collide at the storage
    /// layer regardless of which side sends first.
    #[sea_orm(unique)]
    pub pair_key: String,

    pub status: RequestStatus,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

// No relation to `user`: requests reference external IDs and are retained
// when the identity provider deletes a user.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Normalized key for an unordered user pair.
#[must_use]
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}:{b}")
    } else {
        format!("{b}:{a}")
    }
}
