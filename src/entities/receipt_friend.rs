//! Receipt friend entity - join table for receipt participants.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Receipt participant database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipt_friends")]
pub struct Model {
    /// ID of the receipt
    #[sea_orm(primary_key, auto_increment = false)]
    pub receipt_id: i64,
    /// ID of the participating friend
    #[sea_orm(primary_key, auto_increment = false)]
    pub friend_id: i64,
}

/// Defines relationships between `ReceiptFriend` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The receipt side of the join
    #[sea_orm(
        belongs_to = "super::receipt::Entity",
        from = "Column::ReceiptId",
        to = "super::receipt::Column::Id",
        on_delete = "Cascade"
    )]
    Receipt,
    /// The friend side of the join
    #[sea_orm(
        belongs_to = "super::friend::Entity",
        from = "Column::FriendId",
        to = "super::friend::Column::Id",
        on_delete = "Cascade"
    )]
    Friend,
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipt.def()
    }
}

impl Related<super::friend::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Friend.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
