//! Friend entity - A person bills are split with.
//!
//! Friends belong to exactly one user. They join receipts through
//! `receipt_friend` and share units through `friend_assignment`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Friend database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "friends")]
pub struct Model {
    /// Unique identifier for the friend
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user who owns this friend entry
    pub owner_id: i64,
    /// Name of the friend, unique per owner
    pub name: String,
    /// When the friend was added
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Friend and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each friend belongs to one user
    #[sea_orm(
        belongs_to = "super::app_user::Entity",
        from = "Column::OwnerId",
        to = "super::app_user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
    /// Units this friend shares
    #[sea_orm(has_many = "super::friend_assignment::Entity")]
    FriendAssignments,
    /// Receipts this friend participates in
    #[sea_orm(has_many = "super::receipt_friend::Entity")]
    ReceiptFriends,
}

impl Related<super::app_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::friend_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FriendAssignments.def()
    }
}

impl Related<super::receipt_friend::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReceiptFriends.def()
    }
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        super::receipt_friend::Relation::Receipt.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::receipt_friend::Relation::Friend.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
