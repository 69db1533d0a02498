//! Receipt entity - A bill to be split between friends.
//!
//! A receipt owns its items and the units generated from them. Tax is stored
//! either as a flat amount or as a percentage, tagged by `tax_type`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Receipt database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipts")]
pub struct Model {
    /// Unique identifier for the receipt
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user who owns this receipt
    pub owner_id: i64,
    /// Human-readable name (e.g., "Friday dinner")
    pub name: String,
    /// Tax value, interpreted according to `tax_type`
    pub tax: f64,
    /// Either `"amount"` (flat) or `"percentage"`
    pub tax_type: String,
    /// Tip amount in dollars
    pub tips: f64,
    /// Total printed on the receipt
    pub total: f64,
    /// Whether `total` already contains the tip
    pub tips_included_in_total: bool,
    /// When the receipt was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Receipt and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each receipt belongs to one user
    #[sea_orm(
        belongs_to = "super::app_user::Entity",
        from = "Column::OwnerId",
        to = "super::app_user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
    /// One receipt has many items
    #[sea_orm(has_many = "super::item::Entity")]
    Items,
    /// One receipt has many units
    #[sea_orm(has_many = "super::item_assignment::Entity")]
    ItemAssignments,
    /// Participant links to friends
    #[sea_orm(has_many = "super::receipt_friend::Entity")]
    ReceiptFriends,
}

impl Related<super::app_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::item_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemAssignments.def()
    }
}

impl Related<super::friend::Entity> for Entity {
    fn to() -> RelationDef {
        super::receipt_friend::Relation::Friend.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::receipt_friend::Relation::Receipt.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
