//! Item assignment entity - One individually assignable unit of an item.
//!
//! A unit covers `quantity` pieces of its item and carries the price of those
//! pieces. The receipt id is stored alongside the item id so a whole receipt's
//! units can be loaded with one query.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item assignment ("unit") database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item_assignments")]
pub struct Model {
    /// Unique identifier for the unit
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the item this unit splits
    pub item_id: i64,
    /// ID of the receipt the item belongs to
    pub receipt_id: i64,
    /// How many pieces of the item this unit covers
    pub quantity: i32,
    /// Price of this unit (`quantity * item.price`)
    pub price: f64,
    /// Label such as `"unit1"`
    pub unit_label: String,
}

/// Defines relationships between `ItemAssignment` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each unit belongs to one item
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id",
        on_delete = "Cascade"
    )]
    Item,
    /// Each unit belongs to one receipt
    #[sea_orm(
        belongs_to = "super::receipt::Entity",
        from = "Column::ReceiptId",
        to = "super::receipt::Column::Id",
        on_delete = "Cascade"
    )]
    Receipt,
    /// One unit is shared by many friends
    #[sea_orm(has_many = "super::friend_assignment::Entity")]
    FriendAssignments,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipt.def()
    }
}

impl Related<super::friend_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FriendAssignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
