//! Item entity - A line on a receipt.
//!
//! `price` is the unit price; the line total is `quantity * price`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the receipt this item is printed on
    pub receipt_id: i64,
    /// Name of the item (e.g., "Pizza")
    pub name: String,
    /// Number of units bought, always at least 1
    pub quantity: i32,
    /// Price per unit in dollars
    pub price: f64,
}

impl Model {
    /// Line total: quantity times unit price.
    #[must_use]
    pub fn total_price(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// Defines relationships between Item and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item belongs to one receipt
    #[sea_orm(
        belongs_to = "super::receipt::Entity",
        from = "Column::ReceiptId",
        to = "super::receipt::Column::Id",
        on_delete = "Cascade"
    )]
    Receipt,
    /// One item decomposes into many units
    #[sea_orm(has_many = "super::item_assignment::Entity")]
    ItemAssignments,
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipt.def()
    }
}

impl Related<super::item_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemAssignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
