//! App user entity - The authenticated identity that owns receipts and friends.
//!
//! `external_id` is the identity handed to us by the chat platform; every lookup
//! in the core is scoped by the internal `id` resolved from it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// App user database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "app_users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Identity from the authentication provider (Discord user ID)
    #[sea_orm(unique)]
    pub external_id: String,
    /// Name shown in replies
    pub display_name: String,
    /// When the user was first seen
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `AppUser` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user owns many receipts
    #[sea_orm(has_many = "super::receipt::Entity")]
    Receipts,
    /// One user owns many friends
    #[sea_orm(has_many = "super::friend::Entity")]
    Friends,
}

impl Related<super::receipt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receipts.def()
    }
}

impl Related<super::friend::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Friends.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
