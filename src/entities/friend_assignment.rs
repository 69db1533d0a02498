//! Friend assignment entity - "this friend shares this unit".
//!
//! The composite primary key makes a (friend, unit) pair unique.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Friend assignment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "friend_assignments")]
pub struct Model {
    /// ID of the friend sharing the unit
    #[sea_orm(primary_key, auto_increment = false)]
    pub friend_id: i64,
    /// ID of the shared unit
    #[sea_orm(primary_key, auto_increment = false)]
    pub item_assignment_id: i64,
}

/// Defines relationships between `FriendAssignment` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The friend side of the join
    #[sea_orm(
        belongs_to = "super::friend::Entity",
        from = "Column::FriendId",
        to = "super::friend::Column::Id",
        on_delete = "Cascade"
    )]
    Friend,
    /// The unit side of the join
    #[sea_orm(
        belongs_to = "super::item_assignment::Entity",
        from = "Column::ItemAssignmentId",
        to = "super::item_assignment::Column::Id",
        on_delete = "Cascade"
    )]
    ItemAssignment,
}

impl Related<super::friend::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Friend.def()
    }
}

impl Related<super::item_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemAssignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
