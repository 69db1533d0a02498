//! Assignment operations - applies assignment engine plans to the database.
//!
//! Each operation loads a fresh [`ReceiptGraph`](crate::core::graph::ReceiptGraph)
//! inside a database transaction, asks [`crate::core::split`] for a plan and
//! writes the resulting units and friend assignments before committing. Nothing
//! is shared between calls.

use crate::{
    core::{
        graph::load_receipt_graph,
        split::{self, ItemPlan, UnitRequest},
    },
    entities::{
        FriendAssignment, ItemAssignment, ReceiptFriend, friend_assignment, item_assignment,
        receipt_friend,
    },
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::{debug, info};

/// A unit as stored, with the friends sharing it.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedUnit {
    /// The stored unit
    pub unit: item_assignment::Model,
    /// Friends sharing the unit
    pub friend_ids: Vec<i64>,
}

impl AssignedUnit {
    /// What each friend on this unit pays before tax and tips.
    #[must_use]
    pub fn per_friend_share(&self) -> f64 {
        split::share_of(self.unit.price, self.friend_ids.len())
    }
}

/// Units of one item after an assignment operation.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitAssignmentResult {
    /// Item the units belong to
    pub item_id: i64,
    /// Units touched by the operation
    pub units: Vec<AssignedUnit>,
}

/// Outcome of removing a friend from a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnassignOutcome {
    /// Unit the friend left
    pub unit_id: i64,
    /// Friend that left
    pub friend_id: i64,
    /// Friends still sharing the unit
    pub remaining_friend_ids: Vec<i64>,
    /// The unit was deleted because nobody shares it any more
    pub unit_removed: bool,
}

/// Assigns a whole item to a group of friends as a single unit, replacing any
/// previous units of the item.
///
/// # Errors
/// - [`Error::Validation`] if `friend_ids` is empty
/// - [`Error::ReceiptNotFound`], [`Error::ItemNotFound`] or
///   [`Error::FriendNotFound`] if a reference does not belong to the owner
pub async fn assign_whole_item(
    db: &DatabaseConnection,
    owner_id: i64,
    receipt_id: i64,
    item_id: i64,
    friend_ids: &[i64],
) -> Result<UnitAssignmentResult> {
    if friend_ids.is_empty() {
        return Err(Error::validation(
            "At least one friend is required to assign an item",
        ));
    }

    let txn = db.begin().await?;
    let graph = load_receipt_graph(&txn, owner_id, receipt_id).await?;
    let plan = split::plan_whole_item(&graph, item_id, friend_ids)?;
    let result = apply_item_plan(&txn, &plan).await?;
    txn.commit().await?;

    info!(
        receipt_id,
        item_id,
        friends = friend_ids.len(),
        "Assigned whole item"
    );
    Ok(result)
}

/// Splits an item into units, one per request, replacing any previous units.
///
/// # Errors
/// - [`Error::Validation`] if the requests are empty, a unit has no friends or
///   a quantity below 1, or the quantities do not sum to the item quantity
/// - [`Error::ReceiptNotFound`], [`Error::ItemNotFound`] or
///   [`Error::FriendNotFound`] if a reference does not belong to the owner
pub async fn split_item(
    db: &DatabaseConnection,
    owner_id: i64,
    receipt_id: i64,
    item_id: i64,
    requests: &[UnitRequest],
) -> Result<UnitAssignmentResult> {
    if requests.is_empty() {
        return Err(Error::validation("A split needs at least one unit"));
    }

    let txn = db.begin().await?;
    let graph = load_receipt_graph(&txn, owner_id, receipt_id).await?;
    let plan = split::plan_split_item(&graph, item_id, requests)?;
    let result = apply_item_plan(&txn, &plan).await?;
    txn.commit().await?;

    info!(receipt_id, item_id, units = result.units.len(), "Split item");
    Ok(result)
}

/// Removes every unit of an item so it counts as unassigned again.
///
/// Returns the number of units removed.
pub async fn clear_item(
    db: &DatabaseConnection,
    owner_id: i64,
    receipt_id: i64,
    item_id: i64,
) -> Result<usize> {
    let txn = db.begin().await?;
    let graph = load_receipt_graph(&txn, owner_id, receipt_id).await?;
    let plan = split::plan_clear_item(&graph, item_id)?;
    apply_item_plan(&txn, &plan).await?;
    txn.commit().await?;

    info!(
        receipt_id,
        item_id,
        removed = plan.replaced_unit_ids.len(),
        "Cleared item assignments"
    );
    Ok(plan.replaced_unit_ids.len())
}

/// Adds a friend to an existing unit.
///
/// # Errors
/// - [`Error::UnitNotFound`] or [`Error::FriendNotFound`] for unknown references
/// - [`Error::Validation`] if the friend already shares the unit
pub async fn attach_friend(
    db: &DatabaseConnection,
    owner_id: i64,
    receipt_id: i64,
    unit_id: i64,
    friend_id: i64,
) -> Result<UnitAssignmentResult> {
    let txn = db.begin().await?;
    let graph = load_receipt_graph(&txn, owner_id, receipt_id).await?;
    let plan = split::plan_attach(&graph, unit_id, friend_id)?;

    if plan.new_participant {
        insert_participant(&txn, receipt_id, friend_id).await?;
    }
    insert_friend_assignment(&txn, friend_id, unit_id).await?;

    let unit = graph
        .unit(unit_id)
        .cloned()
        .ok_or_else(|| Error::UnitNotFound {
            id: unit_id.to_string(),
        })?;
    txn.commit().await?;

    info!(receipt_id, unit_id, friend_id, "Attached friend to unit");
    Ok(UnitAssignmentResult {
        item_id: unit.item_id,
        units: vec![AssignedUnit {
            unit,
            friend_ids: plan.friend_ids_after,
        }],
    })
}

/// Removes a friend from a unit, deleting the unit when it ends up empty.
///
/// # Errors
/// - [`Error::UnitNotFound`] if the unit is not on the receipt
/// - [`Error::FriendNotFound`] if the friend does not share the unit
pub async fn unassign_friend(
    db: &DatabaseConnection,
    owner_id: i64,
    receipt_id: i64,
    unit_id: i64,
    friend_id: i64,
) -> Result<UnassignOutcome> {
    let txn = db.begin().await?;
    let graph = load_receipt_graph(&txn, owner_id, receipt_id).await?;
    let plan = split::plan_unassign(&graph, unit_id, friend_id)?;

    FriendAssignment::delete_many()
        .filter(friend_assignment::Column::ItemAssignmentId.eq(unit_id))
        .filter(friend_assignment::Column::FriendId.eq(friend_id))
        .exec(&txn)
        .await?;

    if plan.remove_unit {
        ItemAssignment::delete_by_id(unit_id).exec(&txn).await?;
        debug!(unit_id, "Deleted orphaned unit");
    }
    txn.commit().await?;

    info!(
        receipt_id,
        unit_id,
        friend_id,
        unit_removed = plan.remove_unit,
        "Unassigned friend from unit"
    );
    Ok(UnassignOutcome {
        unit_id,
        friend_id,
        remaining_friend_ids: plan.remaining_friend_ids,
        unit_removed: plan.remove_unit,
    })
}

async fn apply_item_plan<C>(db: &C, plan: &ItemPlan) -> Result<UnitAssignmentResult>
where
    C: ConnectionTrait,
{
    if !plan.replaced_unit_ids.is_empty() {
        FriendAssignment::delete_many()
            .filter(
                friend_assignment::Column::ItemAssignmentId
                    .is_in(plan.replaced_unit_ids.iter().copied()),
            )
            .exec(db)
            .await?;
        ItemAssignment::delete_many()
            .filter(item_assignment::Column::Id.is_in(plan.replaced_unit_ids.iter().copied()))
            .exec(db)
            .await?;
    }

    for &friend_id in &plan.new_participants {
        insert_participant(db, plan.receipt_id, friend_id).await?;
    }

    let mut units = Vec::with_capacity(plan.units.len());
    for planned in &plan.units {
        let unit = item_assignment::ActiveModel {
            item_id: Set(plan.item_id),
            receipt_id: Set(plan.receipt_id),
            quantity: Set(planned.quantity),
            price: Set(planned.price),
            unit_label: Set(planned.unit_label.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        for &friend_id in &planned.friend_ids {
            insert_friend_assignment(db, friend_id, unit.id).await?;
        }

        units.push(AssignedUnit {
            unit,
            friend_ids: planned.friend_ids.clone(),
        });
    }

    Ok(UnitAssignmentResult {
        item_id: plan.item_id,
        units,
    })
}

async fn insert_friend_assignment<C>(db: &C, friend_id: i64, unit_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let link = friend_assignment::ActiveModel {
        friend_id: Set(friend_id),
        item_assignment_id: Set(unit_id),
    };
    FriendAssignment::insert(link)
        .exec_without_returning(db)
        .await?;
    Ok(())
}

pub(crate) async fn insert_participant<C>(db: &C, receipt_id: i64, friend_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let link = receipt_friend::ActiveModel {
        receipt_id: Set(receipt_id),
        friend_id: Set(friend_id),
    };
    ReceiptFriend::insert(link)
        .exec_without_returning(db)
        .await?;
    Ok(())
}
