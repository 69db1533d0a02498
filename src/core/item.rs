//! Item business logic - line items on a receipt.

use crate::{
    core::{money::ensure_non_negative, receipt::get_receipt_for_user},
    entities::{FriendAssignment, Item, ItemAssignment, friend_assignment, item, item_assignment},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Adds an item to a receipt owned by `owner_id`.
///
/// # Errors
/// - [`Error::Validation`] for a blank name or a quantity below 1
/// - [`Error::InvalidAmount`] for a negative or non-finite unit price
/// - [`Error::ReceiptNotFound`] if the receipt is not the owner's
pub async fn add_item(
    db: &DatabaseConnection,
    owner_id: i64,
    receipt_id: i64,
    name: String,
    quantity: i32,
    price: f64,
) -> Result<item::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("Item name cannot be empty"));
    }
    if quantity < 1 {
        return Err(Error::validation(format!(
            "Item quantity must be at least 1, got {quantity}"
        )));
    }
    ensure_non_negative(price)?;

    get_receipt_for_user(db, owner_id, receipt_id).await?;

    let item = item::ActiveModel {
        receipt_id: Set(receipt_id),
        name: Set(name.trim().to_string()),
        quantity: Set(quantity),
        price: Set(price),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(receipt_id, item_id = item.id, "Added item");
    Ok(item)
}

/// Lists the items of a receipt, in the order they were added.
pub async fn get_items_for_receipt(
    db: &DatabaseConnection,
    owner_id: i64,
    receipt_id: i64,
) -> Result<Vec<item::Model>> {
    get_receipt_for_user(db, owner_id, receipt_id).await?;
    Item::find()
        .filter(item::Column::ReceiptId.eq(receipt_id))
        .order_by_asc(item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an item together with its units and their friend assignments.
///
/// # Errors
/// Returns [`Error::ItemNotFound`] if the item is not on the owner's receipt.
pub async fn delete_item(
    db: &DatabaseConnection,
    owner_id: i64,
    receipt_id: i64,
    item_id: i64,
) -> Result<()> {
    let txn = db.begin().await?;
    get_receipt_for_user(&txn, owner_id, receipt_id).await?;

    let item = Item::find_by_id(item_id)
        .filter(item::Column::ReceiptId.eq(receipt_id))
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            id: item_id.to_string(),
        })?;

    let unit_ids: Vec<i64> = ItemAssignment::find()
        .filter(item_assignment::Column::ItemId.eq(item.id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|unit| unit.id)
        .collect();

    if !unit_ids.is_empty() {
        FriendAssignment::delete_many()
            .filter(friend_assignment::Column::ItemAssignmentId.is_in(unit_ids.iter().copied()))
            .exec(&txn)
            .await?;
        ItemAssignment::delete_many()
            .filter(item_assignment::Column::Id.is_in(unit_ids))
            .exec(&txn)
            .await?;
    }
    item.delete(&txn).await?;

    txn.commit().await?;
    info!(receipt_id, item_id, "Deleted item");
    Ok(())
}
