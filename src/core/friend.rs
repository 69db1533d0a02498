//! Friend business logic - the people receipts are split with.
//!
//! Friends belong to one user. They join receipts as participants through the
//! `receipt_friends` join table and never hold references back to receipts.

use crate::{
    core::{assignment::insert_participant, receipt::get_receipt_for_user},
    entities::{
        Friend, FriendAssignment, ItemAssignment, ReceiptFriend, friend, friend_assignment,
        item_assignment, receipt_friend,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, SqlErr, TransactionTrait, prelude::*};
use tracing::{debug, info};

/// Adds a friend for `owner_id`.
///
/// # Errors
/// Returns [`Error::Validation`] for a blank name or a name the owner already uses.
pub async fn create_friend(
    db: &DatabaseConnection,
    owner_id: i64,
    name: String,
) -> Result<friend::Model> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(Error::validation("Friend name cannot be empty"));
    }

    if get_friend_by_name(db, owner_id, &name).await?.is_some() {
        return Err(Error::validation(format!(
            "A friend named '{name}' already exists"
        )));
    }

    // Concurrent adds are rejected by the unique (owner_id, name) index
    let friend = friend::ActiveModel {
        owner_id: Set(owner_id),
        name: Set(name.clone()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            Error::validation(format!("A friend named '{name}' already exists"))
        }
        _ => err.into(),
    })?;

    info!(friend_id = friend.id, owner_id, "Created friend");
    Ok(friend)
}

/// Lists the owner's friends alphabetically.
pub async fn get_friends_for_user(
    db: &DatabaseConnection,
    owner_id: i64,
) -> Result<Vec<friend::Model>> {
    Friend::find()
        .filter(friend::Column::OwnerId.eq(owner_id))
        .order_by_asc(friend::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds one of the owner's friends by exact name.
pub async fn get_friend_by_name(
    db: &DatabaseConnection,
    owner_id: i64,
    name: &str,
) -> Result<Option<friend::Model>> {
    Friend::find()
        .filter(friend::Column::OwnerId.eq(owner_id))
        .filter(friend::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Like [`get_friend_by_name`], but a missing friend is an error.
///
/// # Errors
/// Returns [`Error::FriendNotFound`] if the owner has no friend with that name.
pub async fn require_friend_by_name(
    db: &DatabaseConnection,
    owner_id: i64,
    name: &str,
) -> Result<friend::Model> {
    get_friend_by_name(db, owner_id, name)
        .await?
        .ok_or_else(|| Error::FriendNotFound {
            name: name.trim().to_string(),
        })
}

/// Resolves a list of friend names to ids, keeping the order given.
///
/// # Errors
/// Returns [`Error::FriendNotFound`] for the first name the owner does not have.
pub async fn resolve_friend_ids(
    db: &DatabaseConnection,
    owner_id: i64,
    names: &[String],
) -> Result<Vec<i64>> {
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        ids.push(require_friend_by_name(db, owner_id, name).await?.id);
    }
    Ok(ids)
}

/// Lists the participants of a receipt alphabetically.
pub async fn get_participants(
    db: &DatabaseConnection,
    owner_id: i64,
    receipt_id: i64,
) -> Result<Vec<friend::Model>> {
    get_receipt_for_user(db, owner_id, receipt_id).await?;
    Friend::find()
        .inner_join(ReceiptFriend)
        .filter(receipt_friend::Column::ReceiptId.eq(receipt_id))
        .order_by_asc(friend::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Links a friend to a receipt as a participant. Linking twice is a no-op.
///
/// Returns whether a new link was created.
pub async fn add_participant(
    db: &DatabaseConnection,
    owner_id: i64,
    receipt_id: i64,
    friend_id: i64,
) -> Result<bool> {
    get_receipt_for_user(db, owner_id, receipt_id).await?;
    get_owned_friend(db, owner_id, friend_id).await?;

    let existing = ReceiptFriend::find_by_id((receipt_id, friend_id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(false);
    }

    insert_participant(db, receipt_id, friend_id).await?;
    info!(receipt_id, friend_id, "Added participant");
    Ok(true)
}

/// Removes a participant link.
///
/// # Errors
/// Returns [`Error::Validation`] while the friend still shares units of the
/// receipt, and [`Error::FriendNotFound`] if the friend is not a participant.
pub async fn remove_participant(
    db: &DatabaseConnection,
    owner_id: i64,
    receipt_id: i64,
    friend_id: i64,
) -> Result<()> {
    let txn = db.begin().await?;
    get_receipt_for_user(&txn, owner_id, receipt_id).await?;

    let shared_units = FriendAssignment::find()
        .inner_join(ItemAssignment)
        .filter(friend_assignment::Column::FriendId.eq(friend_id))
        .filter(item_assignment::Column::ReceiptId.eq(receipt_id))
        .count(&txn)
        .await?;
    if shared_units > 0 {
        return Err(Error::validation(format!(
            "Friend {friend_id} still shares {shared_units} unit(s) on this receipt"
        )));
    }

    let removed = ReceiptFriend::delete_by_id((receipt_id, friend_id))
        .exec(&txn)
        .await?;
    if removed.rows_affected == 0 {
        return Err(Error::FriendNotFound {
            name: friend_id.to_string(),
        });
    }

    txn.commit().await?;
    info!(receipt_id, friend_id, "Removed participant");
    Ok(())
}

/// Deletes a friend, their unit shares and participant links. Units that end up
/// with nobody sharing them are deleted as well.
pub async fn delete_friend(db: &DatabaseConnection, owner_id: i64, friend_id: i64) -> Result<()> {
    let txn = db.begin().await?;
    let friend = get_owned_friend(&txn, owner_id, friend_id).await?;

    let unit_ids: Vec<i64> = FriendAssignment::find()
        .filter(friend_assignment::Column::FriendId.eq(friend_id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|link| link.item_assignment_id)
        .collect();

    FriendAssignment::delete_many()
        .filter(friend_assignment::Column::FriendId.eq(friend_id))
        .exec(&txn)
        .await?;

    for unit_id in unit_ids {
        let remaining = FriendAssignment::find()
            .filter(friend_assignment::Column::ItemAssignmentId.eq(unit_id))
            .count(&txn)
            .await?;
        if remaining == 0 {
            ItemAssignment::delete_by_id(unit_id).exec(&txn).await?;
            debug!(unit_id, "Deleted orphaned unit");
        }
    }

    ReceiptFriend::delete_many()
        .filter(receipt_friend::Column::FriendId.eq(friend_id))
        .exec(&txn)
        .await?;
    friend.delete(&txn).await?;

    txn.commit().await?;
    info!(friend_id, owner_id, "Deleted friend");
    Ok(())
}

async fn get_owned_friend<C>(db: &C, owner_id: i64, friend_id: i64) -> Result<friend::Model>
where
    C: ConnectionTrait,
{
    Friend::find_by_id(friend_id)
        .filter(friend::Column::OwnerId.eq(owner_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::FriendNotFound {
            name: friend_id.to_string(),
        })
}
