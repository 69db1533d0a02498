//! Receipt graph - a materialized snapshot of one receipt.
//!
//! The assignment engine and the cost aggregator never query the database
//! themselves. They work on a [`ReceiptGraph`] loaded here, which holds the
//! receipt, its items, units and friend assignments, the owner's friends and the
//! participant links, all keyed by plain ids.

use crate::{
    core::money::TaxType,
    entities::{
        FriendAssignment, ItemAssignment, ReceiptFriend, friend, friend_assignment, item,
        item_assignment, receipt, receipt_friend,
    },
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};
use tracing::debug;

/// Everything needed to plan assignments and compute totals for one receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptGraph {
    /// The receipt itself
    pub receipt: receipt::Model,
    /// Items on the receipt, ordered by id
    pub items: Vec<item::Model>,
    /// Units of those items, ordered by id
    pub units: Vec<item_assignment::Model>,
    /// Friend-to-unit links for the units above
    pub friend_assignments: Vec<friend_assignment::Model>,
    /// All friends owned by the receipt's owner, ordered by id
    pub friends: Vec<friend::Model>,
    /// Participant links of the receipt
    pub participants: Vec<receipt_friend::Model>,
}

impl ReceiptGraph {
    /// Finds an item on this receipt.
    #[must_use]
    pub fn item(&self, item_id: i64) -> Option<&item::Model> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Finds a unit on this receipt.
    #[must_use]
    pub fn unit(&self, unit_id: i64) -> Option<&item_assignment::Model> {
        self.units.iter().find(|unit| unit.id == unit_id)
    }

    /// Finds a friend owned by the receipt's owner.
    #[must_use]
    pub fn friend(&self, friend_id: i64) -> Option<&friend::Model> {
        self.friends.iter().find(|friend| friend.id == friend_id)
    }

    /// Units that split the given item.
    pub fn units_for_item(&self, item_id: i64) -> impl Iterator<Item = &item_assignment::Model> {
        self.units.iter().filter(move |unit| unit.item_id == item_id)
    }

    /// Friend ids sharing the given unit, ascending.
    #[must_use]
    pub fn friends_on_unit(&self, unit_id: i64) -> Vec<i64> {
        let mut ids: Vec<i64> = self
            .friend_assignments
            .iter()
            .filter(|fa| fa.item_assignment_id == unit_id)
            .map(|fa| fa.friend_id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Whether the friend is linked to the receipt as a participant.
    #[must_use]
    pub fn is_participant(&self, friend_id: i64) -> bool {
        self.participants.iter().any(|p| p.friend_id == friend_id)
    }

    /// Parsed tax type of the receipt.
    pub fn tax_type(&self) -> Result<TaxType> {
        self.receipt.tax_type.parse()
    }
}

/// Loads the full graph of a receipt owned by `owner_id`.
///
/// # Errors
/// Returns [`crate::errors::Error::ReceiptNotFound`] when the receipt does not
/// exist or belongs to another user.
pub async fn load_receipt_graph<C>(db: &C, owner_id: i64, receipt_id: i64) -> Result<ReceiptGraph>
where
    C: ConnectionTrait,
{
    let receipt = crate::core::receipt::get_receipt_for_user(db, owner_id, receipt_id).await?;

    let items = crate::entities::Item::find()
        .filter(item::Column::ReceiptId.eq(receipt_id))
        .order_by_asc(item::Column::Id)
        .all(db)
        .await?;

    let units = ItemAssignment::find()
        .filter(item_assignment::Column::ReceiptId.eq(receipt_id))
        .order_by_asc(item_assignment::Column::Id)
        .all(db)
        .await?;

    let friend_assignments = if units.is_empty() {
        Vec::new()
    } else {
        FriendAssignment::find()
            .filter(
                friend_assignment::Column::ItemAssignmentId.is_in(units.iter().map(|u| u.id)),
            )
            .order_by_asc(friend_assignment::Column::ItemAssignmentId)
            .order_by_asc(friend_assignment::Column::FriendId)
            .all(db)
            .await?
    };

    let friends = crate::entities::Friend::find()
        .filter(friend::Column::OwnerId.eq(owner_id))
        .order_by_asc(friend::Column::Id)
        .all(db)
        .await?;

    let participants = ReceiptFriend::find()
        .filter(receipt_friend::Column::ReceiptId.eq(receipt_id))
        .order_by_asc(receipt_friend::Column::FriendId)
        .all(db)
        .await?;

    debug!(
        receipt_id,
        items = items.len(),
        units = units.len(),
        assignments = friend_assignments.len(),
        "Loaded receipt graph"
    );

    Ok(ReceiptGraph {
        receipt,
        items,
        units,
        friend_assignments,
        friends,
        participants,
    })
}
