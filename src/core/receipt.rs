//! Receipt business logic - creating, listing, updating and deleting receipts.
//!
//! Every lookup is scoped to the owning user; a receipt owned by someone else
//! behaves exactly like a missing one.

use crate::{
    core::money::{TaxType, approx_eq, ensure_non_negative, round_currency},
    entities::{
        FriendAssignment, Item, ItemAssignment, Receipt, ReceiptFriend, friend_assignment, item,
        item_assignment, receipt, receipt_friend,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// Tax, tips and total of a receipt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReceiptCharges {
    /// Tax value, interpreted according to `tax_type`
    pub tax: f64,
    /// How `tax` is interpreted
    pub tax_type: TaxType,
    /// Tip amount
    pub tips: f64,
    /// Total printed on the receipt
    pub total: f64,
    /// Whether `total` already contains the tip
    pub tips_included_in_total: bool,
}

impl ReceiptCharges {
    /// Charges with no tax or tips and the given total.
    #[must_use]
    pub const fn with_total(total: f64) -> Self {
        Self {
            tax: 0.0,
            tax_type: TaxType::Amount,
            tips: 0.0,
            total,
            tips_included_in_total: false,
        }
    }

    fn validate(&self) -> Result<()> {
        ensure_non_negative(self.tax)?;
        ensure_non_negative(self.tips)?;
        ensure_non_negative(self.total)?;
        Ok(())
    }
}

/// Comparison of a receipt's stated total against its items.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptReconciliation {
    /// Sum of item line totals
    pub items_subtotal: f64,
    /// Tax computed from the receipt's tax type
    pub tax_amount: f64,
    /// Tips that still need to be added on top
    pub tips_amount: f64,
    /// `items_subtotal + tax_amount + tips_amount`
    pub expected_total: f64,
    /// Total stated on the receipt
    pub stated_total: f64,
}

impl ReceiptReconciliation {
    /// Stated total minus the expected total.
    #[must_use]
    pub fn difference(&self) -> f64 {
        round_currency(self.stated_total - self.expected_total)
    }

    /// Whether the stated total matches within `tolerance`.
    #[must_use]
    pub fn is_consistent(&self, tolerance: f64) -> bool {
        approx_eq(self.difference(), 0.0, tolerance + 1e-9)
    }
}

/// Creates a receipt owned by `owner_id`.
///
/// # Errors
/// Returns [`Error::Validation`] for a blank name and [`Error::InvalidAmount`]
/// for negative or non-finite charges.
pub async fn create_receipt(
    db: &DatabaseConnection,
    owner_id: i64,
    name: String,
    charges: ReceiptCharges,
) -> Result<receipt::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("Receipt name cannot be empty"));
    }
    charges.validate()?;

    let receipt = receipt::ActiveModel {
        owner_id: Set(owner_id),
        name: Set(name.trim().to_string()),
        tax: Set(charges.tax),
        tax_type: Set(charges.tax_type.as_str().to_string()),
        tips: Set(charges.tips),
        total: Set(charges.total),
        tips_included_in_total: Set(charges.tips_included_in_total),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(receipt_id = receipt.id, owner_id, "Created receipt");
    Ok(receipt)
}

/// Lists the user's receipts, newest first.
pub async fn get_receipts_for_user(
    db: &DatabaseConnection,
    owner_id: i64,
) -> Result<Vec<receipt::Model>> {
    Receipt::find()
        .filter(receipt::Column::OwnerId.eq(owner_id))
        .order_by_desc(receipt::Column::CreatedAt)
        .order_by_desc(receipt::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Fetches a receipt owned by `owner_id`.
///
/// # Errors
/// Returns [`Error::ReceiptNotFound`] when the receipt is missing or owned by
/// another user.
pub async fn get_receipt_for_user<C>(db: &C, owner_id: i64, receipt_id: i64) -> Result<receipt::Model>
where
    C: ConnectionTrait,
{
    Receipt::find_by_id(receipt_id)
        .filter(receipt::Column::OwnerId.eq(owner_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::ReceiptNotFound {
            id: receipt_id.to_string(),
        })
}

/// Replaces tax, tips and total of a receipt.
pub async fn update_receipt_charges(
    db: &DatabaseConnection,
    owner_id: i64,
    receipt_id: i64,
    charges: ReceiptCharges,
) -> Result<receipt::Model> {
    charges.validate()?;
    let receipt = get_receipt_for_user(db, owner_id, receipt_id).await?;

    let mut active: receipt::ActiveModel = receipt.into();
    active.tax = Set(charges.tax);
    active.tax_type = Set(charges.tax_type.as_str().to_string());
    active.tips = Set(charges.tips);
    active.total = Set(charges.total);
    active.tips_included_in_total = Set(charges.tips_included_in_total);
    let updated = active.update(db).await?;

    info!(receipt_id, "Updated receipt charges");
    Ok(updated)
}

/// Deletes a receipt together with its items, units, friend assignments and
/// participant links.
pub async fn delete_receipt(db: &DatabaseConnection, owner_id: i64, receipt_id: i64) -> Result<()> {
    let txn = db.begin().await?;
    get_receipt_for_user(&txn, owner_id, receipt_id).await?;

    let unit_ids: Vec<i64> = ItemAssignment::find()
        .filter(item_assignment::Column::ReceiptId.eq(receipt_id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|unit| unit.id)
        .collect();

    if !unit_ids.is_empty() {
        FriendAssignment::delete_many()
            .filter(friend_assignment::Column::ItemAssignmentId.is_in(unit_ids))
            .exec(&txn)
            .await?;
    }
    ItemAssignment::delete_many()
        .filter(item_assignment::Column::ReceiptId.eq(receipt_id))
        .exec(&txn)
        .await?;
    Item::delete_many()
        .filter(item::Column::ReceiptId.eq(receipt_id))
        .exec(&txn)
        .await?;
    ReceiptFriend::delete_many()
        .filter(receipt_friend::Column::ReceiptId.eq(receipt_id))
        .exec(&txn)
        .await?;
    Receipt::delete_by_id(receipt_id).exec(&txn).await?;

    txn.commit().await?;
    info!(receipt_id, owner_id, "Deleted receipt");
    Ok(())
}

/// Checks the stated total of a receipt against its items, tax and tips.
///
/// # Errors
/// Returns [`Error::Validation`] if the receipt's tax type is unknown.
pub fn reconcile_receipt(
    receipt: &receipt::Model,
    items: &[item::Model],
) -> Result<ReceiptReconciliation> {
    let tax_type: TaxType = receipt.tax_type.parse()?;
    let items_subtotal: f64 = items.iter().map(item::Model::total_price).sum();
    let tax_amount = tax_type.tax_amount(receipt.tax, items_subtotal);
    let tips_amount = if receipt.tips_included_in_total {
        0.0
    } else {
        receipt.tips
    };

    Ok(ReceiptReconciliation {
        items_subtotal: round_currency(items_subtotal),
        tax_amount: round_currency(tax_amount),
        tips_amount: round_currency(tips_amount),
        expected_total: round_currency(items_subtotal + tax_amount + tips_amount),
        stated_total: receipt.total,
    })
}
