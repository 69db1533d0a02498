//! Assignment engine - plans how items are cut into units and shared by friends.
//!
//! Everything here is pure: a plan is computed from a [`ReceiptGraph`] snapshot and
//! handed to [`crate::core::assignment`], which writes it in one transaction.
//!
//! Splitting an item into units keeps each person's cost an equal share of one
//! unit's price rather than an arbitrary fraction of the item total.

use crate::{
    core::graph::ReceiptGraph,
    errors::{Error, Result},
};
use tracing::debug;

/// One entry of a split request: how many pieces go into the unit and who shares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRequest {
    /// Pieces of the item covered by this unit
    pub quantity: i32,
    /// Friends sharing the unit
    pub friend_ids: Vec<i64>,
}

impl UnitRequest {
    /// Creates a request for `quantity` pieces shared by `friend_ids`.
    #[must_use]
    pub fn new(quantity: i32, friend_ids: Vec<i64>) -> Self {
        Self {
            quantity,
            friend_ids,
        }
    }
}

/// A unit the engine wants created.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedUnit {
    /// Label such as `"unit1"`
    pub unit_label: String,
    /// Pieces of the item covered
    pub quantity: i32,
    /// `quantity * item.price`
    pub price: f64,
    /// Friends sharing the unit, duplicates removed
    pub friend_ids: Vec<i64>,
}

impl PlannedUnit {
    /// What each friend on this unit pays before tax and tips.
    #[must_use]
    pub fn per_friend_share(&self) -> f64 {
        share_of(self.price, self.friend_ids.len())
    }
}

/// Replacement of all units of one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPlan {
    /// Receipt the item is on
    pub receipt_id: i64,
    /// Item being (re)assigned
    pub item_id: i64,
    /// Existing units of the item that are removed first
    pub replaced_unit_ids: Vec<i64>,
    /// Units to create, in label order
    pub units: Vec<PlannedUnit>,
    /// Friends that must be linked to the receipt as participants
    pub new_participants: Vec<i64>,
}

/// Adding one friend to an existing unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachPlan {
    /// Unit the friend joins
    pub unit_id: i64,
    /// Friend joining the unit
    pub friend_id: i64,
    /// Whether the friend must also be linked to the receipt
    pub new_participant: bool,
    /// Friends on the unit after the attach, ascending
    pub friend_ids_after: Vec<i64>,
}

/// Removing one friend from a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnassignPlan {
    /// Unit the friend leaves
    pub unit_id: i64,
    /// Friend leaving the unit
    pub friend_id: i64,
    /// Friends left on the unit, ascending
    pub remaining_friend_ids: Vec<i64>,
    /// The unit has no friends left and is deleted
    pub remove_unit: bool,
}

/// Price share of one friend when `price` is split `friend_count` ways.
///
/// Returns the full price for a zero count; callers check for empty friend lists
/// before dividing.
#[must_use]
pub fn share_of(price: f64, friend_count: usize) -> f64 {
    if friend_count == 0 {
        return price;
    }
    // Friend counts are tiny, precision loss is impossible in practice
    #[allow(clippy::cast_precision_loss)]
    let divisor = friend_count as f64;
    price / divisor
}

/// Plans a single unit covering the whole item, shared by `friend_ids`.
///
/// # Errors
/// - [`Error::Validation`] if `friend_ids` is empty
/// - [`Error::ItemNotFound`] if the item is not on the receipt
/// - [`Error::FriendNotFound`] if a friend is not owned by the receipt's owner
pub fn plan_whole_item(graph: &ReceiptGraph, item_id: i64, friend_ids: &[i64]) -> Result<ItemPlan> {
    if friend_ids.is_empty() {
        return Err(Error::validation(
            "At least one friend is required to assign an item",
        ));
    }

    let item = graph.item(item_id).ok_or_else(|| Error::ItemNotFound {
        id: item_id.to_string(),
    })?;

    plan_item(graph, item_id, &[UnitRequest::new(item.quantity, friend_ids.to_vec())])
}

/// Plans one unit per request, each priced `item.price * request.quantity`.
///
/// # Errors
/// - [`Error::Validation`] if there are no requests, a request has a quantity
///   below 1 or no friends, or the quantities do not sum to the item quantity
/// - [`Error::ItemNotFound`] if the item is not on the receipt
/// - [`Error::FriendNotFound`] if a friend is not owned by the receipt's owner
pub fn plan_split_item(
    graph: &ReceiptGraph,
    item_id: i64,
    requests: &[UnitRequest],
) -> Result<ItemPlan> {
    if requests.is_empty() {
        return Err(Error::validation("A split needs at least one unit"));
    }
    plan_item(graph, item_id, requests)
}

/// Plans removing every unit of an item, leaving it unassigned.
///
/// # Errors
/// Returns [`Error::ItemNotFound`] if the item is not on the receipt.
pub fn plan_clear_item(graph: &ReceiptGraph, item_id: i64) -> Result<ItemPlan> {
    if graph.item(item_id).is_none() {
        return Err(Error::ItemNotFound {
            id: item_id.to_string(),
        });
    }
    Ok(ItemPlan {
        receipt_id: graph.receipt.id,
        item_id,
        replaced_unit_ids: graph.units_for_item(item_id).map(|u| u.id).collect(),
        units: Vec::new(),
        new_participants: Vec::new(),
    })
}

fn plan_item(graph: &ReceiptGraph, item_id: i64, requests: &[UnitRequest]) -> Result<ItemPlan> {
    let item = graph.item(item_id).ok_or_else(|| Error::ItemNotFound {
        id: item_id.to_string(),
    })?;

    let mut quantity_sum: i64 = 0;
    for (index, request) in requests.iter().enumerate() {
        if request.quantity < 1 {
            return Err(Error::validation(format!(
                "Unit {} must cover at least one piece, got {}",
                index + 1,
                request.quantity
            )));
        }
        if request.friend_ids.is_empty() {
            return Err(Error::validation(format!(
                "Unit {} has no friends assigned",
                index + 1
            )));
        }
        quantity_sum += i64::from(request.quantity);
    }

    if quantity_sum != i64::from(item.quantity) {
        return Err(Error::validation(format!(
            "Unit quantities add up to {quantity_sum} but '{}' has quantity {}",
            item.name, item.quantity
        )));
    }

    let mut new_participants = Vec::new();
    let mut units = Vec::with_capacity(requests.len());
    for (index, request) in requests.iter().enumerate() {
        let friend_ids = dedup_preserving_order(&request.friend_ids);
        for &friend_id in &friend_ids {
            ensure_friend(graph, friend_id)?;
            if !graph.is_participant(friend_id) && !new_participants.contains(&friend_id) {
                new_participants.push(friend_id);
            }
        }

        units.push(PlannedUnit {
            unit_label: format!("unit{}", index + 1),
            quantity: request.quantity,
            price: item.price * f64::from(request.quantity),
            friend_ids,
        });
    }

    let replaced_unit_ids: Vec<i64> = graph.units_for_item(item_id).map(|u| u.id).collect();

    debug!(
        item_id,
        units = units.len(),
        replaced = replaced_unit_ids.len(),
        "Planned item assignment"
    );

    Ok(ItemPlan {
        receipt_id: graph.receipt.id,
        item_id,
        replaced_unit_ids,
        units,
        new_participants,
    })
}

/// Plans attaching a friend to an existing unit.
///
/// # Errors
/// - [`Error::UnitNotFound`] if the unit is not on the receipt
/// - [`Error::FriendNotFound`] if the friend is not owned by the receipt's owner
/// - [`Error::Validation`] if the friend already shares the unit
pub fn plan_attach(graph: &ReceiptGraph, unit_id: i64, friend_id: i64) -> Result<AttachPlan> {
    if graph.unit(unit_id).is_none() {
        return Err(Error::UnitNotFound {
            id: unit_id.to_string(),
        });
    }
    ensure_friend(graph, friend_id)?;

    let mut friend_ids = graph.friends_on_unit(unit_id);
    if friend_ids.contains(&friend_id) {
        return Err(Error::validation(format!(
            "Friend {friend_id} already shares unit {unit_id}"
        )));
    }
    friend_ids.push(friend_id);
    friend_ids.sort_unstable();

    Ok(AttachPlan {
        unit_id,
        friend_id,
        new_participant: !graph.is_participant(friend_id),
        friend_ids_after: friend_ids,
    })
}

/// Plans removing a friend from a unit. A unit left without friends is deleted.
///
/// # Errors
/// - [`Error::UnitNotFound`] if the unit is not on the receipt
/// - [`Error::FriendNotFound`] if the friend does not share the unit
pub fn plan_unassign(graph: &ReceiptGraph, unit_id: i64, friend_id: i64) -> Result<UnassignPlan> {
    if graph.unit(unit_id).is_none() {
        return Err(Error::UnitNotFound {
            id: unit_id.to_string(),
        });
    }

    let mut remaining = graph.friends_on_unit(unit_id);
    let Some(position) = remaining.iter().position(|&id| id == friend_id) else {
        return Err(Error::FriendNotFound {
            name: friend_id.to_string(),
        });
    };
    remaining.remove(position);

    Ok(UnassignPlan {
        unit_id,
        friend_id,
        remove_unit: remaining.is_empty(),
        remaining_friend_ids: remaining,
    })
}

fn ensure_friend(graph: &ReceiptGraph, friend_id: i64) -> Result<()> {
    if graph.friend(friend_id).is_none() {
        return Err(Error::FriendNotFound {
            name: friend_id.to_string(),
        });
    }
    Ok(())
}

fn dedup_preserving_order(ids: &[i64]) -> Vec<i64> {
    let mut seen = Vec::with_capacity(ids.len());
    for &id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::graph_fixture;

    #[test]
    fn test_whole_item_single_unit() {
        let graph = graph_fixture(&[("Pizza", 1, 20.0)], &["Alice", "Bob"]);
        let plan = plan_whole_item(&graph, 1, &[1, 2]).unwrap();

        assert_eq!(plan.units.len(), 1);
        let unit = &plan.units[0];
        assert_eq!(unit.unit_label, "unit1");
        assert_eq!(unit.quantity, 1);
        assert_eq!(unit.price, 20.0);
        assert_eq!(unit.per_friend_share(), 10.0);
        assert_eq!(plan.new_participants, vec![1, 2]);
    }

    #[test]
    fn test_whole_item_multi_quantity_keeps_full_price() {
        let graph = graph_fixture(&[("Beer", 4, 6.5)], &["Alice"]);
        let plan = plan_whole_item(&graph, 1, &[1]).unwrap();

        assert_eq!(plan.units[0].quantity, 4);
        assert_eq!(plan.units[0].price, 26.0);
        assert_eq!(plan.units[0].per_friend_share(), 26.0);
    }

    #[test]
    fn test_whole_item_requires_friends() {
        let graph = graph_fixture(&[("Pizza", 1, 20.0)], &["Alice"]);
        let result = plan_whole_item(&graph, 1, &[]);
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_whole_item_unknown_item_or_friend() {
        let graph = graph_fixture(&[("Pizza", 1, 20.0)], &["Alice"]);
        assert!(matches!(
            plan_whole_item(&graph, 99, &[1]),
            Err(Error::ItemNotFound { .. })
        ));
        assert!(matches!(
            plan_whole_item(&graph, 1, &[1, 42]),
            Err(Error::FriendNotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_friends_are_collapsed() {
        let graph = graph_fixture(&[("Pizza", 1, 20.0)], &["Alice", "Bob"]);
        let plan = plan_whole_item(&graph, 1, &[2, 1, 2]).unwrap();
        assert_eq!(plan.units[0].friend_ids, vec![2, 1]);
        assert_eq!(plan.units[0].per_friend_share(), 10.0);
    }

    #[test]
    fn test_shares_of_single_piece_sum_to_price() {
        let graph = graph_fixture(&[("Cake", 1, 10.0)], &["A", "B", "C"]);
        let plan = plan_whole_item(&graph, 1, &[1, 2, 3]).unwrap();
        let unit = &plan.units[0];
        let sum: f64 = unit.friend_ids.iter().map(|_| unit.per_friend_share()).sum();
        assert!((sum - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_split_soda_into_three_units() {
        let graph = graph_fixture(&[("Soda", 3, 1.0)], &["A", "B"]);
        let requests = vec![
            UnitRequest::new(1, vec![1]),
            UnitRequest::new(1, vec![2]),
            UnitRequest::new(1, vec![1, 2]),
        ];
        let plan = plan_split_item(&graph, 1, &requests).unwrap();

        let prices: Vec<f64> = plan.units.iter().map(|u| u.price).collect();
        assert_eq!(prices, vec![1.0, 1.0, 1.0]);
        let labels: Vec<&str> = plan.units.iter().map(|u| u.unit_label.as_str()).collect();
        assert_eq!(labels, vec!["unit1", "unit2", "unit3"]);
        assert_eq!(plan.units[2].per_friend_share(), 0.5);
    }

    #[test]
    fn test_split_uneven_quantities() {
        let graph = graph_fixture(&[("Tacos", 5, 2.5)], &["A", "B"]);
        let requests = vec![UnitRequest::new(3, vec![1]), UnitRequest::new(2, vec![2])];
        let plan = plan_split_item(&graph, 1, &requests).unwrap();
        assert_eq!(plan.units[0].price, 7.5);
        assert_eq!(plan.units[1].price, 5.0);
    }

    #[test]
    fn test_split_quantity_mismatch_fails() {
        let graph = graph_fixture(&[("Soda", 3, 1.0)], &["A", "B"]);

        let too_few = vec![UnitRequest::new(1, vec![1]), UnitRequest::new(1, vec![2])];
        assert!(matches!(
            plan_split_item(&graph, 1, &too_few),
            Err(Error::Validation { .. })
        ));

        let too_many = vec![UnitRequest::new(2, vec![1]), UnitRequest::new(2, vec![2])];
        assert!(matches!(
            plan_split_item(&graph, 1, &too_many),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_split_rejects_empty_units() {
        let graph = graph_fixture(&[("Soda", 2, 1.0)], &["A"]);

        let no_friends = vec![UnitRequest::new(1, vec![1]), UnitRequest::new(1, vec![])];
        assert!(matches!(
            plan_split_item(&graph, 1, &no_friends),
            Err(Error::Validation { .. })
        ));

        let zero_quantity = vec![UnitRequest::new(2, vec![1]), UnitRequest::new(0, vec![1])];
        assert!(matches!(
            plan_split_item(&graph, 1, &zero_quantity),
            Err(Error::Validation { .. })
        ));

        assert!(matches!(
            plan_split_item(&graph, 1, &[]),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_clear_item_lists_existing_units() {
        let mut graph = graph_fixture(&[("Soda", 2, 1.0)], &["A"]);
        graph.units.push(crate::test_utils::unit_fixture(10, 1, 2, 2.0));
        let plan = plan_clear_item(&graph, 1).unwrap();
        assert_eq!(plan.replaced_unit_ids, vec![10]);
        assert!(plan.units.is_empty());
        assert!(matches!(
            plan_clear_item(&graph, 2),
            Err(Error::ItemNotFound { .. })
        ));
    }

    #[test]
    fn test_attach_and_unassign_plans() {
        let mut graph = graph_fixture(&[("Pizza", 1, 20.0)], &["A", "B"]);
        graph.units.push(crate::test_utils::unit_fixture(10, 1, 1, 20.0));
        graph
            .friend_assignments
            .push(crate::test_utils::assignment_fixture(1, 10));

        let attach = plan_attach(&graph, 10, 2).unwrap();
        assert_eq!(attach.friend_ids_after, vec![1, 2]);
        assert!(attach.new_participant);

        assert!(matches!(
            plan_attach(&graph, 10, 1),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            plan_attach(&graph, 11, 2),
            Err(Error::UnitNotFound { .. })
        ));

        let unassign = plan_unassign(&graph, 10, 1).unwrap();
        assert!(unassign.remove_unit);
        assert!(unassign.remaining_friend_ids.is_empty());

        assert!(matches!(
            plan_unassign(&graph, 10, 2),
            Err(Error::FriendNotFound { .. })
        ));
    }
}
