//! Cost aggregator - turns an assignment state into amounts owed per friend.
//!
//! Policy for the cases the data does not settle on its own:
//! - Units nobody shares, and item pieces not covered by any unit, are reported
//!   as unassigned cost. They are left out of the base that tax and tips are
//!   spread over, and reconciliation is then reported as incomplete.
//! - Each friend's total is rounded half-up to cents. The unrounded sum of the
//!   totals must match the receipt total within `tolerance`; a larger gap is a
//!   mismatch and nobody is charged for it. Otherwise the cents lost to rounding
//!   go to the last owing friend in ascending id order (if enabled).
//! - A breakdown always adds up: `subtotal + tax + tip + adjustment == total`.
//! - With `tips_included_in_total` set, tips are already part of the item prices
//!   and no tip share is charged.

use crate::{
    config::settings::SplitSettings,
    core::{
        graph::ReceiptGraph,
        money::{approx_eq, round_currency},
        split::share_of,
    },
    errors::{Error, Result},
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Differences below this are treated as float noise, not leftovers.
const FLOAT_NOISE: f64 = 1e-9;

/// What one friend owes for a receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct OwedBreakdown {
    /// Friend id
    pub friend_id: i64,
    /// Friend name, for display
    pub friend_name: String,
    /// Share of assigned unit prices, rounded to cents
    pub subtotal: f64,
    /// Share of tax, rounded to cents
    pub tax: f64,
    /// Share of tips, rounded to cents
    pub tip: f64,
    /// Rounding cents, so that the components add up to `total`
    pub adjustment: f64,
    /// Amount owed, rounded half-up to cents
    pub total: f64,
}

/// Recoverable problems found while aggregating.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregationWarning {
    /// A unit with no friends; its price is counted as unassigned
    UnassignedUnit {
        /// Unit id
        unit_id: i64,
        /// Item the unit belongs to
        item_id: i64,
        /// Price of the unit
        price: f64,
    },
    /// Part of an item is not covered by any unit
    UnassignedItemCost {
        /// Item id
        item_id: i64,
        /// Price not covered
        amount: f64,
    },
    /// Unassigned cost exists, so totals cannot match the receipt total
    Incomplete {
        /// Sum of all unassigned cost
        unassigned_cost: f64,
    },
    /// The rounding leftover was added to one friend
    RoundingAdjusted {
        /// Friend that absorbed the leftover
        friend_id: i64,
        /// Amount added (may be negative)
        amount: f64,
    },
    /// A rounding leftover within tolerance was left in place
    RoundingLeftover {
        /// Receipt total minus the sum of friend totals
        amount: f64,
    },
    /// Friend totals do not add up to the receipt total
    ReconciliationMismatch {
        /// Total stated on the receipt
        expected: f64,
        /// Sum of friend totals
        computed: f64,
    },
}

/// Result of [`compute_friend_totals`].
#[derive(Debug, Clone, PartialEq)]
pub struct FriendTotals {
    /// Receipt id
    pub receipt_id: i64,
    /// Amount owed per friend, keyed and ordered by friend id
    pub owed: BTreeMap<i64, OwedBreakdown>,
    /// Sum of unit prices that have at least one friend
    pub assigned_subtotal: f64,
    /// Tax computed for the assigned subtotal
    pub tax_amount: f64,
    /// Tips distributed to friends (0 when tips are part of the total)
    pub tips_amount: f64,
    /// Price of everything nobody has been assigned
    pub unassigned_cost: f64,
    /// Sum of all friends' totals
    pub computed_total: f64,
    /// Total stated on the receipt
    pub expected_total: f64,
    /// Recoverable problems found during aggregation
    pub warnings: Vec<AggregationWarning>,
}

impl FriendTotals {
    /// Whether the friend totals add up to the receipt total without problems.
    #[must_use]
    pub fn is_reconciled(&self) -> bool {
        !self.warnings.iter().any(|w| {
            matches!(
                w,
                AggregationWarning::Incomplete { .. }
                    | AggregationWarning::ReconciliationMismatch { .. }
            )
        })
    }

    /// Looks up the breakdown for a friend.
    #[must_use]
    pub fn for_friend(&self, friend_id: i64) -> Option<&OwedBreakdown> {
        self.owed.get(&friend_id)
    }
}

/// Computes what every participant and assigned friend owes.
///
/// The function is pure: calling it twice on the same graph gives the same result.
///
/// # Errors
/// - [`Error::Validation`] if the receipt's tax type is unknown
/// - [`Error::Consistency`] if the graph references units, items or friends it
///   does not contain, or an item's units cost more than the item
pub fn compute_friend_totals(graph: &ReceiptGraph, settings: &SplitSettings) -> Result<FriendTotals> {
    check_graph(graph, settings.reconciliation_tolerance)?;
    let tax_type = graph.tax_type()?;

    let mut warnings = Vec::new();
    let mut subtotals: BTreeMap<i64, f64> = BTreeMap::new();
    for participant in &graph.participants {
        subtotals.entry(participant.friend_id).or_default();
    }

    let mut assigned_subtotal = 0.0;
    let mut unassigned_cost = 0.0;

    for unit in &graph.units {
        let friend_ids = graph.friends_on_unit(unit.id);
        if friend_ids.is_empty() {
            warn!(unit_id = unit.id, "Unit has no friends assigned");
            unassigned_cost += unit.price;
            warnings.push(AggregationWarning::UnassignedUnit {
                unit_id: unit.id,
                item_id: unit.item_id,
                price: unit.price,
            });
            continue;
        }

        let share = share_of(unit.price, friend_ids.len());
        for friend_id in friend_ids {
            *subtotals.entry(friend_id).or_default() += share;
        }
        assigned_subtotal += unit.price;
    }

    for item in &graph.items {
        let covered: f64 = graph.units_for_item(item.id).map(|u| u.price).sum();
        let uncovered = item.total_price() - covered;
        if uncovered > FLOAT_NOISE {
            unassigned_cost += uncovered;
            warnings.push(AggregationWarning::UnassignedItemCost {
                item_id: item.id,
                amount: round_currency(uncovered),
            });
        }
    }

    let tax_amount = tax_type.tax_amount(graph.receipt.tax, assigned_subtotal);
    let tips_amount = if graph.receipt.tips_included_in_total {
        0.0
    } else {
        graph.receipt.tips
    };

    let mut owed = BTreeMap::new();
    let mut unrounded_total = 0.0;
    for (friend_id, subtotal) in subtotals {
        let proportion = if assigned_subtotal > 0.0 {
            subtotal / assigned_subtotal
        } else {
            0.0
        };
        let friend_tax = tax_amount * proportion;
        let friend_tip = tips_amount * proportion;
        let friend_name = graph
            .friend(friend_id)
            .map(|f| f.name.clone())
            .unwrap_or_default();
        unrounded_total += subtotal + friend_tax + friend_tip;

        owed.insert(
            friend_id,
            OwedBreakdown {
                friend_id,
                friend_name,
                subtotal: round_currency(subtotal),
                tax: round_currency(friend_tax),
                tip: round_currency(friend_tip),
                adjustment: 0.0,
                total: round_currency(subtotal + friend_tax + friend_tip),
            },
        );
    }

    let expected_total = graph.receipt.total;
    let mut computed_total = round_currency(owed.values().map(|o| o.total).sum());

    if unassigned_cost > FLOAT_NOISE {
        unassigned_cost = round_currency(unassigned_cost);
        warn!(
            receipt_id = graph.receipt.id,
            unassigned_cost, "Receipt has unassigned cost"
        );
        warnings.push(AggregationWarning::Incomplete { unassigned_cost });
    } else {
        unassigned_cost = 0.0;
        computed_total = reconcile(
            &mut owed,
            expected_total,
            unrounded_total,
            settings,
            &mut warnings,
        );
    }

    for breakdown in owed.values_mut() {
        breakdown.adjustment =
            round_currency(breakdown.total - breakdown.subtotal - breakdown.tax - breakdown.tip);
    }

    debug!(
        receipt_id = graph.receipt.id,
        friends = owed.len(),
        computed_total,
        expected_total,
        "Computed friend totals"
    );

    Ok(FriendTotals {
        receipt_id: graph.receipt.id,
        owed,
        assigned_subtotal: round_currency(assigned_subtotal),
        tax_amount: round_currency(tax_amount),
        tips_amount: round_currency(tips_amount),
        unassigned_cost,
        computed_total,
        expected_total,
        warnings,
    })
}

/// Matches the friend totals against the receipt total and returns their sum.
fn reconcile(
    owed: &mut BTreeMap<i64, OwedBreakdown>,
    expected_total: f64,
    unrounded_total: f64,
    settings: &SplitSettings,
    warnings: &mut Vec<AggregationWarning>,
) -> f64 {
    let computed_total = round_currency(owed.values().map(|o| o.total).sum());

    if !approx_eq(
        expected_total,
        unrounded_total,
        settings.reconciliation_tolerance + FLOAT_NOISE,
    ) {
        warn!(
            expected_total,
            computed_total, "Friend totals do not match the receipt total"
        );
        warnings.push(AggregationWarning::ReconciliationMismatch {
            expected: expected_total,
            computed: computed_total,
        });
        return computed_total;
    }

    let leftover = round_currency(expected_total - computed_total);
    if leftover.abs() < FLOAT_NOISE {
        return computed_total;
    }

    let last = owed.values_mut().rev().find(|o| o.total > 0.0);
    match last {
        Some(breakdown) if settings.assign_remainder_to_last => {
            breakdown.total = round_currency(breakdown.total + leftover);
            debug!(
                friend_id = breakdown.friend_id,
                leftover, "Assigned rounding leftover"
            );
            warnings.push(AggregationWarning::RoundingAdjusted {
                friend_id: breakdown.friend_id,
                amount: leftover,
            });
            round_currency(owed.values().map(|o| o.total).sum())
        }
        _ => {
            warnings.push(AggregationWarning::RoundingLeftover { amount: leftover });
            computed_total
        }
    }
}

fn check_graph(graph: &ReceiptGraph, tolerance: f64) -> Result<()> {
    for unit in &graph.units {
        if unit.receipt_id != graph.receipt.id || graph.item(unit.item_id).is_none() {
            return Err(Error::consistency(format!(
                "Unit {} references item {} outside receipt {}",
                unit.id, unit.item_id, graph.receipt.id
            )));
        }
    }

    for link in &graph.friend_assignments {
        if graph.unit(link.item_assignment_id).is_none() {
            return Err(Error::consistency(format!(
                "Friend assignment references unknown unit {}",
                link.item_assignment_id
            )));
        }
        if graph.friend(link.friend_id).is_none() {
            return Err(Error::consistency(format!(
                "Friend assignment references unknown friend {}",
                link.friend_id
            )));
        }
    }

    for item in &graph.items {
        let covered: f64 = graph.units_for_item(item.id).map(|u| u.price).sum();
        if covered > item.total_price() + tolerance + FLOAT_NOISE {
            return Err(Error::consistency(format!(
                "Units of '{}' cost {covered:.2} but the item costs {:.2}",
                item.name,
                item.total_price()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{assignment_fixture, graph_fixture, unit_fixture};

    fn settings() -> SplitSettings {
        SplitSettings::default()
    }

    #[test]
    fn test_pizza_split_evenly() {
        let mut graph = graph_fixture(&[("Pizza", 1, 20.0)], &["A", "B"]);
        graph.receipt.total = 20.0;
        graph.units.push(unit_fixture(10, 1, 1, 20.0));
        graph.friend_assignments.push(assignment_fixture(1, 10));
        graph.friend_assignments.push(assignment_fixture(2, 10));

        let totals = compute_friend_totals(&graph, &settings()).unwrap();
        assert_eq!(totals.for_friend(1).unwrap().total, 10.0);
        assert_eq!(totals.for_friend(2).unwrap().total, 10.0);
        assert_eq!(totals.computed_total, 20.0);
        assert!(totals.is_reconciled());
        assert!(totals.warnings.is_empty());
    }

    #[test]
    fn test_single_friend_bears_full_price() {
        let mut graph = graph_fixture(&[("Burger", 1, 12.75)], &["A"]);
        graph.receipt.total = 12.75;
        graph.units.push(unit_fixture(10, 1, 1, 12.75));
        graph.friend_assignments.push(assignment_fixture(1, 10));

        let totals = compute_friend_totals(&graph, &settings()).unwrap();
        assert_eq!(totals.for_friend(1).unwrap().subtotal, 12.75);
        assert_eq!(totals.for_friend(1).unwrap().total, 12.75);
    }

    #[test]
    fn test_soda_units_shared() {
        let mut graph = graph_fixture(&[("Soda", 3, 1.0)], &["A", "B"]);
        graph.receipt.total = 3.0;
        graph.units.push(unit_fixture(10, 1, 1, 1.0));
        graph.units.push(unit_fixture(11, 1, 1, 1.0));
        graph.units.push(unit_fixture(12, 1, 1, 1.0));
        graph.friend_assignments.push(assignment_fixture(1, 10));
        graph.friend_assignments.push(assignment_fixture(2, 11));
        graph.friend_assignments.push(assignment_fixture(1, 12));
        graph.friend_assignments.push(assignment_fixture(2, 12));

        let totals = compute_friend_totals(&graph, &settings()).unwrap();
        assert_eq!(totals.for_friend(1).unwrap().total, 1.5);
        assert_eq!(totals.for_friend(2).unwrap().total, 1.5);
    }

    #[test]
    fn test_tax_and_tips_proportional() {
        let mut graph = graph_fixture(&[("Steak", 1, 50.0), ("Pasta", 1, 50.0)], &["A", "B"]);
        graph.receipt.tax = 10.0;
        graph.receipt.tips = 5.0;
        graph.receipt.total = 115.0;
        graph.units.push(unit_fixture(10, 1, 1, 50.0));
        graph.units.push(unit_fixture(11, 2, 1, 50.0));
        graph.friend_assignments.push(assignment_fixture(1, 10));
        graph.friend_assignments.push(assignment_fixture(2, 11));

        let totals = compute_friend_totals(&graph, &settings()).unwrap();
        let a = totals.for_friend(1).unwrap();
        assert_eq!(a.subtotal, 50.0);
        assert_eq!(a.tax, 5.0);
        assert_eq!(a.tip, 2.5);
        assert_eq!(a.total, 57.5);
        assert_eq!(totals.for_friend(2).unwrap().total, 57.5);
        assert_eq!(totals.computed_total, 115.0);
        assert!(totals.is_reconciled());
    }

    #[test]
    fn test_percentage_tax_and_included_tips() {
        let mut graph = graph_fixture(&[("Salad", 1, 30.0), ("Soup", 1, 10.0)], &["A", "B"]);
        graph.receipt.tax_type = "percentage".to_string();
        graph.receipt.tax = 10.0;
        graph.receipt.tips = 6.0;
        graph.receipt.tips_included_in_total = true;
        graph.receipt.total = 44.0;
        graph.units.push(unit_fixture(10, 1, 1, 30.0));
        graph.units.push(unit_fixture(11, 2, 1, 10.0));
        graph.friend_assignments.push(assignment_fixture(1, 10));
        graph.friend_assignments.push(assignment_fixture(2, 11));

        let totals = compute_friend_totals(&graph, &settings()).unwrap();
        assert_eq!(totals.tax_amount, 4.0);
        assert_eq!(totals.tips_amount, 0.0);
        assert_eq!(totals.for_friend(1).unwrap().total, 33.0);
        assert_eq!(totals.for_friend(2).unwrap().total, 11.0);
        assert!(totals.is_reconciled());
    }

    #[test]
    fn test_rounding_leftover_goes_to_last_friend() {
        let mut graph = graph_fixture(&[("Cake", 1, 10.0)], &["A", "B", "C"]);
        graph.receipt.total = 10.0;
        graph.units.push(unit_fixture(10, 1, 1, 10.0));
        for friend_id in 1..=3 {
            graph
                .friend_assignments
                .push(assignment_fixture(friend_id, 10));
        }

        let totals = compute_friend_totals(&graph, &settings()).unwrap();
        assert_eq!(totals.for_friend(1).unwrap().total, 3.33);
        assert_eq!(totals.for_friend(2).unwrap().total, 3.33);
        assert_eq!(totals.for_friend(3).unwrap().total, 3.34);
        assert_eq!(totals.for_friend(3).unwrap().adjustment, 0.01);
        assert_eq!(totals.computed_total, 10.0);
        assert!(totals.is_reconciled());
        assert!(totals.warnings.contains(&AggregationWarning::RoundingAdjusted {
            friend_id: 3,
            amount: 0.01
        }));
    }

    #[test]
    fn test_rounding_leftover_kept_when_disabled() {
        let mut graph = graph_fixture(&[("Cake", 1, 10.0)], &["A", "B", "C"]);
        graph.receipt.total = 10.0;
        graph.units.push(unit_fixture(10, 1, 1, 10.0));
        for friend_id in 1..=3 {
            graph
                .friend_assignments
                .push(assignment_fixture(friend_id, 10));
        }
        let settings = SplitSettings {
            assign_remainder_to_last: false,
            ..SplitSettings::default()
        };

        let totals = compute_friend_totals(&graph, &settings).unwrap();
        assert_eq!(totals.for_friend(3).unwrap().total, 3.33);
        assert_eq!(totals.computed_total, 9.99);
        assert!(totals.is_reconciled());
        assert!(
            totals
                .warnings
                .contains(&AggregationWarning::RoundingLeftover { amount: 0.01 })
        );
    }

    #[test]
    fn test_mismatch_reported_with_best_effort_result() {
        let mut graph = graph_fixture(&[("Pizza", 1, 20.0)], &["A"]);
        graph.receipt.total = 25.0;
        graph.units.push(unit_fixture(10, 1, 1, 20.0));
        graph.friend_assignments.push(assignment_fixture(1, 10));

        let totals = compute_friend_totals(&graph, &settings()).unwrap();
        assert_eq!(totals.for_friend(1).unwrap().total, 20.0);
        assert!(!totals.is_reconciled());
        assert!(totals
            .warnings
            .contains(&AggregationWarning::ReconciliationMismatch {
                expected: 25.0,
                computed: 20.0
            }));
    }

    #[test]
    fn test_wrong_stated_total_is_mismatch_not_adjustment() {
        let names = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];
        let items: Vec<(&str, i32, f64)> = names.iter().map(|n| (*n, 1, 10.0)).collect();
        let mut graph = graph_fixture(&items, &names);
        graph.receipt.total = 100.09;
        for id in 1..=10 {
            graph.units.push(unit_fixture(10 + id, id, 1, 10.0));
            graph.friend_assignments.push(assignment_fixture(id, 10 + id));
        }

        let totals = compute_friend_totals(&graph, &settings()).unwrap();
        assert!(!totals.is_reconciled());
        assert_eq!(totals.for_friend(10).unwrap().total, 10.0);
        assert_eq!(totals.for_friend(10).unwrap().adjustment, 0.0);
        assert_eq!(totals.computed_total, 100.0);
        assert!(totals
            .warnings
            .contains(&AggregationWarning::ReconciliationMismatch {
                expected: 100.09,
                computed: 100.0
            }));
        assert!(!totals
            .warnings
            .iter()
            .any(|w| matches!(w, AggregationWarning::RoundingAdjusted { .. })));
    }

    #[test]
    fn test_adjusted_breakdown_adds_up() {
        let mut graph = graph_fixture(&[("Cake", 1, 10.0)], &["A", "B", "C"]);
        graph.receipt.tax = 1.0;
        graph.receipt.total = 11.0;
        graph.units.push(unit_fixture(10, 1, 1, 10.0));
        for friend_id in 1..=3 {
            graph
                .friend_assignments
                .push(assignment_fixture(friend_id, 10));
        }

        let totals = compute_friend_totals(&graph, &settings()).unwrap();
        assert!(totals.is_reconciled());
        assert!(totals.warnings.contains(&AggregationWarning::RoundingAdjusted {
            friend_id: 3,
            amount: -0.01
        }));
        for owed in totals.owed.values() {
            let parts = owed.subtotal + owed.tax + owed.tip + owed.adjustment;
            assert!((parts - owed.total).abs() < 1e-9, "{owed:?}");
        }
        let c = totals.for_friend(3).unwrap();
        assert_eq!(c.total, 3.66);
        assert_eq!(c.subtotal, 3.33);
        assert_eq!(c.tax, 0.33);
        assert_eq!(c.adjustment, 0.0);
        assert_eq!(totals.for_friend(1).unwrap().adjustment, 0.01);
        assert_eq!(totals.computed_total, 11.0);
    }

    #[test]
    fn test_leftover_within_tolerance_still_assigned() {
        let mut graph = graph_fixture(&[("Cake", 1, 10.0)], &["A", "B", "C"]);
        graph.receipt.total = 10.01;
        graph.units.push(unit_fixture(10, 1, 1, 10.0));
        for friend_id in 1..=3 {
            graph
                .friend_assignments
                .push(assignment_fixture(friend_id, 10));
        }

        let totals = compute_friend_totals(&graph, &settings()).unwrap();
        assert!(totals.is_reconciled());
        let c = totals.for_friend(3).unwrap();
        assert_eq!(c.total, 3.35);
        assert_eq!(c.adjustment, 0.02);
        assert_eq!(totals.computed_total, 10.01);
    }

    #[test]
    fn test_unassigned_cost_is_flagged_not_dropped() {
        let mut graph = graph_fixture(&[("Pizza", 1, 20.0), ("Wine", 1, 30.0)], &["A"]);
        graph.receipt.tax = 5.0;
        graph.receipt.total = 55.0;
        graph.units.push(unit_fixture(10, 1, 1, 20.0));
        graph.units.push(unit_fixture(11, 2, 1, 30.0));
        graph.friend_assignments.push(assignment_fixture(1, 10));

        let totals = compute_friend_totals(&graph, &settings()).unwrap();
        assert_eq!(totals.assigned_subtotal, 20.0);
        assert_eq!(totals.unassigned_cost, 30.0);
        // Tax goes entirely to the assigned base
        assert_eq!(totals.for_friend(1).unwrap().total, 25.0);
        assert!(!totals.is_reconciled());
        assert!(totals.warnings.contains(&AggregationWarning::UnassignedUnit {
            unit_id: 11,
            item_id: 2,
            price: 30.0
        }));
    }

    #[test]
    fn test_item_without_units_is_unassigned() {
        let mut graph = graph_fixture(&[("Fries", 2, 4.0)], &["A"]);
        graph.receipt.total = 8.0;
        graph.participants.push(crate::test_utils::participant_fixture(1));

        let totals = compute_friend_totals(&graph, &settings()).unwrap();
        assert_eq!(totals.unassigned_cost, 8.0);
        assert_eq!(totals.for_friend(1).unwrap().total, 0.0);
        assert!(totals.warnings.contains(&AggregationWarning::UnassignedItemCost {
            item_id: 1,
            amount: 8.0
        }));
    }

    #[test]
    fn test_compute_is_idempotent() {
        let mut graph = graph_fixture(&[("Cake", 1, 10.0)], &["A", "B", "C"]);
        graph.receipt.tax = 1.0;
        graph.receipt.total = 11.0;
        graph.units.push(unit_fixture(10, 1, 1, 10.0));
        for friend_id in 1..=3 {
            graph
                .friend_assignments
                .push(assignment_fixture(friend_id, 10));
        }

        let first = compute_friend_totals(&graph, &settings()).unwrap();
        let second = compute_friend_totals(&graph, &settings()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_inconsistent_graph_is_an_error() {
        let mut graph = graph_fixture(&[("Pizza", 1, 20.0)], &["A"]);
        graph.units.push(unit_fixture(10, 1, 1, 20.0));
        graph.friend_assignments.push(assignment_fixture(7, 10));
        assert!(matches!(
            compute_friend_totals(&graph, &settings()),
            Err(Error::Consistency { .. })
        ));

        let mut graph = graph_fixture(&[("Pizza", 1, 20.0)], &["A"]);
        graph.units.push(unit_fixture(10, 1, 1, 20.0));
        graph.units.push(unit_fixture(11, 1, 1, 20.0));
        assert!(matches!(
            compute_friend_totals(&graph, &settings()),
            Err(Error::Consistency { .. })
        ));
    }

    #[test]
    fn test_unknown_tax_type_is_validation_error() {
        let mut graph = graph_fixture(&[("Pizza", 1, 20.0)], &["A"]);
        graph.receipt.tax_type = "vat".to_string();
        assert!(matches!(
            compute_friend_totals(&graph, &settings()),
            Err(Error::Validation { .. })
        ));
    }
}
