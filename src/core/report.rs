//! Report generation business logic.
//!
//! Turns receipts, assignment results and computed totals into display lines.
//! All functions are framework-agnostic; the bot layer only joins the strings.

use crate::{
    core::{
        assignment::{AssignedUnit, UnassignOutcome},
        graph::ReceiptGraph,
        money::format_money,
        receipt::ReceiptReconciliation,
        split::share_of,
        totals::{AggregationWarning, FriendTotals, OwedBreakdown},
    },
    entities::receipt,
};

const UNKNOWN_FRIEND: &str = "unknown friend";

/// One-line summary of a receipt for listings.
///
/// # Returns
/// Formatted string like `#3 Dinner | total $48.00 | tax 8.0% | tips $5.00`
#[must_use]
pub fn format_receipt_line(receipt: &receipt::Model) -> String {
    let tax = if receipt.tax_type == "percentage" {
        format!("{:.1}%", receipt.tax)
    } else {
        format_money(receipt.tax)
    };
    let tips = if receipt.tips_included_in_total {
        "tips included".to_string()
    } else {
        format!("tips {}", format_money(receipt.tips))
    };

    format!(
        "#{} {} | total {} | tax {tax} | {tips}",
        receipt.id,
        receipt.name,
        format_money(receipt.total)
    )
}

/// Lists the items of a receipt with their units and who shares them.
#[must_use]
pub fn format_receipt_overview(graph: &ReceiptGraph) -> Vec<String> {
    let mut lines = vec![format_receipt_line(&graph.receipt)];

    if graph.items.is_empty() {
        lines.push("No items yet.".to_string());
        return lines;
    }

    for item in &graph.items {
        lines.push(format!(
            "[{}] {} x{} @ {} = {}",
            item.id,
            item.name,
            item.quantity,
            format_money(item.price),
            format_money(item.total_price())
        ));

        let mut any_unit = false;
        for unit in graph.units_for_item(item.id) {
            any_unit = true;
            let friend_ids = graph.friends_on_unit(unit.id);
            lines.push(format!(
                "    unit {} ({}, {}): {}",
                unit.id,
                unit.unit_label,
                format_money(unit.price),
                friend_names(graph, &friend_ids)
            ));
        }
        if !any_unit {
            lines.push("    unassigned".to_string());
        }
    }

    lines
}

/// Formats the stated-versus-computed comparison of a receipt.
#[must_use]
pub fn format_reconciliation(reconciliation: &ReceiptReconciliation, tolerance: f64) -> String {
    if reconciliation.is_consistent(tolerance) {
        format!(
            "Receipt total {} matches items, tax and tips.",
            format_money(reconciliation.stated_total)
        )
    } else {
        format!(
            "Receipt total {} differs from items {} + tax {} + tips {} = {} by {}.",
            format_money(reconciliation.stated_total),
            format_money(reconciliation.items_subtotal),
            format_money(reconciliation.tax_amount),
            format_money(reconciliation.tips_amount),
            format_money(reconciliation.expected_total),
            format_money(reconciliation.difference())
        )
    }
}

/// Describes the units produced by an assign or split.
#[must_use]
pub fn format_assigned_units(graph: &ReceiptGraph, units: &[AssignedUnit]) -> Vec<String> {
    units
        .iter()
        .map(|assigned| {
            format!(
                "{} ({}): {} each for {}",
                assigned.unit.unit_label,
                format_money(assigned.unit.price),
                format_money(assigned.per_friend_share()),
                friend_names(graph, &assigned.friend_ids)
            )
        })
        .collect()
}

/// Describes the effect of removing a friend from a unit.
#[must_use]
pub fn format_unassign_outcome(graph: &ReceiptGraph, outcome: &UnassignOutcome) -> String {
    let name = friend_name(graph, outcome.friend_id);
    if outcome.unit_removed {
        return format!(
            "Removed {name} from unit {}. Nobody shares it any more, so it was deleted.",
            outcome.unit_id
        );
    }

    let price = graph.unit(outcome.unit_id).map_or(0.0, |u| u.price);
    format!(
        "Removed {name} from unit {}. Now {} each for {}.",
        outcome.unit_id,
        format_money(share_of(price, outcome.remaining_friend_ids.len())),
        friend_names(graph, &outcome.remaining_friend_ids)
    )
}

/// Formats what one friend owes.
///
/// # Returns
/// Formatted string like `Alice: $13.20 (items $11.00, tax $0.88, tip $1.32)`.
/// A non-zero rounding adjustment is listed as a fourth part.
#[must_use]
pub fn format_owed_line(owed: &OwedBreakdown) -> String {
    let name = if owed.friend_name.is_empty() {
        UNKNOWN_FRIEND
    } else {
        owed.friend_name.as_str()
    };
    let rounding = if owed.adjustment.abs() < 0.005 {
        String::new()
    } else {
        format!(", rounding {}", format_money(owed.adjustment))
    };
    format!(
        "{name}: {} (items {}, tax {}, tip {}{rounding})",
        format_money(owed.total),
        format_money(owed.subtotal),
        format_money(owed.tax),
        format_money(owed.tip)
    )
}

/// Formats one aggregation warning.
#[must_use]
pub fn format_warning(graph: &ReceiptGraph, warning: &AggregationWarning) -> String {
    match warning {
        AggregationWarning::UnassignedUnit {
            unit_id,
            item_id,
            price,
        } => format!(
            "Unit {unit_id} of {} ({}) has nobody assigned.",
            item_name(graph, *item_id),
            format_money(*price)
        ),
        AggregationWarning::UnassignedItemCost { item_id, amount } => format!(
            "{} of {} is not assigned to anyone.",
            format_money(*amount),
            item_name(graph, *item_id)
        ),
        AggregationWarning::Incomplete { unassigned_cost } => format!(
            "Totals are incomplete: {} is still unassigned.",
            format_money(*unassigned_cost)
        ),
        AggregationWarning::RoundingAdjusted { friend_id, amount } => format!(
            "Rounding difference of {} added to {}.",
            format_money(*amount),
            friend_name(graph, *friend_id)
        ),
        AggregationWarning::RoundingLeftover { amount } => {
            format!("Rounding difference of {} left over.", format_money(*amount))
        }
        AggregationWarning::ReconciliationMismatch { expected, computed } => format!(
            "Friend totals add up to {} but the receipt says {}.",
            format_money(*computed),
            format_money(*expected)
        ),
    }
}

/// Full totals report: one line per friend, then the summary and warnings.
#[must_use]
pub fn format_totals_report(graph: &ReceiptGraph, totals: &FriendTotals) -> Vec<String> {
    let mut lines: Vec<String> = Vec::with_capacity(totals.owed.len() + 3);

    if totals.owed.is_empty() {
        lines.push("Nobody has been assigned anything yet.".to_string());
    } else {
        lines.extend(totals.owed.values().map(format_owed_line));
    }

    lines.push(format!(
        "Assigned {} + tax {} + tips {} = {} (receipt total {})",
        format_money(totals.assigned_subtotal),
        format_money(totals.tax_amount),
        format_money(totals.tips_amount),
        format_money(totals.computed_total),
        format_money(totals.expected_total)
    ));

    lines.extend(totals.warnings.iter().map(|w| format_warning(graph, w)));
    lines
}

fn friend_name(graph: &ReceiptGraph, friend_id: i64) -> &str {
    graph
        .friend(friend_id)
        .map_or(UNKNOWN_FRIEND, |friend| friend.name.as_str())
}

fn friend_names(graph: &ReceiptGraph, friend_ids: &[i64]) -> String {
    if friend_ids.is_empty() {
        return "nobody".to_string();
    }
    friend_ids
        .iter()
        .map(|id| friend_name(graph, *id))
        .collect::<Vec<_>>()
        .join(", ")
}

fn item_name(graph: &ReceiptGraph, item_id: i64) -> String {
    graph
        .item(item_id)
        .map_or_else(|| format!("item {item_id}"), |item| item.name.clone())
}
