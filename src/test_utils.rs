//! Shared test utilities for `OurCheckSplitter`.
//!
//! Database helpers set up an in-memory `SQLite` database and create entities
//! with sensible defaults. Fixture helpers build plain models for the pure
//! engine and aggregator tests without touching a database.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        friend, item,
        graph::ReceiptGraph,
        receipt::{self, ReceiptCharges},
        user,
    },
    entities,
    errors::Result,
};
use chrono::{TimeZone, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test user whose display name equals its external id.
pub async fn create_test_user(
    db: &DatabaseConnection,
    external_id: &str,
) -> Result<entities::app_user::Model> {
    user::get_or_create_user(db, external_id, external_id).await
}

/// Creates a test receipt with no tax or tips and a zero total.
pub async fn create_test_receipt(
    db: &DatabaseConnection,
    owner_id: i64,
    name: &str,
) -> Result<entities::receipt::Model> {
    receipt::create_receipt(db, owner_id, name.to_string(), ReceiptCharges::with_total(0.0)).await
}

/// Creates a test item on a receipt.
pub async fn create_test_item(
    db: &DatabaseConnection,
    owner_id: i64,
    receipt_id: i64,
    name: &str,
    quantity: i32,
    price: f64,
) -> Result<entities::item::Model> {
    item::add_item(db, owner_id, receipt_id, name.to_string(), quantity, price).await
}

/// Creates a test friend.
pub async fn create_test_friend(
    db: &DatabaseConnection,
    owner_id: i64,
    name: &str,
) -> Result<entities::friend::Model> {
    friend::create_friend(db, owner_id, name.to_string()).await
}

/// Sets up a complete test environment with a user and an empty receipt.
/// Returns (db, user, receipt) for common test scenarios.
pub async fn setup_with_receipt() -> Result<(
    DatabaseConnection,
    entities::app_user::Model,
    entities::receipt::Model,
)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "test-user").await?;
    let receipt = create_test_receipt(&db, user.id, "Test Receipt").await?;
    Ok((db, user, receipt))
}

/// A receipt model with no charges and a zero total.
pub fn receipt_fixture(id: i64, owner_id: i64) -> entities::receipt::Model {
    entities::receipt::Model {
        id,
        owner_id,
        name: format!("Receipt {id}"),
        tax: 0.0,
        tax_type: "amount".to_string(),
        tips: 0.0,
        total: 0.0,
        tips_included_in_total: false,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
    }
}

/// An item model.
pub fn item_fixture(
    id: i64,
    receipt_id: i64,
    name: &str,
    quantity: i32,
    price: f64,
) -> entities::item::Model {
    entities::item::Model {
        id,
        receipt_id,
        name: name.to_string(),
        quantity,
        price,
    }
}

/// A unit on receipt 1, labelled `unit{id}`.
pub fn unit_fixture(
    id: i64,
    item_id: i64,
    quantity: i32,
    price: f64,
) -> entities::item_assignment::Model {
    entities::item_assignment::Model {
        id,
        item_id,
        receipt_id: 1,
        quantity,
        price,
        unit_label: format!("unit{id}"),
    }
}

/// Links a friend to a unit.
pub const fn assignment_fixture(
    friend_id: i64,
    item_assignment_id: i64,
) -> entities::friend_assignment::Model {
    entities::friend_assignment::Model {
        friend_id,
        item_assignment_id,
    }
}

/// Links a friend to receipt 1 as a participant.
pub const fn participant_fixture(friend_id: i64) -> entities::receipt_friend::Model {
    entities::receipt_friend::Model {
        receipt_id: 1,
        friend_id,
    }
}

/// Builds a graph for receipt 1 owned by user 1.
///
/// Items `(name, quantity, unit price)` get ids 1, 2, ... and friends get ids
/// 1, 2, ... in the order given. The receipt total equals the item totals, and
/// there are no units, assignments or participants yet.
pub fn graph_fixture(items: &[(&str, i32, f64)], friends: &[&str]) -> ReceiptGraph {
    let items: Vec<entities::item::Model> = (1_i64..)
        .zip(items)
        .map(|(id, (name, quantity, price))| item_fixture(id, 1, name, *quantity, *price))
        .collect();

    let mut receipt = receipt_fixture(1, 1);
    receipt.total = items.iter().map(entities::item::Model::total_price).sum();

    let friends = (1_i64..)
        .zip(friends)
        .map(|(id, name)| entities::friend::Model {
            id,
            owner_id: 1,
            name: (*name).to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
        })
        .collect();

    ReceiptGraph {
        receipt,
        items,
        units: Vec::new(),
        friend_assignments: Vec::new(),
        friends,
        participants: Vec::new(),
    }
}
