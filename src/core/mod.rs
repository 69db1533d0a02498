//! Core business logic - framework-agnostic receipt splitting.
//!
//! The pure parts ([`split`], [`totals`], [`report`], [`money`]) work on a
//! [`graph::ReceiptGraph`] snapshot. The rest load and store data through SeaORM.

/// Applying assignment plans to the database
pub mod assignment;
/// Friend and participant management
pub mod friend;
/// Receipt snapshot used by the engine and aggregator
pub mod graph;
/// Item management
pub mod item;
/// Currency helpers and tax types
pub mod money;
/// Receipt management and reconciliation
pub mod receipt;
/// Display formatting for receipts and totals
pub mod report;
/// Assignment engine
pub mod split;
/// Cost aggregator
pub mod totals;
/// App user management
pub mod user;
