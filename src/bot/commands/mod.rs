//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Assign, split, attach, unassign and clear commands
pub mod assignment;

/// Friend and participant commands
pub mod friend;

/// General utility commands
pub mod general;

/// Item commands
pub mod item;

/// Receipt commands
pub mod receipt;

/// Totals command
pub mod totals;

use crate::{bot::BotData, errors::Error};

/// Every command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        receipt::receipt(),
        item::item(),
        friend::friend(),
        friend::participant(),
        assignment::assign(),
        assignment::split(),
        assignment::attach(),
        assignment::unassign(),
        assignment::clear(),
        totals::totals(),
        general::help(),
        general::ping(),
    ]
}
