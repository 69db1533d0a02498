//! Parsing of free-text command arguments.
//!
//! Slash commands cannot take nested lists, so friend lists and unit
//! breakdowns are typed as text:
//! - friend list: `Alice, Bob`
//! - split spec: `1: Alice, Bob; 2: Carol` (quantity, then the friends sharing it)

use crate::errors::{Error, Result};

/// One unit of a split spec, with friends still given by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSpec {
    /// Quantity of the item covered by the unit
    pub quantity: i32,
    /// Names of the friends sharing the unit
    pub friend_names: Vec<String>,
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits a comma separated list of friend names.
///
/// Blank entries are skipped; a list with no names at all is an error.
pub fn parse_friend_list(input: &str) -> Result<Vec<String>> {
    let names: Vec<String> = input
        .split(',')
        .map(collapse_whitespace)
        .filter(|name| !name.is_empty())
        .collect();

    if names.is_empty() {
        return Err(Error::validation("Name at least one friend"));
    }
    Ok(names)
}

/// Parses a split spec like `1: Alice, Bob; 2: Carol`.
pub fn parse_split_spec(input: &str) -> Result<Vec<UnitSpec>> {
    let mut units = Vec::new();

    for (index, part) in input.split(';').enumerate() {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (quantity, names) = part.split_once(':').ok_or_else(|| {
            Error::validation(format!(
                "Unit {} should look like `quantity: friend, friend`",
                index + 1
            ))
        })?;

        let quantity: i32 = quantity.trim().parse().map_err(|_| {
            Error::validation(format!(
                "Unit {} has an invalid quantity '{}'",
                index + 1,
                quantity.trim()
            ))
        })?;
        if quantity < 1 {
            return Err(Error::validation(format!(
                "Unit {} quantity must be at least 1",
                index + 1
            )));
        }

        units.push(UnitSpec {
            quantity,
            friend_names: parse_friend_list(names)?,
        });
    }

    if units.is_empty() {
        return Err(Error::validation("Describe at least one unit"));
    }
    Ok(units)
}
