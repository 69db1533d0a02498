//! Unified error type for the receipt splitting core and the Discord layer.

use sea_orm::DbErr;
use thiserror::Error;

/// All errors that can surface from `OurCheckSplitter`.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input: empty friend lists, mismatched quantities, blank names.
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// A monetary value that is negative, NaN or infinite.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Receipt is missing or not owned by the requesting user.
    #[error("Receipt not found: {id}")]
    ReceiptNotFound {
        /// Receipt identifier as given by the caller
        id: String,
    },

    /// Item is missing or does not belong to the receipt.
    #[error("Item not found: {id}")]
    ItemNotFound {
        /// Item identifier as given by the caller
        id: String,
    },

    /// Friend is missing or not owned by the requesting user.
    #[error("Friend not found: {name}")]
    FriendNotFound {
        /// Friend name or identifier as given by the caller
        name: String,
    },

    /// Unit (item assignment) is missing or does not belong to the receipt.
    #[error("Unit not found: {id}")]
    UnitNotFound {
        /// Unit identifier as given by the caller
        id: String,
    },

    /// The loaded receipt graph contradicts itself.
    #[error("Consistency error: {message}")]
    Consistency {
        /// Description of the broken invariant
        message: String,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Details about the configuration problem
        message: String,
    },

    /// Database error from `SeaORM`.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Error while formatting a reply.
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error.
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Returns true for every "missing or not yours" kind of error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ReceiptNotFound { .. }
                | Self::ItemNotFound { .. }
                | Self::FriendNotFound { .. }
                | Self::UnitNotFound { .. }
        )
    }

    /// Shorthand for building a [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for building a [`Error::Consistency`].
    pub fn consistency(message: impl Into<String>) -> Self {
        Self::Consistency {
            message: message.into(),
        }
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found_groups_lookup_errors() {
        assert!(Error::ReceiptNotFound { id: "1".to_string() }.is_not_found());
        assert!(Error::ItemNotFound { id: "2".to_string() }.is_not_found());
        assert!(
            Error::FriendNotFound {
                name: "Alice".to_string()
            }
            .is_not_found()
        );
        assert!(Error::UnitNotFound { id: "3".to_string() }.is_not_found());
        assert!(!Error::validation("empty").is_not_found());
        assert!(!Error::consistency("broken").is_not_found());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::validation("friends cannot be empty").to_string(),
            "Validation error: friends cannot be empty"
        );
        assert_eq!(
            Error::ItemNotFound { id: "7".to_string() }.to_string(),
            "Item not found: 7"
        );
    }
}
