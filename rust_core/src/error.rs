use thiserror::Error;

use crate::types::League;

/// Errors raised while loading team data or building a variant index.
///
/// A failed lookup is not an error: see [`crate::Resolution::Unresolved`].
#[derive(Error, Debug)]
pub enum CanonError {
    /// Source missing, unreadable or structurally invalid.
    #[error("Failed to load team data from {source_name}: {reason}")]
    DataLoad { source_name: String, reason: String },

    #[error("Duplicate canonical key {key} in {league}")]
    DuplicateKey { league: League, key: String },

    #[error("Variant '{variant}' claimed by both {first} and {second} in {league}")]
    DuplicateVariant {
        league: League,
        variant: String,
        first: String,
        second: String,
    },

    #[error("Unknown league: {0}")]
    UnknownLeague(String),

    #[error("Invalid configuration {key}={value}: {reason}")]
    Config {
        key: String,
        value: String,
        reason: String,
    },
}

impl CanonError {
    pub(crate) fn data_load(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CanonError::DataLoad {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}
