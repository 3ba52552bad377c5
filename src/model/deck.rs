//! Deck model for deckup.
//!
//! A deck is the parent row for one imported export file. It is inserted
//! once with status `processing` and patched once to `completed` with the
//! final card count.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// File type recorded on every deck row.
pub const DECK_FILE_TYPE: &str = "csv";

/// Deck processing status values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    #[default]
    Processing,
    Completed,
}

impl ProcessingStatus {
    /// Get the string representation used by the store.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
        }
    }
}

/// Store-assigned deck identifier.
///
/// Kept as the raw JSON value the store returned (uuid string or integer)
/// so it round-trips unchanged into card rows and filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(Value);

impl DeckId {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl From<&str> for DeckId {
    fn from(s: &str) -> Self {
        Self(Value::String(s.to_string()))
    }
}

impl From<i64> for DeckId {
    fn from(n: i64) -> Self {
        Self(Value::from(n))
    }
}

/// Insert payload for a new deck row.
#[derive(Debug, Clone, Serialize)]
pub struct NewDeck<'a> {
    pub user_id: &'a str,
    pub name: &'a str,
    pub file_type: &'a str,
    pub version_hash: &'a str,
    pub processing_status: ProcessingStatus,
}

impl<'a> NewDeck<'a> {
    /// Build the insert payload for a deck that is about to be processed.
    #[must_use]
    pub fn new(user_id: &'a str, name: &'a str, version_hash: &'a str) -> Self {
        Self {
            user_id,
            name,
            file_type: DECK_FILE_TYPE,
            version_hash,
            processing_status: ProcessingStatus::Processing,
        }
    }
}

/// A deck row as returned by the store after insert.
///
/// Only the generated `id` is read; other returned columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Deck {
    pub id: DeckId,
}

/// Patch applied to the deck once every batch is stored.
#[derive(Debug, Clone, Serialize)]
pub struct DeckCompletion {
    pub processing_status: ProcessingStatus,
    pub card_count: usize,
}

impl DeckCompletion {
    #[must_use]
    pub fn new(card_count: usize) -> Self {
        Self {
            processing_status: ProcessingStatus::Completed,
            card_count,
        }
    }
}
