//! Error types for deckup.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=store, 3=incomplete, 4=input, etc.)
//! - Context-aware recovery hints

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for deckup operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code, so shell scripts can tell a bad config from a dead store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Store (exit 2)
    StoreError,
    HttpError,
    DeckNotCreated,

    // Partial upload (exit 3)
    IncompleteUpload,

    // Input (exit 4)
    FileNotFound,
    IoError,
    CsvError,

    // Config (exit 5)
    ConfigError,

    // Serialization (exit 6)
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::StoreError => "STORE_ERROR",
            Self::HttpError => "HTTP_ERROR",
            Self::DeckNotCreated => "DECK_NOT_CREATED",
            Self::IncompleteUpload => "INCOMPLETE_UPLOAD",
            Self::FileNotFound => "FILE_NOT_FOUND",
            Self::IoError => "IO_ERROR",
            Self::CsvError => "CSV_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-6).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::StoreError | Self::HttpError | Self::DeckNotCreated => 2,
            Self::IncompleteUpload => 3,
            Self::FileNotFound | Self::IoError | Self::CsvError => 4,
            Self::ConfigError => 5,
            Self::JsonError => 6,
        }
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur while importing a deck.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store rejected request on '{table}' (HTTP {status}): {message}")]
    Store {
        table: String,
        status: u16,
        message: String,
    },

    #[error("Error creating deck record for '{name}': store returned no row")]
    DeckNotCreated { name: String },

    /// A failure after the deck row exists. Batches already sent stay in
    /// the store and the deck keeps `processing_status = processing`.
    #[error("Upload incomplete for deck {deck_id} after {uploaded} cards: {source}")]
    Incomplete {
        deck_id: String,
        uploaded: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::FileNotFound { .. } => ErrorCode::FileNotFound,
            Self::Io(_) => ErrorCode::IoError,
            Self::Csv(_) => ErrorCode::CsvError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Http(_) => ErrorCode::HttpError,
            Self::Store { .. } => ErrorCode::StoreError,
            Self::DeckNotCreated { .. } => ErrorCode::DeckNotCreated,
            Self::Incomplete { .. } => ErrorCode::IncompleteUpload,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::FileNotFound { path } => Some(format!(
                "Export the deck from Anki as plain text and pass it with `--file`. \
                 Looked for: {}",
                path.display()
            )),

            Self::Config(_) => Some(
                "Set DECKUP_STORE_URL, DECKUP_STORE_KEY and DECKUP_USER_ID, \
                 or write them to ~/.deckup/config.json \
                 (keys: store_url, store_key, user_id)"
                    .to_string(),
            ),

            Self::Store { status: 401 | 403, .. } => Some(
                "The store refused the credential. Check DECKUP_STORE_KEY; \
                 row-level security may require a service role key."
                    .to_string(),
            ),

            Self::DeckNotCreated { .. } => Some(
                "No cards were uploaded. Check that the `decks` table exists and \
                 that inserts return the created row."
                    .to_string(),
            ),

            Self::Incomplete { deck_id, uploaded, .. } => Some(format!(
                "Deck {deck_id} is still marked 'processing' with {uploaded} cards stored. \
                 Re-running creates a new deck; card upserts are keyed by \
                 (deck_id, card_id) so nothing is duplicated within a deck."
            )),

            Self::Io(_)
            | Self::Csv(_)
            | Self::Json(_)
            | Self::Http(_)
            | Self::Store { .. }
            | Self::Other(_) => None,
        }
    }
}
