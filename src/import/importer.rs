//! End-to-end deck import.
//!
//! The flow is strictly sequential:
//! 1. hash the export file and insert a `processing` deck row
//! 2. read the file once, normalizing and batching rows as they come
//! 3. upsert each full batch into `raw_cards`, then the remainder
//! 4. mark the deck `completed` with its card count
//!
//! Nothing is retried or rolled back. A failure after step 1 leaves the
//! deck in `processing` with whatever batches were already stored, and is
//! reported as [`Error::Incomplete`].

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use super::batch::{Batcher, DEFAULT_BATCH_SIZE};
use super::format::{first_line, parse_rows, read_export, strip_comment_lines, Layout};
use super::hash::file_version_hash;
use super::normalize::normalize_row;
use crate::error::{Error, Result};
use crate::model::{Card, CardRow, Deck, DeckCompletion, DeckId, NewDeck};
use crate::store::{Filter, Store};

pub const DECKS_TABLE: &str = "decks";
pub const RAW_CARDS_TABLE: &str = "raw_cards";

/// Conflict key for card upserts: one row per card id within a deck.
pub const CARD_CONFLICT_KEY: &str = "deck_id,card_id";

/// Progress notifications emitted during an import.
#[derive(Debug, Clone, Copy)]
pub enum ImportEvent<'a> {
    /// The deck row exists; cards will follow.
    DeckCreated { deck_id: &'a DeckId, name: &'a str },
    /// One batch was upserted.
    BatchUploaded {
        /// Cards in this batch.
        size: usize,
        /// Distinct cards stored so far.
        total: usize,
    },
}

/// Outcome of a completed import.
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub deck_id: DeckId,
    pub version_hash: String,
    pub layout: Layout,
    /// Distinct card ids upserted; equals the deck's `card_count`.
    pub card_count: usize,
    /// Upsert calls made.
    pub batches: usize,
    /// Rows dropped for having too few columns.
    pub skipped_rows: usize,
}

/// Running totals for one import.
#[derive(Debug, Default)]
struct UploadState {
    uploaded: HashSet<String>,
    batches: usize,
    skipped_rows: usize,
}

/// Imports one export file as a deck.
pub struct DeckImporter<'a, S> {
    store: &'a S,
    user_id: &'a str,
    batch_size: usize,
}

impl<'a, S: Store> DeckImporter<'a, S> {
    /// Create an importer that records decks as owned by `user_id`.
    #[must_use]
    pub fn new(store: &'a S, user_id: &'a str) -> Self {
        Self {
            store,
            user_id,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Override the number of cards per upsert.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Import `path` as a deck named `deck_name`.
    ///
    /// `on_event` is called after the deck is created and after every batch.
    ///
    /// # Errors
    ///
    /// - [`Error::FileNotFound`] or I/O errors before any store call
    /// - [`Error::DeckNotCreated`] or a store error if the deck insert fails;
    ///   no cards are uploaded in that case
    /// - [`Error::Incomplete`] for any failure once the deck exists
    pub async fn import<F>(
        &self,
        path: &Path,
        deck_name: &str,
        mut on_event: F,
    ) -> Result<ImportSummary>
    where
        F: FnMut(ImportEvent<'_>),
    {
        let version_hash = file_version_hash(path)?;
        let deck = self.create_deck(deck_name, &version_hash).await?;
        info!(deck_id = %deck.id, name = deck_name, version_hash = %version_hash, "Created deck");
        on_event(ImportEvent::DeckCreated {
            deck_id: &deck.id,
            name: deck_name,
        });

        let mut state = UploadState::default();
        let incomplete = |state: &UploadState, source: Error| Error::Incomplete {
            deck_id: deck.id.to_string(),
            uploaded: state.uploaded.len(),
            source: Box::new(source),
        };

        let layout = match self.upload_cards(path, &deck.id, &mut state, &mut on_event).await {
            Ok(layout) => layout,
            Err(e) => return Err(incomplete(&state, e)),
        };

        let card_count = state.uploaded.len();
        if let Err(e) = self
            .store
            .update(
                DECKS_TABLE,
                &DeckCompletion::new(card_count),
                &Filter::eq("id", &deck.id),
            )
            .await
        {
            return Err(incomplete(&state, e));
        }

        info!(deck_id = %deck.id, card_count, batches = state.batches, "Deck completed");
        Ok(ImportSummary {
            deck_id: deck.id,
            version_hash,
            layout,
            card_count,
            batches: state.batches,
            skipped_rows: state.skipped_rows,
        })
    }

    async fn create_deck(&self, name: &str, version_hash: &str) -> Result<Deck> {
        let row = self
            .store
            .insert(DECKS_TABLE, &NewDeck::new(self.user_id, name, version_hash))
            .await?
            .ok_or_else(|| Error::DeckNotCreated {
                name: name.to_string(),
            })?;

        Ok(serde_json::from_value(row)?)
    }

    /// Parse the export and upsert every card. Returns the detected layout.
    async fn upload_cards<F>(
        &self,
        path: &Path,
        deck_id: &DeckId,
        state: &mut UploadState,
        on_event: &mut F,
    ) -> Result<Layout>
    where
        F: FnMut(ImportEvent<'_>),
    {
        let text = read_export(path)?;
        let layout = Layout::sniff(first_line(&text));
        debug!(%layout, "Detected export layout");

        let data = strip_comment_lines(&text);
        let mut batcher = Batcher::new(self.batch_size);

        for record in parse_rows(&data, layout) {
            let record = record?;
            let row: Vec<&str> = record.iter().collect();
            let Some(card) = normalize_row(&row, layout) else {
                state.skipped_rows += 1;
                continue;
            };

            if let Some(batch) = batcher.push(card) {
                self.flush(deck_id, batch, state, on_event).await?;
            }
        }

        if let Some(batch) = batcher.finish() {
            self.flush(deck_id, batch, state, on_event).await?;
        }

        if state.skipped_rows > 0 {
            debug!(skipped = state.skipped_rows, "Skipped short rows");
        }
        Ok(layout)
    }

    async fn flush<F>(
        &self,
        deck_id: &DeckId,
        batch: Vec<Card>,
        state: &mut UploadState,
        on_event: &mut F,
    ) -> Result<()>
    where
        F: FnMut(ImportEvent<'_>),
    {
        let size = batch.len();
        {
            let rows: Vec<CardRow<'_>> =
                batch.iter().map(|card| CardRow::new(deck_id, card)).collect();
            self.store.upsert(RAW_CARDS_TABLE, &rows, CARD_CONFLICT_KEY).await?;
        }

        state.batches += 1;
        state
            .uploaded
            .extend(batch.into_iter().map(|card| card.card_id));

        let total = state.uploaded.len();
        debug!(batch = state.batches, size, total, "Upserted cards");
        on_event(ImportEvent::BatchUploaded { size, total });
        Ok(())
    }
}
