//! Anki export import pipeline.
//!
//! - **Hashing**: file version tag and content-derived card ids
//! - **Format**: layout sniffing, comment filtering, delimited row reading
//! - **Normalize**: raw row → [`Card`](crate::model::Card), markup stripping
//! - **Batch**: last-write-wins dedup by card id, fixed-size flushes
//! - **Importer**: deck insert → card upserts → status update
//!
//! # Example
//!
//! ```ignore
//! use deckup::import::DeckImporter;
//! use deckup::store::RestStore;
//!
//! let store = RestStore::new(&config);
//! let importer = DeckImporter::new(&store, &config.user_id);
//! let summary = importer.import(path, "AnKing Deck", |_| {}).await?;
//! println!("{} cards", summary.card_count);
//! ```

mod batch;
mod format;
mod hash;
mod importer;
mod normalize;

pub use batch::{Batcher, DEFAULT_BATCH_SIZE};
pub use format::{
    first_line, normalize_line_endings, parse_rows, read_export, strip_comment_lines, Layout,
    COMMENT_PREFIX,
};
pub use hash::{content_card_id, file_version_hash, CARD_ID_LEN, VERSION_TAG_LEN};
pub use importer::{
    DeckImporter, ImportEvent, ImportSummary, CARD_CONFLICT_KEY, DECKS_TABLE, RAW_CARDS_TABLE,
};
pub use normalize::{clean_text, normalize_row, MIN_COLUMNS};
