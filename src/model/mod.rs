//! Data models for deckup.
//!
//! This module contains the records exchanged with the store:
//! - Deck (parent row with processing status)
//! - Card (normalized flashcard, sent as a `raw_cards` row)

pub mod card;
pub mod deck;

pub use card::{Card, CardRow};
pub use deck::{Deck, DeckCompletion, DeckId, NewDeck, ProcessingStatus};
