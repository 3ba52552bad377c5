//! Card model for deckup.

use serde::Serialize;

use super::deck::DeckId;

/// A normalized flashcard, before it is attached to a deck.
///
/// `card_id` is unique within a deck; uploading the same id again
/// overwrites the stored front, back and tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub card_id: String,
    pub front: String,
    pub back: String,
    /// `None` when the row carried no tags.
    pub tags: Option<Vec<String>>,
}

/// A `raw_cards` row as sent to the store.
#[derive(Debug, Clone, Serialize)]
pub struct CardRow<'a> {
    pub deck_id: &'a DeckId,
    pub card_id: &'a str,
    pub front: &'a str,
    pub back: &'a str,
    pub tags: Option<&'a [String]>,
}

impl<'a> CardRow<'a> {
    #[must_use]
    pub fn new(deck_id: &'a DeckId, card: &'a Card) -> Self {
        Self {
            deck_id,
            card_id: &card.card_id,
            front: &card.front,
            back: &card.back,
            tags: card.tags.as_deref(),
        }
    }
}
