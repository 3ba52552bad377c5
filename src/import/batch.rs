//! Deduplicating card batcher.
//!
//! Cards are accumulated by id until the batch is full. A card whose id is
//! already pending replaces the earlier one in place, so the last
//! occurrence in the file wins within a batch. Ids that reappear after a
//! flush go into a later batch and overwrite in the store instead.

use std::collections::HashMap;

use crate::model::Card;

/// Cards per upsert call.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Insertion-ordered accumulator keyed by card id.
#[derive(Debug)]
pub struct Batcher {
    threshold: usize,
    index: HashMap<String, usize>,
    pending: Vec<Card>,
}

impl Batcher {
    /// Create a batcher that flushes at `threshold` distinct cards.
    #[must_use]
    pub fn new(threshold: usize) -> Self {
        let threshold = threshold.max(1);
        Self {
            threshold,
            index: HashMap::with_capacity(threshold),
            pending: Vec::with_capacity(threshold),
        }
    }

    /// Add a card, returning a full batch once the threshold is reached.
    pub fn push(&mut self, card: Card) -> Option<Vec<Card>> {
        if let Some(&slot) = self.index.get(&card.card_id) {
            self.pending[slot] = card;
        } else {
            self.index.insert(card.card_id.clone(), self.pending.len());
            self.pending.push(card);
        }

        if self.pending.len() >= self.threshold {
            Some(self.take())
        } else {
            None
        }
    }

    /// Take whatever is still pending at end of input.
    pub fn finish(&mut self) -> Option<Vec<Card>> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.take())
        }
    }

    /// Number of distinct cards waiting to be flushed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn take(&mut self) -> Vec<Card> {
        self.index.clear();
        std::mem::replace(&mut self.pending, Vec::with_capacity(self.threshold))
    }
}

impl Default for Batcher {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, front: &str) -> Card {
        Card {
            card_id: id.to_string(),
            front: front.to_string(),
            back: String::new(),
            tags: None,
        }
    }

    #[test]
    fn test_last_occurrence_wins() {
        let mut batcher = Batcher::new(10);
        assert!(batcher.push(card("a", "first")).is_none());
        assert!(batcher.push(card("b", "other")).is_none());
        assert!(batcher.push(card("a", "second")).is_none());
        assert_eq!(batcher.len(), 2);

        let batch = batcher.finish().unwrap();
        assert_eq!(batch, vec![card("a", "second"), card("b", "other")]);
        assert!(batcher.is_empty());
    }

    #[test]
    fn test_flush_at_threshold() {
        let mut batcher = Batcher::new(3);
        assert!(batcher.push(card("1", "")).is_none());
        assert!(batcher.push(card("2", "")).is_none());
        let batch = batcher.push(card("3", "")).unwrap();
        assert_eq!(batch.len(), 3);
        assert!(batcher.is_empty());

        assert!(batcher.push(card("4", "")).is_none());
        assert_eq!(batcher.finish().unwrap().len(), 1);
        assert!(batcher.finish().is_none());
    }

    #[test]
    fn test_duplicates_do_not_count_toward_threshold() {
        let mut batcher = Batcher::new(2);
        assert!(batcher.push(card("1", "x")).is_none());
        assert!(batcher.push(card("1", "y")).is_none());
        assert!(batcher.push(card("1", "z")).is_none());
        let batch = batcher.push(card("2", "")).unwrap();
        assert_eq!(batch, vec![card("1", "z"), card("2", "")]);
    }

    #[test]
    fn test_id_after_flush_starts_fresh() {
        let mut batcher = Batcher::new(1);
        assert_eq!(batcher.push(card("a", "old")).unwrap(), vec![card("a", "old")]);
        assert_eq!(batcher.push(card("a", "new")).unwrap(), vec![card("a", "new")]);
    }

    #[test]
    fn test_default_threshold() {
        let mut batcher = Batcher::default();
        for i in 0..DEFAULT_BATCH_SIZE - 1 {
            assert!(batcher.push(card(&i.to_string(), "")).is_none());
        }
        let batch = batcher.push(card("last", "")).unwrap();
        assert_eq!(batch.len(), DEFAULT_BATCH_SIZE);
    }
}
