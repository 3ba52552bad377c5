//! Row normalization.
//!
//! Maps a raw delimited row onto a [`Card`]. Column positions are fixed per
//! layout and guessed, not read from a header: a rich export whose columns
//! are arranged differently will have its fields silently misassigned.

use std::sync::LazyLock;

use regex::Regex;

use super::format::Layout;
use super::hash::content_card_id;
use crate::model::Card;

/// Rows with fewer columns than this are skipped.
pub const MIN_COLUMNS: usize = 2;

/// Column positions in a tab-delimited notes export.
mod rich {
    pub const ID: usize = 0;
    pub const FRONT: usize = 3;
    pub const BACK: usize = 4;
    pub const TAGS: usize = 14;
}

/// Column positions in a comma-delimited basic export.
mod basic {
    pub const FRONT: usize = 0;
    pub const BACK: usize = 1;
    pub const TAGS: usize = 2;
}

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"));

/// Entities unescaped by [`clean_text`], applied in order.
const ENTITIES: [(&str, &str); 4] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
];

/// Reduce an HTML-ish field to plain text.
///
/// Tags are replaced by a space (not parsed), four common entities are
/// unescaped, whitespace runs collapse to one space and the ends are trimmed.
#[must_use]
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut cleaned = MARKUP_TAG.replace_all(text, " ").into_owned();
    for (entity, replacement) in ENTITIES {
        cleaned = cleaned.replace(entity, replacement);
    }

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize one row, or `None` if the row is too short to be a card.
#[must_use]
pub fn normalize_row(row: &[&str], layout: Layout) -> Option<Card> {
    if row.len() < MIN_COLUMNS {
        return None;
    }

    let card = match layout {
        Layout::TabRich => Card {
            card_id: row[rich::ID].to_string(),
            front: clean_text(row.get(rich::FRONT).copied().unwrap_or(row[0])),
            back: clean_text(row.get(rich::BACK).copied().unwrap_or(row[1])),
            tags: row
                .get(rich::TAGS)
                .and_then(|raw| split_tags(raw.trim_matches('"'))),
        },
        Layout::CommaBasic => {
            let front = clean_text(row[basic::FRONT]);
            let back = clean_text(row[basic::BACK]);
            Card {
                card_id: content_card_id(&front, &back),
                front,
                back,
                tags: row.get(basic::TAGS).copied().and_then(split_tags),
            }
        }
    };

    Some(card)
}

/// Whitespace-separated tags, or `None` when there are none.
fn split_tags(raw: &str) -> Option<Vec<String>> {
    let tags: Vec<String> = raw.split_whitespace().map(String::from).collect();
    if tags.is_empty() { None } else { Some(tags) }
}
