//! CLI definitions using clap.

use clap::Parser;
use std::path::PathBuf;

pub mod commands;

/// Export file read when `--file` is not given.
pub const DEFAULT_FILE: &str = "cards.txt";

/// Deck name used when `--name` is not given.
pub const DEFAULT_DECK_NAME: &str = "AnKing Deck";

/// deckup - Upload an Anki deck export to a hosted Postgres store
///
/// Store credentials come from DECKUP_STORE_URL, DECKUP_STORE_KEY and
/// DECKUP_USER_ID, or from ~/.deckup/config.json.
#[derive(Parser, Debug)]
#[command(name = "deckup", author, version, about)]
pub struct Cli {
    /// Path to the exported .txt or .csv file
    #[arg(long, default_value = DEFAULT_FILE)]
    pub file: PathBuf,

    /// Name of the deck
    #[arg(long, default_value = DEFAULT_DECK_NAME)]
    pub name: String,
}
