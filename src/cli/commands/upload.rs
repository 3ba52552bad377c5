//! Upload command implementation.
//!
//! Resolves store settings, then drives the import on a tokio runtime.
//! Calls are awaited one at a time; the runtime only hosts the HTTP client.

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::import::{DeckImporter, ImportEvent, ImportSummary};
use crate::store::RestStore;
use colored::Colorize;
use std::path::Path;
use tracing::debug;

/// Execute the upload of `file` as a deck called `name`.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or the import fails.
/// Store failures after the deck exists surface as [`Error::Incomplete`].
pub fn execute(file: &Path, name: &str) -> Result<()> {
    let config = StoreConfig::load()?;
    debug!(?config, "Resolved store config");

    let store = RestStore::new(&config);
    println!("Reading file: {}", file.display());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create tokio runtime: {e}")))?;

    let importer = DeckImporter::new(&store, &config.user_id);
    let summary = rt.block_on(importer.import(file, name, print_event))?;

    if summary.skipped_rows > 0 {
        println!(
            "{}",
            format!("Skipped {} rows with fewer than 2 columns", summary.skipped_rows).dimmed()
        );
    }
    println!("{}", import_details(&summary).dimmed());
    println!(
        "{} Total cards: {}",
        "Successfully finished!".green().bold(),
        summary.card_count
    );
    Ok(())
}

fn print_event(event: ImportEvent<'_>) {
    match event {
        ImportEvent::DeckCreated { deck_id, name } => {
            println!("Created deck: {} (ID: {deck_id})", name.bold());
        }
        ImportEvent::BatchUploaded { total, .. } => {
            println!("Uploaded {total} cards...");
        }
    }
}

/// Layout, version tag and batch count of a finished import.
fn import_details(summary: &ImportSummary) -> String {
    format!(
        "Layout: {}, version {}, {} batches",
        summary.layout, summary.version_hash, summary.batches
    )
}
