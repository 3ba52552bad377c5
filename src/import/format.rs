//! Export layout detection and row reading.
//!
//! Anki text exports come in two fixed shapes. The layout is chosen once,
//! from the raw first line of the file, and never re-checked: a file whose
//! first line has a tab is read as tab-delimited "rich" notes, anything
//! else as comma-delimited "basic" cards.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

/// Lines starting with this marker are export headers, not data.
pub const COMMENT_PREFIX: char = '#';

/// Column layout of an export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Tab-delimited notes export: guid, note type, deck, front, back, ... tags.
    TabRich,
    /// Comma-delimited front, back, tags.
    CommaBasic,
}

impl Layout {
    /// Pick the layout from the first line of the file.
    #[must_use]
    pub fn sniff(first_line: &str) -> Self {
        if first_line.contains('\t') {
            Self::TabRich
        } else {
            Self::CommaBasic
        }
    }

    /// Field delimiter for this layout.
    #[must_use]
    pub const fn delimiter(self) -> u8 {
        match self {
            Self::TabRich => b'\t',
            Self::CommaBasic => b',',
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TabRich => "tab-rich",
            Self::CommaBasic => "comma-basic",
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read an export file as text.
///
/// Bytes that are not valid UTF-8 are dropped rather than failing the run.
/// `\r\n` and lone `\r` line endings are rewritten to `\n`.
///
/// # Errors
///
/// Returns [`Error::FileNotFound`] if the path does not exist, or an I/O
/// error if it cannot be read.
pub fn read_export(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(e)
        }
    })?;

    let text: String = bytes.utf8_chunks().map(|chunk| chunk.valid()).collect();
    Ok(normalize_line_endings(&text))
}

/// Rewrite `\r\n` and lone `\r` to `\n`.
#[must_use]
pub fn normalize_line_endings(text: &str) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.to_string()
    }
}

/// The first line of `text`, including its line terminator.
#[must_use]
pub fn first_line(text: &str) -> &str {
    text.split_inclusive('\n').next().unwrap_or("")
}

/// Drop every line that starts with [`COMMENT_PREFIX`].
///
/// Line terminators of kept lines are preserved, so quoted fields that span
/// lines still parse.
#[must_use]
pub fn strip_comment_lines(text: &str) -> String {
    text.split_inclusive('\n')
        .filter(|line| !line.starts_with(COMMENT_PREFIX))
        .collect()
}

/// Parse delimited rows from comment-free export text.
///
/// Rows may have any number of fields; column-count checks are left to the
/// normalizer. Blank lines yield no record.
pub fn parse_rows(
    data: &str,
    layout: Layout,
) -> impl Iterator<Item = Result<csv::StringRecord>> + '_ {
    csv::ReaderBuilder::new()
        .delimiter(layout.delimiter())
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_bytes())
        .into_records()
        .map(|record| record.map_err(Error::from))
}
