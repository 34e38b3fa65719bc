//! FILENAME: core/ingest/src/lib.rs
//! Row Ingestion
//!
//! Reads delimited text into a `Dataset`: the first record names the
//! fields, every later record becomes a `Row` whose cells are typed as
//! numbers or text.

mod csv_reader;
mod error;

pub use csv_reader::{infer_value, parse_number, read_csv_path, read_csv_reader, read_csv_str};
pub use error::IngestError;

use serde::{Deserialize, Serialize};

// ============================================================================
// OPTIONS
// ============================================================================

/// Controls how delimited text is split and typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Field separator byte.
    pub delimiter: u8,
    /// Turn numeric-looking cells into numbers. When off, every cell is text
    /// and every measure aggregates as a count.
    pub dynamic_typing: bool,
    /// Drop records whose cells are all empty (e.g. `,,`). Blank lines are
    /// always skipped.
    pub skip_empty_lines: bool,
    /// Strip surrounding whitespace from header names.
    pub trim_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            dynamic_typing: true,
            skip_empty_lines: true,
            trim_headers: true,
        }
    }
}
