//! FILENAME: core/dataset/src/lib.rs
//! PURPOSE: Main library entry point for the tabular data model.
//! CONTEXT: Rows of named fields whose values are either text or numbers.
//! Ingestion produces these types; the aggregation engine consumes them.

pub mod row;
pub mod value;

// Re-export commonly used types at the crate root
pub use row::{Dataset, Row};
pub use value::{number_text, FieldValue};
