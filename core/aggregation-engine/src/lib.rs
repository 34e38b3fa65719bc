//! FILENAME: core/aggregation-engine/src/lib.rs
//! Aggregation engine for chart data.
//!
//! Turns raw rows into one record per distinct group key, each carrying one
//! accumulated number per measure field. Numeric values are summed, anything
//! else (text, or a missing field) counts as one.
//!
//! Layers:
//! - `selection`: Which fields group and which fields are measured (user intent)
//! - `accumulator`: Group-key construction and per-measure accumulation
//! - `record`: Aggregate records and their output forms
//! - `engine`: The single-pass driver that ties the layers together

pub mod selection;
pub mod accumulator;
pub mod record;
pub mod engine;

pub use selection::AxisSelection;
pub use accumulator::{group_key, MeasureAccumulator, GROUP_KEY_SEPARATOR};
pub use record::{AggregateRecord, AggregateTable, DataPoint, DISPLAY_NAME_KEY};
pub use engine::{aggregate, aggregate_selection};
