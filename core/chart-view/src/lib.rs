//! FILENAME: core/chart-view/src/lib.rs
//! Presentation of aggregate tables.
//!
//! This crate never reorders or recomputes anything: it maps an
//! `AggregateTable` onto something a renderer can draw, keeping the
//! record order produced by the engine.
//!
//! Layers:
//! - `kind`: Which chart the user picked
//! - `spec`: Renderer-neutral chart description (categories, series, slices)
//! - `text`: Terminal renderings (bordered table, horizontal bars)

pub mod kind;
pub mod spec;
pub mod text;

pub use kind::{ChartKind, ParseChartKindError};
pub use spec::{build_chart, ChartSeries, ChartSpec, PieSlice, PIE_PALETTE, SERIES_PALETTE};
pub use text::{render_bars, render_table};
