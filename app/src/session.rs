//! FILENAME: app/src/session.rs
// PURPOSE: The interactive selection state: loaded data, chosen axes, chart type.
// CONTEXT: Every read of the aggregated output runs a fresh, independent pass
//          over the loaded rows. Nothing is cached between selection changes.

use std::path::Path;

use aggregation_engine::{aggregate_selection, AggregateTable, AxisSelection};
use chart_view::{build_chart, render_bars, render_table, ChartKind};
use dataset::Dataset;
use ingest::{read_csv_path, CsvOptions};

use crate::config::OutputFormat;
use crate::error::AppError;
use crate::{log_debug, log_error, log_info};

#[derive(Debug, Clone, Default)]
pub struct ChartSession {
    dataset: Dataset,
    selection: AxisSelection,
    chart_kind: ChartKind,
}

impl ChartSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a CSV file, replacing any previously loaded data. The axis
    /// selection is kept as-is.
    pub fn load_csv(&mut self, path: &Path, options: &CsvOptions) -> Result<(), AppError> {
        let dataset = read_csv_path(path, options).map_err(|e| {
            log_error!("DATA", "failed to load {:?}: {}", path, e);
            e
        })?;
        log_info!(
            "DATA",
            "loaded {:?}: {} rows, {} fields",
            path,
            dataset.row_count(),
            dataset.headers().len()
        );
        self.dataset = dataset;
        Ok(())
    }

    pub fn load_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Field names offered for selection.
    pub fn headers(&self) -> &[String] {
        self.dataset.headers()
    }

    pub fn selection(&self) -> &AxisSelection {
        &self.selection
    }

    pub fn set_group_fields(&mut self, fields: Vec<String>) {
        log_debug!("SELECT", "x-axis={:?}", fields);
        self.selection.group_fields = fields;
    }

    pub fn set_measure_fields(&mut self, fields: Vec<String>) {
        log_debug!("SELECT", "y-axis={:?}", fields);
        self.selection.measure_fields = fields;
    }

    pub fn chart_kind(&self) -> ChartKind {
        self.chart_kind
    }

    pub fn set_chart_kind(&mut self, kind: ChartKind) {
        self.chart_kind = kind;
    }

    /// Selected fields the loaded header does not contain.
    pub fn missing_fields(&self) -> Vec<String> {
        self.selection.missing_fields(&self.dataset)
    }

    /// Runs an aggregation pass for the current data and selection.
    pub fn aggregated(&self) -> AggregateTable {
        aggregate_selection(&self.dataset, &self.selection)
    }

    /// Renders the current chart. `None` means there is nothing to show yet.
    pub fn render(&self, format: OutputFormat, bar_width: usize) -> Result<Option<String>, AppError> {
        let table = self.aggregated();
        if table.is_empty() {
            return Ok(None);
        }

        let output = match (format, self.chart_kind) {
            (OutputFormat::Text, ChartKind::Table) => render_table(&self.selection, &table),
            (OutputFormat::Text, kind) => {
                render_bars(&build_chart(kind, &self.selection, &table), bar_width)
            }
            (OutputFormat::Json, ChartKind::Table) => {
                let mut json = serde_json::to_string_pretty(&table)?;
                json.push('\n');
                json
            }
            (OutputFormat::Json, kind) => {
                let mut json = serde_json::to_string_pretty(&build_chart(kind, &self.selection, &table))?;
                json.push('\n');
                json
            }
        };
        Ok(Some(output))
    }
}
