//! FILENAME: core/chart-view/src/text.rs
//! Terminal renderings of aggregate output.

use aggregation_engine::{AggregateTable, AxisSelection, GROUP_KEY_SEPARATOR};
use comfy_table::presets::ASCII_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use dataset::number_text;

use crate::spec::ChartSpec;

/// Renders a bordered text table: the group label column followed by one
/// column per measure, values right-aligned. Returns an empty string for an
/// empty table.
pub fn render_table(selection: &AxisSelection, table: &AggregateTable) -> String {
    if table.is_empty() {
        return String::new();
    }

    let mut grid = Table::new();
    grid.load_preset(ASCII_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Disabled);

    grid.set_header(
        std::iter::once(selection.group_fields.join(GROUP_KEY_SEPARATOR))
            .chain(table.measure_fields().iter().cloned())
            .map(Cell::new),
    );

    for record in table.records() {
        let mut cells = vec![Cell::new(record.name())];
        cells.extend(
            record
                .values()
                .iter()
                .map(|v| Cell::new(number_text(*v)).set_alignment(CellAlignment::Right)),
        );
        grid.add_row(cells);
    }

    let mut out = grid.to_string();
    out.push('\n');
    out
}

/// Draws the first series as horizontal bars, `width` characters at `y_max`.
/// Negative values draw no bar. Returns an empty string for an empty chart.
pub fn render_bars(chart: &ChartSpec, width: usize) -> String {
    let Some(series) = chart.series.first() else {
        return String::new();
    };
    if chart.is_empty() {
        return String::new();
    }

    let label_width = chart
        .categories
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = format!("{} by {} ({})\n", series.name, chart.x_label, chart.kind);
    for (category, value) in chart.categories.iter().zip(&series.values) {
        let length = if chart.y_max > 0.0 && *value > 0.0 {
            ((value / chart.y_max) * width as f64).round() as usize
        } else {
            0
        };
        let pad = label_width - category.chars().count();
        out.push_str(category);
        out.push_str(&" ".repeat(pad));
        out.push_str(" | ");
        out.push_str(&"#".repeat(length));
        if length > 0 {
            out.push(' ');
        }
        out.push_str(&number_text(*value));
        out.push('\n');
    }
    out
}
