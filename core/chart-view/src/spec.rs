//! FILENAME: core/chart-view/src/spec.rs
//! Chart Spec - Renderer-neutral description of a chart.
//!
//! Categories come straight from the aggregate records, in engine order.
//! Renderers place them on the category axis without re-sorting.

use aggregation_engine::{AggregateTable, AxisSelection, DataPoint, GROUP_KEY_SEPARATOR};
use serde::{Deserialize, Serialize};

use crate::kind::ChartKind;

/// Slice colors for pie charts, assigned by category position.
pub const PIE_PALETTE: [&str; 18] = [
    "#FF6384", "#FFCE56", "#36A2EB", "#9966FF", "#FF9F40", "#b4f689",
    "#c1d851", "#5fee9d", "#5ac9d1", "#43bac5", "#5254ce", "#8c4dcf",
    "#b14cba", "#b33d5b", "#96224f", "#5a1553", "#82308d", "#ddf336",
];

/// Series colors, assigned by measure position.
pub const SERIES_PALETTE: [&str; 3] = ["#8884d8", "#82ca9d", "#ffc658"];

/// One measure plotted across every category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub color: String,
    /// One value per category, aligned with `ChartSpec::categories`.
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slices: Vec<PieSlice>,
    /// `{name, value}` pairs, present only when a single measure is plotted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<DataPoint>,
    /// Upper bound of the value axis; the lower bound is always 0.
    pub y_max: f64,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Maps an aggregate table onto a chart of the given kind.
pub fn build_chart(kind: ChartKind, selection: &AxisSelection, table: &AggregateTable) -> ChartSpec {
    let categories: Vec<String> = table.records().iter().map(|r| r.name().to_string()).collect();

    let series: Vec<ChartSeries> = table
        .measure_fields()
        .iter()
        .enumerate()
        .map(|(i, name)| ChartSeries {
            name: name.clone(),
            color: SERIES_PALETTE[i % SERIES_PALETTE.len()].to_string(),
            values: table.column(i),
        })
        .collect();

    let slices = if kind == ChartKind::Pie {
        pie_slices(table)
    } else {
        Vec::new()
    };

    ChartSpec {
        kind,
        x_label: selection.group_fields.join(GROUP_KEY_SEPARATOR),
        y_label: selection.measure_fields.join(GROUP_KEY_SEPARATOR),
        categories,
        series,
        slices,
        points: table.single_measure_points().unwrap_or_default(),
        y_max: table.max_value().unwrap_or(0.0).max(0.0),
    }
}

/// Pie charts show the first measure only.
fn pie_slices(table: &AggregateTable) -> Vec<PieSlice> {
    if table.measure_fields().is_empty() {
        return Vec::new();
    }
    table
        .records()
        .iter()
        .enumerate()
        .map(|(i, record)| PieSlice {
            label: record.name().to_string(),
            value: record.value(0).unwrap_or(0.0),
            color: PIE_PALETTE[i % PIE_PALETTE.len()].to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aggregation_engine::aggregate;
    use dataset::Row;

    fn sales_table() -> (AxisSelection, AggregateTable) {
        let rows = vec![
            Row::new().with_text("region", "east").with_number("sales", 10.0).with_number("units", 2.0),
            Row::new().with_text("region", "west").with_number("sales", 7.0).with_number("units", 1.0),
            Row::new().with_text("region", "east").with_number("sales", 5.0).with_number("units", 4.0),
        ];
        let selection = AxisSelection::new(["region"], ["sales", "units"]);
        let table = aggregate(&rows, &selection.group_fields, &selection.measure_fields);
        (selection, table)
    }

    #[test]
    fn test_bar_chart_keeps_engine_order() {
        let (selection, table) = sales_table();
        let chart = build_chart(ChartKind::Bar, &selection, &table);

        assert_eq!(chart.categories, vec!["east", "west"]);
        assert_eq!(chart.x_label, "region");
        assert_eq!(chart.y_label, "sales, units");
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].values, vec![15.0, 7.0]);
        assert_eq!(chart.series[1].values, vec![6.0, 1.0]);
        assert_eq!(chart.series[1].color, SERIES_PALETTE[1]);
        assert_eq!(chart.y_max, 15.0);
        assert!(chart.slices.is_empty());
    }

    #[test]
    fn test_pie_uses_first_measure_and_cycles_palette() {
        let rows: Vec<Row> = (0..20)
            .map(|i| Row::new().with_text("k", format!("k{}", i)).with_number("v", 1.0))
            .collect();
        let selection = AxisSelection::new(["k"], ["v"]);
        let table = aggregate(&rows, &selection.group_fields, &selection.measure_fields);
        let chart = build_chart(ChartKind::Pie, &selection, &table);

        assert_eq!(chart.slices.len(), 20);
        assert_eq!(chart.slices[0].color, PIE_PALETTE[0]);
        assert_eq!(chart.slices[18].color, PIE_PALETTE[0]);
        assert_eq!(chart.slices[19].label, "k19");
    }

    #[test]
    fn test_empty_table() {
        let selection = AxisSelection::default();
        let chart = build_chart(ChartKind::Line, &selection, &AggregateTable::empty());
        assert!(chart.is_empty());
        assert!(chart.series.is_empty());
        assert_eq!(chart.y_max, 0.0);
    }

    #[test]
    fn test_negative_values_keep_zero_floor() {
        let rows = vec![Row::new().with_text("k", "a").with_number("v", -4.0)];
        let selection = AxisSelection::new(["k"], ["v"]);
        let table = aggregate(&rows, &selection.group_fields, &selection.measure_fields);
        assert_eq!(build_chart(ChartKind::Bar, &selection, &table).y_max, 0.0);
    }

    #[test]
    fn test_serialized_shape() {
        let (selection, table) = sales_table();
        let json = serde_json::to_value(build_chart(ChartKind::Scatter, &selection, &table)).unwrap();

        assert_eq!(json["kind"], "scatter");
        assert_eq!(json["categories"], serde_json::json!(["east", "west"]));
        assert!(json.get("slices").is_none());
        assert!(json.get("points").is_none());
    }

    #[test]
    fn test_single_measure_emits_points() {
        let rows = vec![
            Row::new().with_text("color", "red").with_number("qty", 2.0),
            Row::new().with_text("color", "blue").with_number("qty", 1.5),
            Row::new().with_text("color", "red").with_number("qty", 3.0),
        ];
        let selection = AxisSelection::new(["color"], ["qty"]);
        let table = aggregate(&rows, &selection.group_fields, &selection.measure_fields);
        let chart = build_chart(ChartKind::Funnel, &selection, &table);

        assert_eq!(chart.points.len(), 2);
        assert_eq!(chart.points[0], DataPoint { name: "red".to_string(), value: 5.0 });
        assert_eq!(
            serde_json::to_value(&chart).unwrap()["points"],
            serde_json::json!([{"name": "red", "value": 5}, {"name": "blue", "value": 1.5}])
        );
    }
}
