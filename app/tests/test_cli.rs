//! FILENAME: tests/test_cli.rs
//! Integration tests for settings, rendering and error reporting.

mod common;

use std::io::Write;

use app_lib::{AppConfig, AppError, OutputFormat};
use chart_view::ChartKind;
use common::TestHarness;
use ingest::IngestError;
use tempfile::NamedTempFile;

#[test]
fn test_list_fields() {
    let harness = TestHarness::with_sales_data();
    let output = harness.run(&["--list-fields"]).unwrap();
    assert_eq!(output, "region\nteam\nquarter\nsales\nunits\nnote\n");
}

#[test]
fn test_text_table_output() {
    let harness = TestHarness::with_csv("color,qty\nred,2\nblue,1\nred,3\n");
    let output = harness.run(&["-x", "color", "-y", "qty", "-c", "table"]).unwrap();

    let cells: Vec<&str> = output.lines().filter(|line| line.starts_with('|')).collect();
    assert_eq!(cells, vec!["| color | qty |", "| red   |   5 |", "| blue  |   1 |"]);
    assert_eq!(output.lines().next(), Some("+-------+-----+"));
    assert_eq!(output.lines().last(), Some("+-------+-----+"));
}

#[test]
fn test_default_chart_is_bar() {
    let harness = TestHarness::with_csv("color,qty\nred,4\nblue,2\n");
    let mut config = AppConfig::default();
    config.bar_width = 4;
    let output = harness.run_with_config(config, &["-x", "color", "-y", "qty"]).unwrap();

    assert_eq!(output, "qty by color (bar)\nred  | #### 4\nblue | ## 2\n");
}

#[test]
fn test_pie_chart_json() {
    let harness = TestHarness::with_sales_data();
    let chart = harness.run_json(&["-x", "team", "-y", "sales", "-c", "pie"]);

    assert_eq!(chart["kind"], "pie");
    assert_eq!(chart["categories"], serde_json::json!(["A", "B"]));
    assert_eq!(chart["slices"][0]["label"], "A");
    assert_eq!(chart["slices"][0]["value"], 37.0);
    assert_eq!(chart["slices"][1]["color"], "#FFCE56");
    assert_eq!(chart["y_max"], 37.0);
    assert_eq!(chart["points"][1], serde_json::json!({"name": "B", "value": 8}));
}

#[test]
fn test_config_file_settings_apply() {
    let harness = TestHarness::with_csv("color;qty\nred;2\nred;3\n");
    let config = AppConfig::from_json(r#"{"delimiter": ";", "chart": "table", "format": "json"}"#)
        .unwrap();
    assert_eq!(config.format, OutputFormat::Json);

    let output = harness.run_with_config(config, &["-x", "color", "-y", "qty"]).unwrap();
    let records: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(records, serde_json::json!([{"name": "red", "qty": 5}]));
}

#[test]
fn test_cli_flag_beats_config_file() {
    let harness = TestHarness::with_csv("color,qty\nred,2\n");
    let config = AppConfig {
        chart: ChartKind::Pie,
        ..AppConfig::default()
    };
    let output = harness
        .run_with_config(config, &["-x", "color", "-y", "qty", "-c", "table", "-f", "text"])
        .unwrap();
    assert!(output.starts_with("+"));
}

#[test]
fn test_config_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"chart": "line", "bar_width": 12}}"#).unwrap();

    let config = AppConfig::load(file.path()).unwrap();
    assert_eq!(config.chart, ChartKind::Line);
    assert_eq!(config.bar_width, 12);
}

#[test]
fn test_bad_config_file_is_reported() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();

    let err = AppConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn test_missing_csv_is_an_ingest_error() {
    let harness = TestHarness::with_csv("a\n1\n");
    let mut cli = harness.cli(&["-x", "a", "-y", "a"]);
    cli.file = "/nonexistent/missing.csv".into();

    let err = app_lib::execute(&cli, &AppConfig::default()).unwrap_err();
    assert!(matches!(err, AppError::Ingest(IngestError::Io(_))));
}

#[test]
fn test_empty_csv_reports_missing_headers() {
    let harness = TestHarness::with_csv("");
    let err = harness.run(&["--list-fields"]).unwrap_err();
    assert!(matches!(err, AppError::Ingest(IngestError::MissingHeaders)));
}
