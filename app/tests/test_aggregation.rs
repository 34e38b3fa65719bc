//! FILENAME: tests/test_aggregation.rs
//! End-to-end tests: CSV file in, aggregated records out.

mod common;

use common::TestHarness;
use serde_json::json;

#[test]
fn test_single_key_sum_in_first_seen_order() {
    let harness = TestHarness::with_csv("color,qty\nred,2\nblue,1\nred,3\n");
    let records = harness.run_json(&["-x", "color", "-y", "qty", "--chart", "table"]);

    assert_eq!(records, json!([{"name": "red", "qty": 5}, {"name": "blue", "qty": 1}]));
}

#[test]
fn test_composite_key() {
    let harness = TestHarness::with_csv(
        "region,team,sales\neast,A,10\neast,B,5\nwest,A,7\n",
    );
    let records = harness.run_json(&["-x", "region", "-x", "team", "-y", "sales", "-c", "table"]);

    assert_eq!(
        records,
        json!([
            {"name": "east, A", "sales": 10},
            {"name": "east, B", "sales": 5},
            {"name": "west, A", "sales": 7},
        ])
    );
}

#[test]
fn test_text_measure_counts() {
    let harness = TestHarness::with_csv("cat,note\nx,hi\nx,bye\ny,hi\n");
    let records = harness.run_json(&["-x", "cat", "-y", "note", "-c", "table"]);

    assert_eq!(records, json!([{"name": "x", "note": 2}, {"name": "y", "note": 1}]));
}

#[test]
fn test_nothing_selected_produces_no_output() {
    let harness = TestHarness::with_sales_data();
    assert_eq!(harness.run(&[]).unwrap(), "");
    assert_eq!(harness.run(&["-x", "region"]).unwrap(), "");
    assert_eq!(harness.run(&["-y", "sales"]).unwrap(), "");
}

#[test]
fn test_headers_only_file_produces_no_output() {
    let harness = TestHarness::with_csv("region,sales\n");
    assert_eq!(harness.run(&["-x", "region", "-y", "sales"]).unwrap(), "");
}

#[test]
fn test_multiple_measures_mixed_rules() {
    let harness = TestHarness::with_sales_data();
    let records = harness.run_json(&["-x", "region", "-y", "sales", "-y", "note", "-c", "table"]);

    // The empty note cell is text, so it still counts.
    assert_eq!(
        records,
        json!([
            {"name": "east", "sales": 35, "note": 3},
            {"name": "west", "sales": 10, "note": 2},
        ])
    );
}

#[test]
fn test_without_dynamic_typing_every_measure_counts() {
    let harness = TestHarness::with_sales_data();
    let records = harness.run_json(&[
        "-x", "region", "-y", "sales", "-c", "table", "--no-dynamic-typing",
    ]);

    assert_eq!(records, json!([{"name": "east", "sales": 3}, {"name": "west", "sales": 2}]));
}

#[test]
fn test_unknown_field_is_absent_not_an_error() {
    let harness = TestHarness::with_sales_data();
    let records = harness.run_json(&["-x", "colour", "-y", "sales", "-c", "table"]);

    assert_eq!(records, json!([{"name": "", "sales": 45}]));
}

#[test]
fn test_numeric_and_text_group_values_merge() {
    let harness = TestHarness::with_csv("size,qty\n5,1\n\"5\",2\n05,4\n");
    let records = harness.run_json(&["-x", "size", "-y", "qty", "-c", "table"]);

    // 5, quoted "5" and 05 all render as the key "5".
    assert_eq!(records, json!([{"name": "5", "qty": 7}]));
}

#[test]
fn test_repeat_runs_are_identical() {
    let harness = TestHarness::with_sales_data();
    let args = ["-x", "quarter", "-x", "region", "-y", "units", "-c", "table"];
    let first = harness.run_json(&args);
    let second = harness.run_json(&args);

    assert_eq!(first, second);
    let names: Vec<&str> = first
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Q1, east", "Q1, west", "Q2, east", "Q2, west"]);
}

#[test]
fn test_repeated_measure_folds_each_occurrence() {
    let harness = TestHarness::with_csv("color,qty\nred,2\nblue,1\nred,3\n");
    let records = harness.run_json(&["-x", "color", "-y", "qty", "-y", "qty", "-c", "table"]);

    assert_eq!(records, json!([{"name": "red", "qty": 10}, {"name": "blue", "qty": 2}]));
}
