// FILENAME: core/ingest/src/csv_reader.rs

use crate::{CsvOptions, IngestError};
use csv::{ReaderBuilder, StringRecord};
use dataset::{Dataset, FieldValue, Row};
use log::{debug, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn read_csv_path(path: &Path, options: &CsvOptions) -> Result<Dataset, IngestError> {
    debug!("reading {:?}", path);
    let file = File::open(path)?;
    read_csv_reader(file, options)
}

pub fn read_csv_str(input: &str, options: &CsvOptions) -> Result<Dataset, IngestError> {
    read_csv_reader(input.as_bytes(), options)
}

pub fn read_csv_reader<R: Read>(input: R, options: &CsvOptions) -> Result<Dataset, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .flexible(true)
        .from_reader(input);

    let header_record = reader.headers()?.clone();
    if header_record.is_empty() || header_record.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::MissingHeaders);
    }
    let headers = unique_headers(&header_record, options.trim_headers);

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result?;

        if options.skip_empty_lines && record.iter().all(str::is_empty) {
            skipped += 1;
            continue;
        }

        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            warn!(
                "line {}: {} cells for {} headers, extra cells dropped",
                line,
                record.len(),
                headers.len()
            );
        }

        // Short records leave their trailing fields absent.
        let mut row = Row::with_capacity(headers.len());
        for (header, cell) in headers.iter().zip(record.iter()) {
            row.insert(header.clone(), infer_value(cell, options.dynamic_typing));
        }
        rows.push(row);
    }

    debug!(
        "read {} rows, {} fields, skipped {} empty records",
        rows.len(),
        headers.len(),
        skipped
    );

    Ok(Dataset::new(headers, rows))
}

/// Types a single cell: a number when dynamic typing is on and the cell is
/// numeric, otherwise the cell text verbatim.
pub fn infer_value(cell: &str, dynamic_typing: bool) -> FieldValue {
    if dynamic_typing {
        if let Some(n) = parse_number(cell) {
            return FieldValue::Number(n);
        }
    }
    FieldValue::Text(cell.to_string())
}

/// Parses a plain decimal number, allowing surrounding whitespace.
///
/// Accepts `[-](digits[.digits] | .digits)[(e|E)[+|-]digits]`. Rejects a
/// leading `+`, hex, `NaN`, `inf` and anything that overflows to infinity.
pub fn parse_number(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if !is_decimal_literal(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// Header names with later duplicates renamed `name_1`, `name_2`, ...
fn unique_headers(record: &StringRecord, trim: bool) -> Vec<String> {
    let mut headers: Vec<String> = Vec::with_capacity(record.len());
    for raw in record.iter() {
        let name = if trim { raw.trim() } else { raw };
        if !headers.iter().any(|h| h == name) {
            headers.push(name.to_string());
            continue;
        }

        let mut suffix = 1;
        let renamed = loop {
            let candidate = format!("{}_{}", name, suffix);
            if !headers.iter().any(|h| *h == candidate) {
                break candidate;
            }
            suffix += 1;
        };
        warn!("duplicate header '{}' renamed to '{}'", name, renamed);
        headers.push(renamed);
    }
    headers
}
