//! FILENAME: app/src/config.rs
// PURPOSE: Application settings.
// CONTEXT: Settings come from an optional JSON file; command-line flags
//          override whatever the file says. Every field has a default, so an
//          empty object (or no file at all) is a valid configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chart_view::ChartKind;
use clap::ValueEnum;
use ingest::CsvOptions;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::commands::Cli;
use crate::error::AppError;

/// How rendered output is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bordered table or horizontal bars
    #[default]
    Text,
    /// Aggregate records or chart spec as JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Chart type used when none is given on the command line.
    pub chart: ChartKind,
    pub format: OutputFormat,
    /// Single ASCII field separator.
    pub delimiter: char,
    pub dynamic_typing: bool,
    pub skip_empty_lines: bool,
    /// One of off, error, warn, info, debug, trace.
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    /// Length of the longest bar in text charts.
    pub bar_width: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            chart: ChartKind::Bar,
            format: OutputFormat::Text,
            delimiter: ',',
            dynamic_typing: true,
            skip_empty_lines: true,
            log_level: "warn".to_string(),
            log_file: None,
            bar_width: 40,
        }
    }
}

impl AppConfig {
    /// Reads a JSON config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text).map_err(|e| match e {
            AppError::Config(msg) => AppError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, AppError> {
        let config: AppConfig =
            serde_json::from_str(text).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        self.level_filter()?;
        self.delimiter_byte()?;
        Ok(())
    }

    /// Overlays command-line flags on top of the file settings.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(chart) = cli.chart {
            self.chart = chart;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        if let Some(delimiter) = cli.delimiter {
            self.delimiter = delimiter;
        }
        if cli.no_dynamic_typing {
            self.dynamic_typing = false;
        }
        if cli.keep_empty_lines {
            self.skip_empty_lines = false;
        }
        if let Some(ref path) = cli.log_file {
            self.log_file = Some(path.clone());
        }
        match cli.verbose {
            0 => {}
            1 => self.log_level = "info".to_string(),
            2 => self.log_level = "debug".to_string(),
            _ => self.log_level = "trace".to_string(),
        }
    }

    pub fn level_filter(&self) -> Result<LevelFilter, AppError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| AppError::Config(format!("invalid log_level '{}'", self.log_level)))
    }

    fn delimiter_byte(&self) -> Result<u8, AppError> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(AppError::Config(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )))
        }
    }

    pub fn csv_options(&self) -> Result<CsvOptions, AppError> {
        Ok(CsvOptions {
            delimiter: self.delimiter_byte()?,
            dynamic_typing: self.dynamic_typing,
            skip_empty_lines: self.skip_empty_lines,
            ..CsvOptions::default()
        })
    }
}
