//! FILENAME: app/src/commands.rs
// PURPOSE: Command-line surface.
// CONTEXT: `run` loads settings and logging, then `execute` does the work and
//          returns what should be printed, so tests can drive it directly.

use std::path::PathBuf;

use chart_view::ChartKind;
use clap::{ArgAction, Parser};

use crate::config::{AppConfig, OutputFormat};
use crate::error::AppError;
use crate::logging;
use crate::session::ChartSession;
use crate::{log_enter, log_exit, log_info, log_warn};

/// Message printed when the selection does not produce any output.
pub const NOTHING_TO_SHOW: &str =
    "Nothing to show: select at least one X-axis (-x) and one Y-axis (-y) field";

#[derive(Parser, Debug)]
#[command(name = "csv-chart")]
#[command(version)]
#[command(about = "Group CSV rows by X-axis fields and sum or count Y-axis fields")]
#[command(long_about = "Group CSV rows by X-axis fields and sum or count Y-axis fields.

Numeric Y-axis values are summed per group; text or missing values count as one.
Groups appear in the order they are first seen in the file.

EXAMPLES:
  csv-chart sales.csv --list-fields
  csv-chart sales.csv -x region -y sales --chart table
  csv-chart sales.csv -x region -x team -y sales -y units --format json")]
pub struct Cli {
    /// CSV file to load (first line is the header)
    pub file: PathBuf,

    /// Grouping field (repeat for a composite key)
    #[arg(short = 'x', long = "x-axis", value_name = "FIELD")]
    pub group_fields: Vec<String>,

    /// Measure field (repeat for several series)
    #[arg(short = 'y', long = "y-axis", value_name = "FIELD")]
    pub measure_fields: Vec<String>,

    /// Chart type: bar, pie, line, area, scatter, funnel, table
    #[arg(short, long)]
    pub chart: Option<ChartKind>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// JSON settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Field separator
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Keep every cell as text (all measures become counts)
    #[arg(long)]
    pub no_dynamic_typing: bool,

    /// Keep records whose cells are all empty
    #[arg(long)]
    pub keep_empty_lines: bool,

    /// Print the field names found in the header and exit
    #[arg(long)]
    pub list_fields: bool,

    /// Also write log lines to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Resolves settings, installs logging and executes the command.
pub fn run(cli: &Cli) -> Result<String, AppError> {
    let mut config = match cli.config {
        Some(ref path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    config.apply_cli(cli);

    logging::init_logging(config.level_filter()?, config.log_file.as_deref())
        .map_err(AppError::Config)?;
    if let Some(path) = logging::get_log_path() {
        log_info!("CLI", "logging to {:?}", path);
    }

    execute(cli, &config)
}

/// Loads the file, applies the selection and renders the result.
pub fn execute(cli: &Cli, config: &AppConfig) -> Result<String, AppError> {
    log_enter!("CLI", "execute", "file={:?} chart={} format={}", cli.file, config.chart, config.format);

    let mut session = ChartSession::new();
    session.load_csv(&cli.file, &config.csv_options()?)?;

    if cli.list_fields {
        let mut out = String::new();
        for header in session.headers() {
            out.push_str(header);
            out.push('\n');
        }
        log_exit!("CLI", "execute", "listed {} fields", session.headers().len());
        return Ok(out);
    }

    session.set_group_fields(cli.group_fields.clone());
    session.set_measure_fields(cli.measure_fields.clone());
    session.set_chart_kind(config.chart);

    for field in session.missing_fields() {
        log_warn!("SELECT", "field '{}' is not in the header; treated as absent in every row", field);
    }

    let output = match session.render(config.format, config.bar_width)? {
        Some(rendered) => rendered,
        None => {
            log_warn!("CLI", "{}", NOTHING_TO_SHOW);
            String::new()
        }
    };

    log_exit!("CLI", "execute", "{} bytes", output.len());
    Ok(output)
}
