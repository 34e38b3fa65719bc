//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point for the csv-chart application.
// CONTEXT: Wires ingestion, the aggregation engine and presentation together
//          behind a selection session and a command-line surface.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;

pub use commands::{execute, run, Cli, NOTHING_TO_SHOW};
pub use config::{AppConfig, OutputFormat};
pub use error::AppError;
pub use logging::{get_log_path, init_log_file, init_logging, next_seq, write_log};
pub use session::ChartSession;
