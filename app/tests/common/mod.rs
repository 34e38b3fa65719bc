//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for csv-chart integration tests.

#![allow(dead_code)]

use std::io::Write;

use app_lib::{execute, AppConfig, AppError, Cli};
use clap::Parser;
use tempfile::NamedTempFile;

/// Sales data: region, team, quarter, sales, units, note.
pub struct SalesFixture;

impl SalesFixture {
    pub fn csv() -> &'static str {
        "region,team,quarter,sales,units,note\n\
         east,A,Q1,10,2,ok\n\
         east,B,Q1,5,1,late\n\
         west,A,Q1,7,3,ok\n\
         east,A,Q2,20,4,\n\
         west,B,Q2,3,1,ok\n"
    }
}

/// Test harness owning a temporary CSV file.
pub struct TestHarness {
    file: NamedTempFile,
}

impl TestHarness {
    /// Create a harness whose CSV file holds `contents`.
    pub fn with_csv(contents: &str) -> Self {
        let mut file = NamedTempFile::new().expect("create temp csv");
        file.write_all(contents.as_bytes()).expect("write temp csv");
        file.flush().expect("flush temp csv");
        TestHarness { file }
    }

    pub fn with_sales_data() -> Self {
        Self::with_csv(SalesFixture::csv())
    }

    pub fn path(&self) -> String {
        self.file.path().to_string_lossy().into_owned()
    }

    /// Parse `args` (without program name and file) into a Cli for this file.
    pub fn cli(&self, args: &[&str]) -> Cli {
        let mut argv: Vec<String> = vec!["csv-chart".to_string(), self.path()];
        argv.extend(args.iter().map(|a| a.to_string()));
        Cli::parse_from(argv)
    }

    /// Run the command with default settings plus the given flags.
    pub fn run(&self, args: &[&str]) -> Result<String, AppError> {
        self.run_with_config(AppConfig::default(), args)
    }

    pub fn run_with_config(&self, mut config: AppConfig, args: &[&str]) -> Result<String, AppError> {
        let cli = self.cli(args);
        config.apply_cli(&cli);
        execute(&cli, &config)
    }

    /// Run with JSON output and parse the result.
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let mut all: Vec<&str> = args.to_vec();
        all.extend(["--format", "json"]);
        let output = self.run(&all).expect("command succeeds");
        serde_json::from_str(&output).expect("valid json output")
    }
}
