use std::process::ExitCode;

use app_lib::{run, Cli, NOTHING_TO_SHOW};
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) if output.is_empty() => {
            eprintln!("{}", NOTHING_TO_SHOW);
            ExitCode::SUCCESS
        }
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
