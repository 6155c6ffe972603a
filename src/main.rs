//! Transport CLI - Vehicle record manager

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = transport_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
