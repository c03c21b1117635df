use std::process::ExitCode;

use fundraising_core::cli::run_cli;

fn main() -> ExitCode {
    fundraising_core::init();
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fundraising_cli: {err}");
            ExitCode::FAILURE
        }
    }
}
