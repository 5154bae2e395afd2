use solution_runner::cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    solution_runner::init();

    match cli::run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
