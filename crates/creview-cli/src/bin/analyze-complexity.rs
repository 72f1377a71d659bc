//! # analyze-complexity entry point
//!
//! Exit codes: 0 success, 1 usage error, 2 read error.

use std::process::ExitCode;

use creview_cli::complexity::{run_complexity, ComplexityArgs, EXIT_READ, EXIT_USAGE};
use creview_cli::{init_tracing, parse_args};

fn main() -> ExitCode {
    let args: ComplexityArgs = match parse_args(EXIT_USAGE) {
        Ok(args) => args,
        Err((message, code)) => {
            print!("{message}");
            return ExitCode::from(code);
        }
    };

    init_tracing(args.verbose);
    tracing::debug!(file = %args.file.display(), "analyze-complexity starting");

    match run_complexity(&args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_READ)
        }
    }
}
