//! # check-disclosure entry point
//!
//! Exit codes: 0 clean, 1 issues found, 2 usage or read error.

use std::process::ExitCode;

use creview_cli::disclosure::{run_disclosure, DisclosureArgs, EXIT_ERROR};
use creview_cli::{init_tracing, parse_args};

fn main() -> ExitCode {
    let args: DisclosureArgs = match parse_args(EXIT_ERROR) {
        Ok(args) => args,
        Err((message, code)) => {
            print!("{message}");
            return ExitCode::from(code);
        }
    };

    init_tracing(args.verbose);
    tracing::debug!(file = %args.file.display(), "check-disclosure starting");

    match run_disclosure(&args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
