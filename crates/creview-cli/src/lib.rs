//! # creview-cli: Compact Review Command-Line Tools
//!
//! Two single-file reporters share this crate:
//!
//! - `check-disclosure <FILE>`: witness disclosure findings, exit 0 on a
//!   clean file, 1 when issues are found, 2 on errors.
//! - `analyze-complexity <FILE>`: per-circuit constraint estimates, exit 0
//!   on success, 1 on usage errors, 2 when the file cannot be read.
//!
//! ```bash
//! check-disclosure contracts/token.compact
//! analyze-complexity contracts/token.compact --format json
//! analyze-complexity contracts/token.compact --color never -vv
//! ```
//!
//! Reports go to stdout. Logs go to stderr, so report output stays
//! byte-identical across repeated runs on the same input.

pub mod complexity;
pub mod disclosure;

use std::io::IsTerminal;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

/// Report rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    /// Pretty-printed JSON of the report structure.
    Json,
}

const GREEN: &str = "\x1b[0;32m";
const RED: &str = "\x1b[0;31m";
const YELLOW: &str = "\x1b[0;33m";
const CYAN: &str = "\x1b[0;36m";
const RESET: &str = "\x1b[0m";

/// ANSI styling for report headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// No escape codes.
    pub const PLAIN: Self = Self { enabled: false };
    /// Always emit escape codes.
    pub const ANSI: Self = Self { enabled: true };

    /// Resolve a [`ColorChoice`] against the current stdout and environment.
    pub fn resolve(choice: ColorChoice) -> Self {
        let enabled = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
            }
        };
        Self { enabled }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.enabled {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    pub fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    pub fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    pub fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// JSON shape of a file-level error.
#[derive(Debug, Serialize)]
pub struct ErrorOutput<'a> {
    pub path: &'a str,
    pub error: String,
}

/// Install the stderr tracing subscriber for a `-v` count.
pub fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Exit code for an argument parse failure. Help and version requests
/// succeed; everything else is a usage error.
pub fn parse_error_code(kind: ErrorKind, usage_code: u8) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => usage_code,
    }
}

/// Parse process arguments. On failure returns the rendered clap message
/// (usage text for errors) and the exit code to use.
pub fn parse_args<P: Parser>(usage_code: u8) -> Result<P, (String, u8)> {
    P::try_parse().map_err(|err| {
        (
            err.render().to_string(),
            parse_error_code(err.kind(), usage_code),
        )
    })
}
