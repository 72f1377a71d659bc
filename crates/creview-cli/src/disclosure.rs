//! # check-disclosure
//!
//! Scans one `.compact` file for witness values that may reach public state
//! without an explicit `disclose()`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use creview_core::{ReviewError, SourceFile};
use creview_disclosure::DisclosureReport;

use crate::{ColorChoice, ErrorOutput, OutputFormat, Palette};

/// Clean file.
pub const EXIT_PASS: u8 = 0;
/// Findings reported.
pub const EXIT_ISSUES: u8 = 1;
/// Usage or read error.
pub const EXIT_ERROR: u8 = 2;

/// Check a Compact contract for undisclosed witness data flows.
#[derive(Parser, Debug)]
#[command(name = "check-disclosure", version, about, long_about = None)]
pub struct DisclosureArgs {
    /// Path to the `.compact` file.
    pub file: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to color the report.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Enable verbose logging on stderr. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Execute the disclosure check and print the report.
pub fn run_disclosure(args: &DisclosureArgs) -> Result<u8> {
    let palette = Palette::resolve(args.color);
    match check(args, &palette) {
        Ok(code) => Ok(code),
        Err(err) => {
            let Some(review) = err.downcast_ref::<ReviewError>() else {
                return Err(err);
            };
            let path = args.file.display().to_string();
            tracing::info!(path = %path, error = %review, "disclosure check aborted");
            match args.format {
                OutputFormat::Text => print!("{}", render_disclosure_error(&path, review, &palette)),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&ErrorOutput {
                        path: &path,
                        error: review.to_string(),
                    })?
                ),
            }
            Ok(EXIT_ERROR)
        }
    }
}

fn check(args: &DisclosureArgs, palette: &Palette) -> Result<u8> {
    let source = SourceFile::load(&args.file)?;
    let report = DisclosureReport::analyze(&source);
    tracing::info!(
        witnesses = report.witnesses.len(),
        issues = report.issues.len(),
        "disclosure check complete"
    );

    match args.format {
        OutputFormat::Text => print!("{}", render_disclosure_text(&report, palette)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(if report.passed() { EXIT_PASS } else { EXIT_ISSUES })
}

/// Text report, newline-terminated.
pub fn render_disclosure_text(report: &DisclosureReport, palette: &Palette) -> String {
    let mut lines = Vec::new();

    if report.passed() {
        lines.push(format!("{} Disclosure Check: {}", palette.green("[PASS]"), report.path));
        lines.push(String::new());
        lines.push("No disclosure issues detected.".to_string());
    } else {
        lines.push(format!("{} Disclosure Check: {}", palette.yellow("[FAIL]"), report.path));
        lines.push(String::new());
        lines.push("Potential violations:".to_string());
        for issue in &report.issues {
            lines.push(format!(
                "  - Line {}: {} {}",
                issue.line,
                issue.severity.icon(),
                issue.description
            ));
        }
        lines.push(String::new());
        let s = &report.summary;
        lines.push(format!(
            "Summary: {} potential disclosure issues ({} critical, {} high, {} medium)",
            s.total(),
            s.critical,
            s.high,
            s.medium
        ));
    }

    lines.join("\n") + "\n"
}

/// Text error block, newline-terminated.
pub fn render_disclosure_error(path: &str, err: &ReviewError, palette: &Palette) -> String {
    format!(
        "{} Disclosure Check: {path}\nError: {err}\n",
        palette.red("[FAIL]")
    )
}
