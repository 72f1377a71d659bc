//! # analyze-complexity
//!
//! Estimates per-circuit constraint counts for one `.compact` file and
//! lists optimization opportunities.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use creview_complexity::{format_thousands, ComplexityReport};
use creview_core::{ReviewError, SourceFile};

use crate::{ColorChoice, ErrorOutput, OutputFormat, Palette};

pub const EXIT_OK: u8 = 0;
/// Missing argument or wrong extension.
pub const EXIT_USAGE: u8 = 1;
/// File not found or unreadable.
pub const EXIT_READ: u8 = 2;

/// Estimate proving-constraint cost of the circuits in a Compact contract.
#[derive(Parser, Debug)]
#[command(name = "analyze-complexity", version, about, long_about = None)]
pub struct ComplexityArgs {
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

/// Execute the complexity analysis and print the report.
pub fn run_complexity(args: &ComplexityArgs) -> Result<u8> {
    let palette = Palette::resolve(args.color);
    match analyze(args, &palette) {
        Ok(code) => Ok(code),
        Err(err) => {
            let Some(review) = err.downcast_ref::<ReviewError>() else {
                return Err(err);
            };
            let path = args.file.display().to_string();
            tracing::info!(path = %path, error = %review, "complexity analysis aborted");
            match args.format {
                OutputFormat::Text => println!("Error: {review}"),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&ErrorOutput {
                        path: &path,
                        error: review.to_string(),
                    })?
                ),
            }
            Ok(error_code(review))
        }
    }
}

/// Exit code for a file-level error.
pub fn error_code(err: &ReviewError) -> u8 {
    if err.is_usage_error() {
        EXIT_USAGE
    } else {
        EXIT_READ
    }
}

fn analyze(args: &ComplexityArgs, palette: &Palette) -> Result<u8> {
    let source = SourceFile::load(&args.file)?;
    let report = ComplexityReport::analyze(&source);
    tracing::info!(
        circuits = report.circuits.len(),
        total = report.total_constraints,
        "complexity analysis complete"
    );

    match args.format {
        OutputFormat::Text => print!("{}", render_complexity_text(&report, palette)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(EXIT_OK)
}

/// Text report, newline-terminated.
pub fn render_complexity_text(report: &ComplexityReport, palette: &Palette) -> String {
    if report.circuits.is_empty() {
        return format!(
            "Complexity Analysis: {}\n\nNo circuits found in file.\n",
            report.path
        );
    }

    let mut lines = vec![
        format!("{} {}", palette.cyan("Complexity Analysis:"), report.path),
        String::new(),
    ];

    for circuit in &report.circuits {
        lines.push(format!(
            "{} {} (line {})",
            palette.yellow("Circuit:"),
            circuit.name,
            circuit.line
        ));
        lines.push(format!(
            "  Estimated constraints: ~{}",
            format_thousands(circuit.estimated_constraints)
        ));
        if !circuit.breakdown.is_empty() {
            lines.push("  Breakdown:".to_string());
            lines.extend(circuit.breakdown.iter().map(|item| format!("    - {item}")));
        }
        if !circuit.optimizations.is_empty() {
            lines.push("  Optimization opportunities:".to_string());
            lines.extend(circuit.optimizations.iter().map(|opt| format!("    - {opt}")));
        }
        lines.push(String::new());
    }

    lines.push(format!(
        "{} {} (~{} estimated constraints)",
        palette.green("Overall complexity:"),
        report.complexity,
        format_thousands(report.total_constraints)
    ));
    lines.push(String::new());
    lines.push(
        "Note: Estimates are heuristic-based. Actual constraint count requires compilation."
            .to_string(),
    );

    lines.join("\n") + "\n"
}
