//! # Usage Locator
//!
//! Finds the call sites of a witness: lines whose code view contains the
//! witness name as a whole identifier followed by an empty argument list.
//! Detection is presence-based, so a line is recorded once however many
//! calls it holds.

use serde::Serialize;

use creview_core::scanner::{is_zero_arg_call_at, word_positions};
use creview_core::ScannedSource;

/// A line on which a witness is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageSite {
    /// Witness being called.
    pub witness_name: String,
    /// 1-based line number.
    pub line: usize,
    /// Trimmed raw line text.
    pub text: String,
}

/// Every line calling `witness_name()`, in file order.
pub fn find_usages(source: &ScannedSource<'_>, witness_name: &str) -> Vec<UsageSite> {
    source
        .lines()
        .iter()
        .filter(|line| {
            word_positions(&line.code, witness_name)
                .any(|pos| is_zero_arg_call_at(&line.code, pos + witness_name.len()))
        })
        .map(|line| {
            tracing::trace!(witness = witness_name, line = line.number, "witness usage");
            UsageSite {
                witness_name: witness_name.to_string(),
                line: line.number,
                text: line.raw.trim().to_string(),
            }
        })
        .collect()
}
