//! # Optimization Advisor
//!
//! Threshold heuristics over a circuit's operation counts.

use serde::Serialize;

use creview_core::scanner::{identifiers, is_call_at};
use creview_core::ScannedSource;

use crate::operations::OperationCounts;

/// Advisor thresholds. Each suggestion fires when its count is strictly
/// greater than the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdvisorThresholds {
    pub inequality_comparisons: u64,
    pub loop_iterations: u64,
    pub merkle_depth: u64,
    /// Hash-family calls, combined with a `get_*` accessor call.
    pub hashes_with_accessor: u64,
}

impl AdvisorThresholds {
    pub const DEFAULT: Self = Self {
        inequality_comparisons: 5,
        loop_iterations: 50,
        merkle_depth: 20,
        hashes_with_accessor: 2,
    };
}

impl Default for AdvisorThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Suggestions for one circuit, in a fixed order.
pub fn suggest_optimizations(
    ops: &OperationCounts,
    body: &str,
    thresholds: &AdvisorThresholds,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if ops.sha256_operations > 0 {
        suggestions.push(
            "Consider replacing sha256() with persistentHash() (~25x constraint reduction)".into(),
        );
    }
    if ops.inequality_comparisons > thresholds.inequality_comparisons {
        suggestions.push(format!(
            "High comparison count ({}) - consider restructuring logic to minimize < and > operations",
            ops.inequality_comparisons
        ));
    }
    if ops.loop_iterations > thresholds.loop_iterations {
        suggestions.push(format!(
            "Large loop detected (~{} iterations) - consider moving computation to witness functions",
            ops.loop_iterations
        ));
    }
    if ops.merkle_depth > thresholds.merkle_depth {
        suggestions.push(format!(
            "Deep Merkle tree (depth {}) - consider if a smaller tree is sufficient",
            ops.merkle_depth
        ));
    }
    if ops.hash_operations > thresholds.hashes_with_accessor && has_accessor_call(body) {
        suggestions.push(
            "Multiple hash operations - verify some can be computed off-chain in a witness".into(),
        );
    }

    suggestions
}

/// Any call to a `get_*` identifier in the body's code view.
fn has_accessor_call(body: &str) -> bool {
    ScannedSource::new(body).lines().iter().any(|line| {
        identifiers(&line.code).any(|(pos, ident)| {
            ident.len() > "get_".len()
                && ident.starts_with("get_")
                && is_call_at(&line.code, pos + ident.len())
        })
    })
}
