//! # Constraint Cost Model
//!
//! Converts operation counts into an estimated constraint total with a
//! human-readable breakdown.
//!
//! | Operation | Constraints per unit |
//! |-----------|----------------------|
//! | hash-family call | 1,000 |
//! | `sha256` call | 25,000 |
//! | `ecMul` call | 7,500 |
//! | Merkle level | 1,000 (× depth × references) |
//! | inequality comparison | 254 |
//! | collection access | 254 |
//!
//! Loop iterations are reported but not multiplied into the total: the
//! operations inside a loop body are already counted once, and there is no
//! per-iteration attribution. Large loops surface through the advisor
//! instead.

use serde::Serialize;

use crate::operations::OperationCounts;

/// Per-unit constraint costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostTable {
    pub hash: u64,
    pub sha256: u64,
    pub ec_mul: u64,
    pub merkle_level: u64,
    pub inequality: u64,
    pub collection_access: u64,
}

impl CostTable {
    /// Heuristic costs for the Compact proving backend.
    pub const DEFAULT: Self = Self {
        hash: 1_000,
        sha256: 25_000,
        ec_mul: 7_500,
        merkle_level: 1_000,
        inequality: 254,
        collection_access: 254,
    };
}

impl Default for CostTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Estimated total plus breakdown lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintEstimate {
    pub total: u64,
    pub breakdown: Vec<String>,
}

impl ConstraintEstimate {
    fn add(&mut self, cost: u64, line: String) {
        self.total = self.total.saturating_add(cost);
        self.breakdown.push(line);
    }

    /// `count × unit` term; skipped when `count` is zero.
    fn add_term(&mut self, label: &str, count: u64, unit: u64) {
        if count == 0 {
            return;
        }
        let cost = count.saturating_mul(unit);
        self.add(
            cost,
            format!(
                "{label}: {count} × ~{} = ~{}",
                format_thousands(unit),
                format_thousands(cost)
            ),
        );
    }
}

/// Estimate the constraint count of one circuit.
pub fn estimate_constraints(ops: &OperationCounts, table: &CostTable) -> ConstraintEstimate {
    let mut est = ConstraintEstimate {
        total: 0,
        breakdown: Vec::new(),
    };

    est.add_term("Hash operations", ops.hash_operations, table.hash);
    est.add_term("SHA256 operations", ops.sha256_operations, table.sha256);
    est.add_term("EC multiplications", ops.ec_operations, table.ec_mul);

    if ops.merkle_proofs > 0 {
        let cost = ops
            .merkle_proofs
            .saturating_mul(ops.merkle_depth)
            .saturating_mul(table.merkle_level);
        est.add(
            cost,
            format!(
                "Merkle proofs: {} × depth {} × ~{} = ~{}",
                ops.merkle_proofs,
                ops.merkle_depth,
                format_thousands(table.merkle_level),
                format_thousands(cost)
            ),
        );
    }

    est.add_term("Comparisons (<, >)", ops.inequality_comparisons, table.inequality);
    est.add_term("Collection accesses", ops.collection_accesses, table.collection_access);

    if ops.loop_iterations > 1 {
        est.breakdown.push(format!(
            "Loop iterations: ~{} (constraints scale linearly)",
            format_thousands(ops.loop_iterations)
        ));
    }

    est
}

/// Coarse classification of a constraint total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityClass {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ComplexityClass {
    /// `<1,000` Low, `<10,000` Medium, `<50,000` High, else Very High.
    pub fn classify(total: u64) -> Self {
        match total {
            0..=999 => Self::Low,
            1_000..=9_999 => Self::Medium,
            10_000..=49_999 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl std::fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render `n` with comma thousands separators.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The total is the sum of the included terms; loops and equality
        /// never contribute.
        #[test]
        fn total_is_sum_of_terms(
            h in 0u64..100, s in 0u64..100, e in 0u64..100,
            m in 0u64..10, d in 1u64..64, i in 0u64..100,
            c in 0u64..100, l in 0u64..1000, q in 0u64..100,
        ) {
            let ops = OperationCounts {
                hash_operations: h,
                sha256_operations: s,
                ec_operations: e,
                merkle_proofs: m,
                merkle_depth: d,
                inequality_comparisons: i,
                equality_comparisons: q,
                loop_iterations: l,
                collection_accesses: c,
            };
            let expected = h * 1_000 + s * 25_000 + e * 7_500 + m * d * 1_000 + i * 254 + c * 254;
            prop_assert_eq!(estimate_constraints(&ops, &CostTable::DEFAULT).total, expected);
        }
    }
}
