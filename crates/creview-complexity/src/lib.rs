//! # creview-complexity: Constraint-Cost Estimation
//!
//! Estimates how many proving constraints each circuit in a Compact file
//! will generate, and suggests cheaper formulations.
//!
//! ## Pipeline
//!
//! 1. [`circuit`]: circuit headers and brace-matched bodies.
//! 2. [`operations`]: per-body operation counts.
//! 3. [`cost`]: cost table, totals, breakdown, classification.
//! 4. [`advisor`]: optimization suggestions.
//!
//! Estimates are heuristic. Only compilation gives the real constraint
//! count.
//!
//! ## Example
//!
//! ```
//! use creview_complexity::{ComplexityClass, ComplexityReport};
//!
//! let text = "circuit h(x: Bytes<32>): Bytes<32> {\n  return persistentHash(sha256(x));\n}";
//! let report = ComplexityReport::analyze_text("h.compact", text);
//! assert_eq!(report.total_constraints, 26_000);
//! assert_eq!(report.complexity, ComplexityClass::High);
//! ```

pub mod advisor;
pub mod circuit;
pub mod cost;
pub mod operations;

use serde::Serialize;

use creview_core::{ScannedSource, SourceFile};

pub use advisor::{suggest_optimizations, AdvisorThresholds};
pub use circuit::{find_circuits, CircuitDefinition};
pub use cost::{estimate_constraints, format_thousands, ComplexityClass, ConstraintEstimate, CostTable};
pub use operations::{count_operations, OperationCounts, DEFAULT_MERKLE_DEPTH};

/// Analysis of one circuit. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitAnalysis {
    pub name: String,
    /// 1-based header line.
    pub line: usize,
    pub operations: OperationCounts,
    pub estimated_constraints: u64,
    pub breakdown: Vec<String>,
    pub optimizations: Vec<String>,
}

impl CircuitAnalysis {
    fn build(def: &CircuitDefinition, table: &CostTable, thresholds: &AdvisorThresholds) -> Self {
        let operations = count_operations(&def.body);
        let estimate = estimate_constraints(&operations, table);
        let optimizations = suggest_optimizations(&operations, &def.body, thresholds);
        tracing::debug!(
            circuit = %def.name,
            constraints = estimate.total,
            "analyzed circuit"
        );
        Self {
            name: def.name.clone(),
            line: def.start_line,
            operations,
            estimated_constraints: estimate.total,
            breakdown: estimate.breakdown,
            optimizations,
        }
    }
}

/// Analyze every circuit with the default cost table and thresholds.
pub fn analyze_circuits(text: &str) -> Vec<CircuitAnalysis> {
    analyze_circuits_with(text, &CostTable::DEFAULT, &AdvisorThresholds::DEFAULT)
}

/// Analyze every circuit with a custom cost table and thresholds.
pub fn analyze_circuits_with(
    text: &str,
    table: &CostTable,
    thresholds: &AdvisorThresholds,
) -> Vec<CircuitAnalysis> {
    find_circuits(&ScannedSource::new(text))
        .iter()
        .map(|def| CircuitAnalysis::build(def, table, thresholds))
        .collect()
}

/// Result of a complexity analysis over one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplexityReport {
    pub path: String,
    /// Circuits in file order.
    pub circuits: Vec<CircuitAnalysis>,
    /// Sum of every circuit's estimate.
    pub total_constraints: u64,
    /// Classification of `total_constraints`.
    pub complexity: ComplexityClass,
}

impl ComplexityReport {
    /// Analyze a loaded file.
    pub fn analyze(source: &SourceFile) -> Self {
        Self::analyze_text(source.path().display().to_string(), source.text())
    }

    /// Analyze in-memory text.
    pub fn analyze_text(path: impl Into<String>, text: &str) -> Self {
        let circuits = analyze_circuits(text);
        let total_constraints = circuits
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.estimated_constraints));
        Self {
            path: path.into(),
            circuits,
            total_constraints,
            complexity: ComplexityClass::classify(total_constraints),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merkle_only_circuit() {
        let text = "circuit member(): [] {\n  const t: MerkleTree<24> = x;\n}";
        let report = ComplexityReport::analyze_text("m.compact", text);
        assert_eq!(report.circuits.len(), 1);
        assert_eq!(report.circuits[0].estimated_constraints, 24_000);
        assert_eq!(report.circuits[0].optimizations.len(), 1);
        assert_eq!(report.complexity, ComplexityClass::High);
    }

    #[test]
    fn sha_and_hash_circuit() {
        let text = "export circuit h(x: Bytes<32>): Bytes<32> {\n  const a = sha256(x);\n  return hash(a);\n}";
        let report = ComplexityReport::analyze_text("h.compact", text);
        let c = &report.circuits[0];
        assert_eq!(c.name, "h");
        assert_eq!(c.line, 1);
        assert_eq!(c.estimated_constraints, 26_000);
        assert_eq!(report.complexity, ComplexityClass::High);
        assert!(c.optimizations[0].contains("sha256()"));
    }

    #[test]
    fn totals_sum_across_circuits() {
        let text = "\
circuit a(): [] {
  const h = persistentHash(x);
}

circuit b(x: Uint<8>): Boolean {
  return x < 10;
}
";
        let report = ComplexityReport::analyze_text("ab.compact", text);
        let totals: Vec<u64> = report.circuits.iter().map(|c| c.estimated_constraints).collect();
        assert_eq!(totals, vec![1_000, 254]);
        assert_eq!(report.total_constraints, 1_254);
        assert_eq!(report.complexity, ComplexityClass::Medium);
        assert_eq!(report.circuits[1].line, 5);
    }

    #[test]
    fn generic_hash_call_costs_one_hash() {
        let source = SourceFile::from_text(
            "pair.compact",
            "circuit pair(a: Bytes<32>, b: Bytes<32>): Bytes<32> {\n  return persistentHash<Vector<2, Bytes<32>>>([a, b]);\n}\n",
        );
        let report = ComplexityReport::analyze(&source);
        assert_eq!(report.path, "pair.compact");
        assert_eq!(report.total_constraints, 1_000);
        assert_eq!(
            report.circuits[0].breakdown,
            vec!["Hash operations: 1 × ~1,000 = ~1,000"]
        );
        assert!(report.circuits[0].optimizations.is_empty());
    }

    #[test]
    fn no_circuits() {
        let report = ComplexityReport::analyze_text("e.compact", "witness k(): Field;\n");
        assert!(report.circuits.is_empty());
        assert_eq!(report.total_constraints, 0);
        assert_eq!(report.complexity, ComplexityClass::Low);
    }

    #[test]
    fn custom_thresholds_flow_through() {
        let thresholds = AdvisorThresholds {
            inequality_comparisons: 0,
            ..AdvisorThresholds::DEFAULT
        };
        let out = analyze_circuits_with(
            "circuit f(a: Field): Boolean { return a < 3; }",
            &CostTable::DEFAULT,
            &thresholds,
        );
        assert_eq!(out[0].optimizations.len(), 1);
    }

    #[test]
    fn report_serializes() {
        let report = ComplexityReport::analyze_text(
            "m.compact",
            "circuit f(): [] {\n  sha256(x);\n}",
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["complexity"], "high");
        assert_eq!(json["circuits"][0]["operations"]["sha256_operations"], 1);
        assert_eq!(json["total_constraints"], 25_000);
    }
}
