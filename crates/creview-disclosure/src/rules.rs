//! # Disclosure Rule Engine
//!
//! Applies four lexical rules. R1–R3 run on each usage line of each
//! witness; R4 scans the whole file. Rules are independent and cumulative:
//! one line can trigger several of them, and identical findings from
//! overlapping rules are kept separately.
//!
//! | Rule | Trigger | Severity |
//! |------|---------|----------|
//! | R1 `low-entropy-hash` | `persistentHash` call + low-entropy witness | Critical |
//! | R2 `undisclosed-return` | `return` + witness token, no `disclose` | High |
//! | R3 `undisclosed-ledger-write` | `.op(` ledger call + witness token, no `disclose` | Medium |
//! | R4 `witness-branch` | `if` whose condition calls a `get_*()` accessor | High |
//!
//! Matching is token presence on the code view, not data flow. R2 and R3 do
//! not check that the witness is the operand of the `return` or ledger call,
//! so `return other + w` and `return w` read the same. Expect false
//! positives.

use serde::Serialize;

use creview_core::scanner::{
    call_positions, contains_word, identifiers, is_call_at, is_zero_arg_call_at, word_positions,
};
use creview_core::{ScannedSource, Severity};

use crate::entropy::{classify_entropy, EntropyClass};
use crate::usage::find_usages;
use crate::witness::WitnessDeclaration;

/// Marker that makes a witness-derived value intentionally public.
pub const DISCLOSURE_MARKER: &str = "disclose";

/// Hash primitive whose output is a public commitment.
pub const PERSISTENT_HASH: &str = "persistentHash";

/// Ledger calls that mutate public state, in rule order.
pub const LEDGER_OPERATIONS: &[&str] = &["increment", "decrement", "write", "push", "set", "insert"];

/// Prefix of witness-style accessor functions.
pub const ACCESSOR_PREFIX: &str = "get_";

/// Stable rule identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    /// R1.
    LowEntropyHash,
    /// R2.
    UndisclosedReturn,
    /// R3.
    UndisclosedLedgerWrite,
    /// R4.
    WitnessBranch,
}

impl RuleId {
    /// Stable kebab-case identifier, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LowEntropyHash => "low-entropy-hash",
            Self::UndisclosedReturn => "undisclosed-return",
            Self::UndisclosedLedgerWrite => "undisclosed-ledger-write",
            Self::WitnessBranch => "witness-branch",
        }
    }

    /// Severity every finding of this rule carries.
    pub fn severity(&self) -> Severity {
        match self {
            Self::LowEntropyHash => Severity::Critical,
            Self::UndisclosedReturn | Self::WitnessBranch => Severity::High,
            Self::UndisclosedLedgerWrite => Severity::Medium,
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisclosureIssue {
    /// 1-based line number.
    pub line: usize,
    /// Rule that fired.
    pub rule: RuleId,
    pub severity: Severity,
    /// Human-readable description.
    pub description: String,
}

impl DisclosureIssue {
    fn new(line: usize, rule: RuleId, description: String) -> Self {
        Self {
            line,
            rule,
            severity: rule.severity(),
            description,
        }
    }
}

/// Run every rule over the file.
///
/// Order: per witness in registry order, per usage site in file order, rules
/// in declaration order; then the file-wide R4 scan. The R4 scan only runs
/// if at least one witness is declared.
pub fn evaluate(
    witnesses: &[WitnessDeclaration],
    source: &ScannedSource<'_>,
) -> Vec<DisclosureIssue> {
    let mut issues = Vec::new();

    for witness in witnesses {
        let entropy = classify_entropy(&witness.type_signature);
        for usage in find_usages(source, &witness.name) {
            let Some(line) = source.line(usage.line) else {
                continue;
            };
            check_usage_line(witness, entropy, usage.line, &line.code, &mut issues);
        }
    }

    if !witnesses.is_empty() {
        issues.extend(
            source
                .lines()
                .iter()
                .filter(|line| is_witness_branch(&line.code))
                .map(|line| {
                    DisclosureIssue::new(
                        line.number,
                        RuleId::WitnessBranch,
                        "Control flow depends on witness value - potential timing leak".into(),
                    )
                }),
        );
    }

    tracing::debug!(
        witnesses = witnesses.len(),
        issues = issues.len(),
        "evaluated disclosure rules"
    );
    issues
}

/// R1–R3 for one usage line.
fn check_usage_line(
    witness: &WitnessDeclaration,
    entropy: EntropyClass,
    line: usize,
    code: &str,
    issues: &mut Vec<DisclosureIssue>,
) {
    let name = witness.name.as_str();

    if entropy == EntropyClass::Low && call_positions(code, PERSISTENT_HASH).next().is_some() {
        issues.push(DisclosureIssue::new(
            line,
            RuleId::LowEntropyHash,
            format!(
                "Low-entropy witness '{name}' ({}) used in persistentHash() - vulnerable to brute-force",
                witness.type_signature
            ),
        ));
    }

    let disclosed = contains_word(code, DISCLOSURE_MARKER);
    let names_witness = contains_word(code, name);

    if contains_word(code, "return") && names_witness && !disclosed {
        issues.push(DisclosureIssue::new(
            line,
            RuleId::UndisclosedReturn,
            format!("Witness '{name}' may flow to public output without disclose()"),
        ));
    }

    if names_witness && !disclosed {
        for op in LEDGER_OPERATIONS.iter().filter(|op| has_ledger_call(code, op)) {
            issues.push(DisclosureIssue::new(
                line,
                RuleId::UndisclosedLedgerWrite,
                format!("Witness '{name}' used in ledger {op}() - verify disclosure intent"),
            ));
        }
    }
}

/// `.op(` method call.
fn has_ledger_call(code: &str, op: &str) -> bool {
    let bytes = code.as_bytes();
    word_positions(code, op)
        .any(|pos| pos > 0 && bytes[pos - 1] == b'.' && is_call_at(code, pos + op.len()))
}

/// `if` followed by a condition containing a zero-argument `get_*()` call.
fn is_witness_branch(code: &str) -> bool {
    word_positions(code, "if").any(|pos| {
        let cond_start = pos + "if".len();
        let opens_condition = code
            .as_bytes()
            .get(cond_start)
            .is_some_and(|&b| b.is_ascii_whitespace() || b == b'(');
        opens_condition && has_accessor_call(&code[cond_start..])
    })
}

/// Zero-argument call to an identifier with the `get_` prefix and at least
/// one more character.
fn has_accessor_call(text: &str) -> bool {
    identifiers(text).any(|(pos, ident)| {
        ident.len() > ACCESSOR_PREFIX.len()
            && ident.starts_with(ACCESSOR_PREFIX)
            && is_zero_arg_call_at(text, pos + ident.len())
    })
}

/// Stable sort by severity; equal severities keep their emission order.
pub fn sort_by_severity(issues: &mut [DisclosureIssue]) {
    issues.sort_by_key(|issue| issue.severity);
}
