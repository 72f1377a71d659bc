//! # creview-disclosure: Witness Disclosure Analysis
//!
//! Detects witness values that may leak into public outputs, ledger state,
//! or control flow in a Compact contract without an explicit `disclose()`.
//!
//! ## Pipeline
//!
//! 1. [`witness`]: registry of `witness name(...): Type;` declarations.
//! 2. [`entropy`]: `Low`/`Normal` classification of each declared type.
//! 3. [`usage`]: zero-argument call sites of each witness.
//! 4. [`rules`]: rules R1–R4 over the usage lines and the whole file.
//! 5. [`report`]: severity-sorted aggregate for the reporter.
//!
//! ## Example
//!
//! ```
//! use creview_disclosure::DisclosureReport;
//! use creview_core::Severity;
//!
//! let text = "witness getAge(): Uint<8>;\nlet h = persistentHash(getAge());";
//! let report = DisclosureReport::analyze_text("age.compact", text);
//! assert_eq!(report.issues.len(), 1);
//! assert_eq!(report.issues[0].severity, Severity::Critical);
//! ```

pub mod entropy;
pub mod report;
pub mod rules;
pub mod usage;
pub mod witness;

pub use entropy::{classify_entropy, EntropyClass};
pub use report::{DisclosureReport, SeverityCounts};
pub use rules::{evaluate, sort_by_severity, DisclosureIssue, RuleId};
pub use usage::{find_usages, UsageSite};
pub use witness::{find_witness_declarations, WitnessDeclaration};
