//! # creview-core: Foundational Types for compact-review
//!
//! Shared building blocks for the Compact static analyzers. Every other
//! crate in the workspace depends on `creview-core`; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **One lexical view of the source.** All matching runs against the
//!    [`ScannedSource`] code view, where comment and string-literal bytes are
//!    blanked. A brace in a comment never closes a circuit and a witness name
//!    inside a string never counts as a usage.
//!
//! 2. **Byte-aligned views.** The code view of a line has exactly the byte
//!    length of the raw line, so an offset found in one is valid in the other.
//!
//! 3. **Ordered severities.** [`Severity`] derives `Ord` in presentation
//!    order. Adding a severity forces every `match` to handle it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `creview-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod scanner;
pub mod severity;
pub mod source;

// Re-export primary types for ergonomic imports.
pub use error::ReviewError;
pub use scanner::{Cursor, ScannedSource, SourceLine};
pub use severity::Severity;
pub use source::{SourceFile, COMPACT_EXTENSION};
