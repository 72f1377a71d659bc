//! # Circuit Extractor
//!
//! Finds circuit definitions and isolates each body by brace matching.
//!
//! A header line looks like
//!
//! ```text
//! export circuit transfer(to: Bytes<32>, amount: Uint<64>): [] {
//! ```
//!
//! The depth counter starts at the net brace balance of the header line and
//! is adjusted by every following line until it returns to zero. Braces in
//! comments and string literals are not counted. If the file ends first, the
//! body runs to end-of-file, which can swallow a following circuit.

use serde::Serialize;

use creview_core::scanner::{word_positions, Cursor};
use creview_core::ScannedSource;

/// One circuit definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitDefinition {
    /// Circuit name.
    pub name: String,
    /// 1-based line of the header.
    pub start_line: usize,
    /// Raw text from the opening brace through the closing line.
    pub body: String,
}

/// All circuits in file order. Bodies never overlap: scanning resumes on
/// the line after a body ends.
pub fn find_circuits(source: &ScannedSource<'_>) -> Vec<CircuitDefinition> {
    let lines = source.lines();
    let mut circuits = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let header = &lines[i];
        let Some((name, brace)) = match_header(&header.code) else {
            i += 1;
            continue;
        };

        let mut depth = brace_balance(&header.code);
        let mut body = vec![header.raw.get(brace..).unwrap_or(header.raw)];
        let mut j = i + 1;
        while j < lines.len() && depth > 0 {
            body.push(lines[j].raw);
            depth += brace_balance(&lines[j].code);
            j += 1;
        }

        if depth > 0 {
            tracing::debug!(circuit = name, line = header.number, "circuit body runs to end of file");
        }
        circuits.push(CircuitDefinition {
            name: name.to_string(),
            start_line: header.number,
            body: body.join("\n"),
        });
        i = j;
    }

    tracing::debug!(count = circuits.len(), "extracted circuits");
    circuits
}

/// Match a circuit header; returns the name and the byte offset of the
/// opening brace.
fn match_header(code: &str) -> Option<(&str, usize)> {
    word_positions(code, "circuit").find_map(|pos| {
        let mut cur = Cursor::new(code, pos + "circuit".len());
        if cur.skip_ws() == 0 {
            return None;
        }
        let name = cur.ident()?;
        cur.skip_ws();
        if cur.peek() == Some(b'<') {
            if !cur.skip_generic_args() {
                return None;
            }
            cur.skip_ws();
        }
        if !cur.eat(b'(') {
            return None;
        }
        cur.take_until(b')');
        if !cur.eat(b')') {
            return None;
        }
        cur.skip_ws();
        if !cur.eat(b':') {
            return None;
        }
        // At least one character of return type before the brace.
        let offset = cur.rest().find('{')?;
        (offset > 0).then(|| (name, cur.pos() + offset))
    })
}

/// Opening minus closing braces.
fn brace_balance(code: &str) -> i64 {
    code.bytes().fold(0, |acc, b| match b {
        b'{' => acc + 1,
        b'}' => acc - 1,
        _ => acc,
    })
}
