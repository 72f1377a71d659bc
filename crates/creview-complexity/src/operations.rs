//! # Operation Counter
//!
//! Counts the constraint-relevant operations in a circuit body. All counts
//! are taken on the body's code view, so operations mentioned in comments or
//! strings are not counted.

use serde::Serialize;

use creview_core::scanner::{call_positions, identifiers, is_call_at, word_positions, Cursor};
use creview_core::ScannedSource;

/// Hash-family primitives, summed into one counter.
pub const HASH_FAMILY: &[&str] = &["persistentHash", "persistentCommit", "hash"];

/// Depth assumed for a Merkle reference whose depth is not a positive literal.
pub const DEFAULT_MERKLE_DEPTH: u64 = 20;

/// Operation counts for one circuit body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OperationCounts {
    pub hash_operations: u64,
    pub sha256_operations: u64,
    pub ec_operations: u64,
    /// Merkle tree type references.
    pub merkle_proofs: u64,
    /// Effective depth: the largest depth literal seen, or
    /// [`DEFAULT_MERKLE_DEPTH`] when references exist but none carried a
    /// positive literal. Zero when there are no references.
    pub merkle_depth: u64,
    /// `<`, `>`, `<=`, `>=` outside generic argument lists.
    pub inequality_comparisons: u64,
    pub equality_comparisons: u64,
    /// Sum of `B - A` over bounded `A..B` loop headers.
    pub loop_iterations: u64,
    /// `[ident]` index expressions.
    pub collection_accesses: u64,
}

/// Count operations in a circuit body.
pub fn count_operations(body: &str) -> OperationCounts {
    let scanned = ScannedSource::new(body);
    let mut ops = OperationCounts::default();
    let mut max_literal: Option<u64> = None;

    for line in scanned.lines() {
        let code = line.code.as_str();

        ops.hash_operations += HASH_FAMILY
            .iter()
            .map(|f| call_positions(code, f).count() as u64)
            .sum::<u64>();
        ops.sha256_operations += call_positions(code, "sha256").count() as u64;
        ops.ec_operations += call_positions(code, "ecMul").count() as u64;

        for depth in merkle_references(code) {
            ops.merkle_proofs += 1;
            if let Some(d) = depth.filter(|&d| d > 0) {
                max_literal = Some(max_literal.map_or(d, |m| m.max(d)));
            }
        }

        ops.inequality_comparisons += count_inequalities(code);
        ops.equality_comparisons += code.matches("==").count() as u64;
        ops.loop_iterations += word_positions(code, "for")
            .filter_map(|pos| loop_range(code, pos + "for".len()))
            .sum::<u64>();
        ops.collection_accesses += count_index_expressions(code);
    }

    if ops.merkle_proofs > 0 {
        ops.merkle_depth = max_literal.unwrap_or(DEFAULT_MERKLE_DEPTH);
    }

    tracing::trace!(?ops, "counted operations");
    ops
}

/// Every `…MerkleTree<` / `…MerkleTreeClient<` reference with its depth
/// literal, if the first generic argument is a decimal number.
fn merkle_references(code: &str) -> Vec<Option<u64>> {
    let bytes = code.as_bytes();
    identifiers(code)
        .filter(|(pos, ident)| {
            (ident.ends_with("MerkleTree") || ident.ends_with("MerkleTreeClient"))
                && bytes.get(pos + ident.len()) == Some(&b'<')
        })
        .map(|(pos, ident)| {
            let mut cur = Cursor::new(code, pos + ident.len() + 1);
            cur.skip_ws();
            let depth = cur.number()?;
            cur.skip_ws();
            matches!(cur.peek(), Some(b'>') | Some(b',')).then_some(depth)
        })
        .collect()
}

/// Byte mask of generic argument lists: `<…>` opened directly after an
/// identifier starting with an uppercase letter, after `default`, or after
/// any identifier the list turns into a call (`persistentHash<T>(x)`).
fn generic_mask(code: &str) -> Vec<bool> {
    let bytes = code.as_bytes();
    let mut mask = vec![false; bytes.len()];
    for (pos, ident) in identifiers(code) {
        let open = pos + ident.len();
        if bytes.get(open) != Some(&b'<') {
            continue;
        }
        let type_like = ident.as_bytes().first().is_some_and(u8::is_ascii_uppercase)
            || ident == "default";
        if !type_like && !is_call_at(code, open) {
            continue;
        }
        let mut cur = Cursor::new(code, open);
        if cur.skip_generic_args() {
            for m in &mut mask[open..cur.pos()] {
                *m = true;
            }
        }
    }
    mask
}

/// Inequality operators, each of `<`, `>`, `<=`, `>=` counted once. Generic
/// brackets and the arrows `=>` / `->` are skipped.
fn count_inequalities(code: &str) -> u64 {
    let bytes = code.as_bytes();
    let mask = generic_mask(code);
    let mut count = 0;
    let mut i = 0;

    while i < bytes.len() {
        if mask[i] {
            i += 1;
            continue;
        }
        let next_is_eq = bytes.get(i + 1) == Some(&b'=');
        match bytes[i] {
            b'<' => {
                count += 1;
                i += if next_is_eq { 2 } else { 1 };
                continue;
            }
            b'>' => {
                let arrow = i > 0 && matches!(bytes[i - 1], b'=' | b'-');
                if !arrow {
                    count += 1;
                    if next_is_eq {
                        i += 2;
                        continue;
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }
    count
}

/// Iteration count of a `for` header starting right after the keyword.
///
/// Accepts `for x in A..B` and `for (const x of A..B)`.
fn loop_range(code: &str, after_for: usize) -> Option<u64> {
    let mut cur = Cursor::new(code, after_for);
    let ws = cur.skip_ws();

    if cur.eat(b'(') {
        cur.skip_ws();
        if !cur.eat_word("const") || cur.skip_ws() == 0 {
            return None;
        }
        cur.ident()?;
        if cur.skip_ws() == 0 || !cur.eat_word("of") {
            return None;
        }
        cur.skip_ws();
    } else {
        if ws == 0 {
            return None;
        }
        cur.ident()?;
        if cur.skip_ws() == 0 || !cur.eat_word("in") || cur.skip_ws() == 0 {
            return None;
        }
    }

    let start = cur.number()?;
    if !cur.eat_str("..") {
        return None;
    }
    let end = cur.number()?;
    Some(end.saturating_sub(start))
}

/// `[word]` index expressions.
fn count_index_expressions(code: &str) -> u64 {
    code.match_indices('[')
        .filter(|(pos, _)| {
            let mut cur = Cursor::new(code, pos + 1);
            cur.ident().is_some() && cur.eat(b']')
        })
        .count() as u64
}
