//! # Entropy Classifier
//!
//! Coarse value-space classification of a witness type. A secret with fewer
//! than 2^20 possible values is treated as brute-forceable: hashing it
//! directly yields a commitment anyone can invert by enumeration.

use serde::Serialize;

use creview_core::scanner::{identifiers, Cursor};

/// Widest `Uint<w>` still considered low entropy.
pub const MAX_LOW_ENTROPY_WIDTH: u64 = 19;

/// Coarse entropy class of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntropyClass {
    /// Fewer than 2^20 values.
    Low,
    /// Everything else.
    Normal,
}

/// Classify a declared type signature.
///
/// `Low` when the signature contains, at identifier boundaries, any of:
/// `Uint<w>` with `1 <= w <= 19`, `Boolean`, or `Enum<…>`.
pub fn classify_entropy(type_signature: &str) -> EntropyClass {
    let low = identifiers(type_signature).any(|(pos, ident)| {
        let mut cur = Cursor::new(type_signature, pos + ident.len());
        match ident {
            "Boolean" => true,
            "Enum" => cur.eat(b'<'),
            "Uint" => {
                cur.eat(b'<')
                    && cur
                        .number()
                        .is_some_and(|w| (1..=MAX_LOW_ENTROPY_WIDTH).contains(&w))
                    && cur.eat(b'>')
            }
            _ => false,
        }
    });

    if low {
        EntropyClass::Low
    } else {
        EntropyClass::Normal
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn uint_width_threshold(width in 1u64..=512) {
            let expected = if width < 20 { EntropyClass::Low } else { EntropyClass::Normal };
            prop_assert_eq!(classify_entropy(&format!("Uint<{width}>")), expected);
        }
    }
}
