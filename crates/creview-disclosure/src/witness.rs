//! # Witness Registry
//!
//! Scans the whole file for declarations of the shape
//!
//! ```text
//! witness <name>(<params>): <Type>;
//! ```
//!
//! where `<Type>` is an identifier with at most one generic argument list
//! that contains no `>`. Nested generics such as `Vector<2, Uint<8>>` do not
//! match and are skipped.

use serde::Serialize;

use creview_core::scanner::{word_positions, Cursor};
use creview_core::ScannedSource;

/// One textual witness declaration.
///
/// Declarations are not deduplicated: re-declaring a name produces a second
/// record, and usage lookup matches every record sharing that name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WitnessDeclaration {
    /// Witness function name.
    pub name: String,
    /// 1-based line of the declaration.
    pub declaration_line: usize,
    /// Declared return type as written, e.g. `Uint<8>`.
    pub type_signature: String,
}

/// Find all witness declarations in file order (first match per line).
pub fn find_witness_declarations(source: &ScannedSource<'_>) -> Vec<WitnessDeclaration> {
    let declarations: Vec<WitnessDeclaration> = source
        .lines()
        .iter()
        .filter_map(|line| {
            word_positions(&line.code, "witness")
                .find_map(|pos| match_declaration(&line.code, pos + "witness".len()))
                .map(|(name, type_signature)| WitnessDeclaration {
                    name: name.to_string(),
                    declaration_line: line.number,
                    type_signature: type_signature.to_string(),
                })
        })
        .collect();

    tracing::debug!(count = declarations.len(), "found witness declarations");
    declarations
}

/// Match the remainder of a declaration after the `witness` keyword.
/// Returns `(name, type_signature)`.
fn match_declaration(code: &str, after_keyword: usize) -> Option<(&str, &str)> {
    let mut cur = Cursor::new(code, after_keyword);
    if cur.skip_ws() == 0 {
        return None;
    }
    let name = cur.ident()?;
    cur.skip_ws();
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
    cur.skip_ws();

    let type_start = cur.pos();
    cur.ident()?;
    if cur.eat(b'<') {
        let args = cur.take_until(b'>');
        if args.is_empty() || !cur.eat(b'>') {
            return None;
        }
    }
    let type_end = cur.pos();

    cur.skip_ws();
    if !cur.eat(b';') {
        return None;
    }
    Some((name, &code[type_start..type_end]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(text: &str) -> Vec<WitnessDeclaration> {
        find_witness_declarations(&ScannedSource::new(text))
    }

    #[test]
    fn simple_declaration() {
        let decls = find("witness getAge(): Uint<8>;");
        assert_eq!(
            decls,
            vec![WitnessDeclaration {
                name: "getAge".into(),
                declaration_line: 1,
                type_signature: "Uint<8>".into(),
            }]
        );
    }

    #[test]
    fn parameters_and_spacing() {
        let decls = find("\n  witness  secretKey ( idx: Field , n: Uint<8> ) :  Bytes<32> ;");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "secretKey");
        assert_eq!(decls[0].declaration_line, 2);
        assert_eq!(decls[0].type_signature, "Bytes<32>");
    }

    #[test]
    fn export_prefix_and_plain_type() {
        let decls = find("export witness flag(): Boolean;");
        assert_eq!(decls[0].type_signature, "Boolean");
    }

    #[test]
    fn nested_generics_are_skipped() {
        assert!(find("witness path(): Vector<2, Uint<8>>;").is_empty());
    }

    #[test]
    fn missing_semicolon_is_skipped() {
        assert!(find("witness f(): Field").is_empty());
    }

    #[test]
    fn commented_out_declaration_is_ignored() {
        assert!(find("// witness f(): Field;").is_empty());
        assert!(find("/* witness f(): Field; */").is_empty());
    }

    #[test]
    fn identifier_containing_witness_is_not_a_keyword() {
        assert!(find("mywitness f(): Field;").is_empty());
    }

    #[test]
    fn redeclaration_yields_two_records() {
        let decls = find("witness k(): Field;\nwitness k(): Boolean;");
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].declaration_line, 1);
        assert_eq!(decls[1].declaration_line, 2);
        assert_eq!(decls[1].type_signature, "Boolean");
    }

    #[test]
    fn later_occurrence_on_same_line_can_match() {
        let decls = find("witness; witness g(): Field;");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "g");
    }
}
