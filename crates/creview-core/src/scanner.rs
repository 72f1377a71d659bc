//! # Lexical Scanner
//!
//! Splits Compact source into lines and computes, for every line, a *code
//! view*: the raw line with comment text and string-literal content replaced
//! by spaces. Quote characters are kept so a blanked literal still reads as
//! a single token.
//!
//! ## Invariant
//!
//! For every line, `code.len() == raw.len()` (bytes). A multi-byte character
//! inside a comment or literal becomes as many spaces as it has bytes.
//!
//! ## States
//!
//! | State | Enter | Leave |
//! |-------|-------|-------|
//! | `Code` | start | |
//! | `LineComment` | `//` | end of line |
//! | `BlockComment` | `/*` | `*/`, may span lines |
//! | `Str` | `"` | unescaped `"` or end of line |

/// Scanner state carried from one character to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Code,
    LineComment,
    BlockComment,
    Str,
}

/// One line of source with its raw text and code view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Raw text, without the line terminator.
    pub raw: &'a str,
    /// Raw text with comments and literal content blanked.
    pub code: String,
}

/// A whole file, scanned once.
#[derive(Debug, Clone)]
pub struct ScannedSource<'a> {
    lines: Vec<SourceLine<'a>>,
}

impl<'a> ScannedSource<'a> {
    /// Scan `text`. Lines are split on `\n`; a trailing `\r` is dropped.
    pub fn new(text: &'a str) -> Self {
        let mut state = LexState::Code;
        let lines = text
            .split('\n')
            .enumerate()
            .map(|(i, line)| {
                let raw = line.strip_suffix('\r').unwrap_or(line);
                let (code, next) = mask_line(raw, state);
                state = next;
                SourceLine {
                    number: i + 1,
                    raw,
                    code,
                }
            })
            .collect();
        Self { lines }
    }

    /// All lines in file order.
    pub fn lines(&self) -> &[SourceLine<'a>] {
        &self.lines
    }

    /// Line by 1-based number.
    pub fn line(&self, number: usize) -> Option<&SourceLine<'a>> {
        number.checked_sub(1).and_then(|i| self.lines.get(i))
    }

    /// Number of lines, counting a trailing empty line.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when there are no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn blank(out: &mut String, c: char) {
    for _ in 0..c.len_utf8() {
        out.push(' ');
    }
}

/// Mask one line starting in `state`; returns the code view and the state
/// the next line starts in.
fn mask_line(raw: &str, mut state: LexState) -> (String, LexState) {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            LexState::Code => match (c, chars.peek()) {
                ('/', Some('/')) => {
                    chars.next();
                    out.push_str("  ");
                    state = LexState::LineComment;
                }
                ('/', Some('*')) => {
                    chars.next();
                    out.push_str("  ");
                    state = LexState::BlockComment;
                }
                ('"', _) => {
                    out.push('"');
                    state = LexState::Str;
                }
                _ => out.push(c),
            },
            LexState::LineComment => blank(&mut out, c),
            LexState::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = LexState::Code;
                } else {
                    blank(&mut out, c);
                }
            }
            LexState::Str => match c {
                '\\' => {
                    blank(&mut out, c);
                    if let Some(escaped) = chars.next() {
                        blank(&mut out, escaped);
                    }
                }
                '"' => {
                    out.push('"');
                    state = LexState::Code;
                }
                _ => blank(&mut out, c),
            },
        }
    }

    let next = match state {
        LexState::LineComment | LexState::Str => LexState::Code,
        other => other,
    };
    (out, next)
}

/// Identifier byte: ASCII alphanumeric or underscore.
pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Byte offsets at which `word` occurs as a whole identifier.
pub fn word_positions<'t>(text: &'t str, word: &'t str) -> impl Iterator<Item = usize> + 't {
    let bytes = text.as_bytes();
    text.match_indices(word).map(|(i, _)| i).filter(move |&i| {
        let before = if i == 0 { None } else { Some(bytes[i - 1]) };
        let after = bytes.get(i + word.len()).copied();
        !before.is_some_and(is_ident_byte) && !after.is_some_and(is_ident_byte)
    })
}

/// True if `word` occurs in `text` as a whole identifier.
pub fn contains_word(text: &str, word: &str) -> bool {
    word_positions(text, word).next().is_some()
}

/// True if a call's argument list opens at byte offset `pos`: optional
/// whitespace, an optional explicit generic list such as `<Bytes<32>>`, then
/// `(`.
pub fn is_call_at(text: &str, pos: usize) -> bool {
    let mut cur = Cursor::new(text, pos);
    cur.skip_ws();
    if cur.peek() == Some(b'<') {
        if !cur.skip_generic_args() {
            return false;
        }
        cur.skip_ws();
    }
    cur.eat(b'(')
}

/// True if an empty argument list `( )` follows byte offset `pos`.
pub fn is_zero_arg_call_at(text: &str, pos: usize) -> bool {
    let mut cur = Cursor::new(text, pos);
    cur.skip_ws();
    if !cur.eat(b'(') {
        return false;
    }
    cur.skip_ws();
    cur.eat(b')')
}

/// Offsets of every call to `ident` (whole identifier followed by `(`).
pub fn call_positions<'t>(text: &'t str, ident: &'t str) -> impl Iterator<Item = usize> + 't {
    word_positions(text, ident).filter(move |&i| is_call_at(text, i + ident.len()))
}

/// Every identifier token in `text` with its byte offset. Tokens that start
/// with a digit (numeric literals) are included; callers filter.
pub fn identifiers(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let bytes = text.as_bytes();
    let mut i = 0;
    std::iter::from_fn(move || {
        while i < bytes.len() && !is_ident_byte(bytes[i]) {
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }
        let start = i;
        while i < bytes.len() && is_ident_byte(bytes[i]) {
            i += 1;
        }
        Some((start, &text[start..i]))
    })
}

/// Byte cursor for small structural matchers.
///
/// The position only ever advances over ASCII bytes or to the offset of an
/// ASCII byte, so slicing at it is always on a character boundary.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Cursor over `text` starting at byte offset `pos`.
    pub fn new(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Unconsumed remainder.
    pub fn rest(&self) -> &'a str {
        self.text.get(self.pos..).unwrap_or("")
    }

    /// Next byte, not consumed.
    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    /// Skip ASCII whitespace; returns how many bytes were skipped.
    pub fn skip_ws(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Consume `b` if it is next.
    pub fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `s` if the remainder starts with it.
    pub fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consume `word` if it is next and not followed by an identifier byte.
    pub fn eat_word(&mut self, word: &str) -> bool {
        let rest = self.rest();
        let boundary = !rest
            .as_bytes()
            .get(word.len())
            .copied()
            .is_some_and(is_ident_byte);
        if rest.starts_with(word) && boundary {
            self.pos += word.len();
            true
        } else {
            false
        }
    }

    /// Consume a run of identifier bytes (`\w+`).
    pub fn ident(&mut self) -> Option<&'a str> {
        let (text, start) = (self.text, self.pos);
        while self.peek().is_some_and(is_ident_byte) {
            self.pos += 1;
        }
        (self.pos > start).then(|| &text[start..self.pos])
    }

    /// Consume a run of ASCII digits and parse it.
    pub fn number(&mut self) -> Option<u64> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        self.text[start..self.pos].parse().ok()
    }

    /// Consume a balanced `<…>` list. Fails without a usable position if the
    /// list is unbalanced or crosses a statement, call, or logical operator.
    pub fn skip_generic_args(&mut self) -> bool {
        if !self.eat(b'<') {
            return false;
        }
        let mut depth = 1usize;
        while let Some(b) = self.peek() {
            match b {
                b'<' => depth += 1,
                b'>' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return true;
                    }
                }
                b'(' | b')' | b'{' | b'}' | b';' | b'=' | b'&' | b'|' => return false,
                _ => {}
            }
            self.pos += 1;
        }
        false
    }

    /// Advance to the next occurrence of `b` (not consumed) or to the end;
    /// returns the skipped text.
    pub fn take_until(&mut self, b: u8) -> &'a str {
        let rest = self.rest();
        let len = rest.bytes().position(|x| x == b).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The code view never changes a line's byte length.
        #[test]
        fn code_view_preserves_byte_length(text in r#"[a-z{}/*"\\ \n\tü]{0,200}"#) {
            let src = ScannedSource::new(&text);
            for line in src.lines() {
                prop_assert_eq!(line.code.len(), line.raw.len());
            }
        }

        /// One scanned line per `\n`-separated segment.
        #[test]
        fn line_count_matches_split(text in r#"[a-z{}/*"\n]{0,200}"#) {
            let src = ScannedSource::new(&text);
            prop_assert_eq!(src.len(), text.split('\n').count());
        }

        /// Text without comment or string markers passes through unchanged.
        #[test]
        fn marker_free_text_is_identity(text in "[a-zA-Z0-9_{}()<>;:=. \n]{0,200}") {
            let src = ScannedSource::new(&text);
            for line in src.lines() {
                prop_assert_eq!(line.code.as_str(), line.raw);
            }
        }
    }
}
