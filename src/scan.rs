//! Shared low-level scanner for the literal grammars.
//!
//! Array (`{}`), composite (`()`), and range (`[] ()`) literals all share one
//! token rule: an item is either an unquoted run of characters that excludes
//! the context's structural characters, or a double-quote delimited token in
//! which a backslash escapes the following character. Unquoted runs are
//! trimmed of edge whitespace; interior whitespace is preserved. The three
//! codecs drive this scanner with different [`TokenRules`]:
//!
//! - arrays recognize the case-insensitive unquoted `NULL` sentinel
//! - composites and ranges do not (an empty composite item is the null
//!   sentinel, an empty range bound means unbounded)
//!
//! A quoted token takes every character verbatim, which is how the true
//! string `"NULL"` is distinguished from the null sentinel.

use crate::{Error, Result};

/// Scanning rules for one structural context.
///
/// `stops` are the characters that terminate an unquoted run (the item
/// separator plus the context's closing characters); `null_word` controls
/// whether a bare case-insensitive `NULL` is the null sentinel.
#[derive(Clone, Copy, Debug)]
pub struct TokenRules {
    pub stops: &'static [char],
    /// Structural opening character that may not appear mid-token (arrays
    /// only; a `{` inside an array element means misplaced nesting).
    pub open: Option<char>,
    pub null_word: bool,
}

/// Rules for array element text: items end at `,` or `}`, bare `NULL` is the
/// null sentinel.
pub const ARRAY_RULES: TokenRules = TokenRules {
    stops: &[',', '}'],
    open: Some('{'),
    null_word: true,
};

/// Rules for composite field text: items end at `,` or `)`, there is no null
/// keyword (only the empty item is null).
pub const COMPOSITE_RULES: TokenRules = TokenRules {
    stops: &[',', ')'],
    open: None,
    null_word: false,
};

/// Rules for range bound text: bounds end at `,`, `]`, or `)`, and absence of
/// text means unbounded rather than null.
pub const RANGE_RULES: TokenRules = TokenRules {
    stops: &[',', ']', ')'],
    open: None,
    null_word: false,
};

/// One scanned item, before element decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawToken {
    /// The unquoted `NULL` sentinel (only in contexts with `null_word`).
    Null,
    /// No characters before the stop character.
    Empty,
    /// An unquoted run, edge whitespace trimmed. Never empty.
    Unquoted(String),
    /// A double-quoted token, escapes resolved. May be empty.
    Quoted(String),
}

impl RawToken {
    /// Collapses the token to `Option<String>` under array rules, where both
    /// the sentinel and an empty unquoted item are impossible leaf text.
    pub fn into_text(self) -> Option<String> {
        match self {
            RawToken::Null | RawToken::Empty => None,
            RawToken::Unquoted(s) | RawToken::Quoted(s) => Some(s),
        }
    }
}

/// A cursor over literal text, tracking the current byte offset for error
/// reporting.
#[derive(Clone, Debug)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Current byte offset into the input.
    #[inline]
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
    }

    /// Consumes `ch` if it is next, returning whether it was consumed.
    pub fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes `word` case-insensitively if it is next.
    pub fn eat_ci(&mut self, word: &str) -> bool {
        let end = self.pos + word.len();
        if end <= self.input.len()
            && self.input.is_char_boundary(end)
            && self.input[self.pos..end].eq_ignore_ascii_case(word)
        {
            self.pos = end;
            true
        } else {
            false
        }
    }

    /// Consumes `ch` or fails with a syntax error at the current offset.
    pub fn expect(&mut self, ch: char) -> Result<()> {
        if self.eat(ch) {
            Ok(())
        } else {
            Err(Error::syntax(self.pos, format!("expected '{ch}'")))
        }
    }

    /// Fails unless only whitespace remains.
    pub fn expect_end(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.at_end() {
            Ok(())
        } else {
            Err(Error::syntax(self.pos, "unexpected trailing characters"))
        }
    }

    /// Parses a signed decimal integer (for bounds decoration).
    pub fn scan_int(&mut self) -> Result<i64> {
        let start = self.pos;
        self.eat('-');
        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
            self.bump();
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| Error::syntax(start, "expected an integer"))
    }

    /// Scans one item under the given rules, leaving the stop character
    /// unconsumed.
    ///
    /// Leading and trailing whitespace around the item is skipped. A quoted
    /// item must be followed (modulo whitespace) by a stop character or end
    /// of input; an unquoted item must not contain a quote or backslash.
    pub fn scan_token(&mut self, rules: &TokenRules) -> Result<RawToken> {
        self.skip_whitespace();
        if self.peek() == Some('"') {
            let token = self.scan_quoted()?;
            self.skip_whitespace();
            match self.peek() {
                None => Ok(RawToken::Quoted(token)),
                Some(ch) if rules.stops.contains(&ch) => Ok(RawToken::Quoted(token)),
                Some(ch) => Err(Error::syntax(
                    self.pos,
                    format!("unexpected '{ch}' after quoted token"),
                )),
            }
        } else {
            self.scan_unquoted(rules)
        }
    }

    fn scan_quoted(&mut self) -> Result<String> {
        debug_assert_eq!(self.peek(), Some('"'));
        self.bump();
        let mut token = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(token),
                Some('\\') => match self.bump() {
                    // A backslash escapes whatever follows; `\"` and `\\` are
                    // the two escapes the serializer ever emits.
                    Some(ch) => token.push(ch),
                    None => {
                        return Err(Error::syntax(self.pos, "unterminated quoted token"));
                    }
                },
                Some(ch) => token.push(ch),
                None => return Err(Error::syntax(self.pos, "unterminated quoted token")),
            }
        }
    }

    fn scan_unquoted(&mut self, rules: &TokenRules) -> Result<RawToken> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if rules.stops.contains(&ch) {
                break;
            }
            if ch == '"' || ch == '\\' || Some(ch) == rules.open {
                return Err(Error::syntax(
                    self.pos,
                    format!("unexpected '{ch}' in unquoted token"),
                ));
            }
            self.bump();
        }
        let token = self.input[start..self.pos].trim();
        if token.is_empty() {
            Ok(RawToken::Empty)
        } else if rules.null_word && token.eq_ignore_ascii_case("NULL") {
            Ok(RawToken::Null)
        } else {
            Ok(RawToken::Unquoted(token.to_string()))
        }
    }
}

/// Returns whether serialized leaf text must be quoted in a context with the
/// given special characters.
///
/// Quoting is required for empty text, text containing a special character, a
/// quote, a backslash, or edge whitespace, and for text spelling a reserved
/// word of the context (`NULL` in arrays, `empty` in ranges).
pub(crate) fn needs_quoting(text: &str, specials: &[char], reserved: &[&str]) -> bool {
    text.is_empty()
        || text.starts_with(char::is_whitespace)
        || text.ends_with(char::is_whitespace)
        || text.chars().any(|ch| {
            ch == '"' || ch == '\\' || specials.contains(&ch)
        })
        || reserved.iter().any(|word| text.eq_ignore_ascii_case(word))
}

/// Appends `text` as a quoted token, doubling every backslash and escaping
/// every quote.
pub(crate) fn quote_into(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_one(input: &str, rules: &TokenRules) -> RawToken {
        Scanner::new(input).scan_token(rules).unwrap()
    }

    #[test]
    fn test_unquoted_token_trims_edges() {
        assert_eq!(
            scan_one("  a b  ,", &ARRAY_RULES),
            RawToken::Unquoted("a b".to_string())
        );
    }

    #[test]
    fn test_null_sentinel_case_insensitive() {
        assert_eq!(scan_one("null}", &ARRAY_RULES), RawToken::Null);
        assert_eq!(scan_one("NuLl,", &ARRAY_RULES), RawToken::Null);
        assert_eq!(
            scan_one("NULL,", &COMPOSITE_RULES),
            RawToken::Unquoted("NULL".to_string())
        );
    }

    #[test]
    fn test_quoted_null_is_text() {
        assert_eq!(
            scan_one("\"NULL\"}", &ARRAY_RULES),
            RawToken::Quoted("NULL".to_string())
        );
    }

    #[test]
    fn test_quoted_escapes() {
        assert_eq!(
            scan_one(r#""a\"b\\c","#, &ARRAY_RULES),
            RawToken::Quoted(r#"a"b\c"#.to_string())
        );
    }

    #[test]
    fn test_unterminated_quote() {
        let err = Scanner::new("\"abc").scan_token(&ARRAY_RULES).unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }));
    }

    #[test]
    fn test_empty_item() {
        assert_eq!(scan_one(",", &COMPOSITE_RULES), RawToken::Empty);
        assert_eq!(scan_one("  )", &COMPOSITE_RULES), RawToken::Empty);
    }

    #[test]
    fn test_quoted_empty_is_not_empty_item() {
        assert_eq!(
            scan_one("\"\")", &COMPOSITE_RULES),
            RawToken::Quoted(String::new())
        );
    }

    #[test]
    fn test_bare_backslash_rejected() {
        let err = Scanner::new(r"a\b,").scan_token(&ARRAY_RULES).unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }));
    }

    #[test]
    fn test_scan_int() {
        let mut s = Scanner::new("-42]");
        assert_eq!(s.scan_int().unwrap(), -42);
        assert_eq!(s.peek(), Some(']'));
        assert!(Scanner::new("x").scan_int().is_err());
    }

    #[test]
    fn test_needs_quoting() {
        assert!(needs_quoting("", &['{', '}', ','], &["NULL"]));
        assert!(needs_quoting("a,b", &['{', '}', ','], &["NULL"]));
        assert!(needs_quoting(" a", &['{', '}', ','], &["NULL"]));
        assert!(needs_quoting("null", &['{', '}', ','], &["NULL"]));
        assert!(needs_quoting("a\"b", &[], &[]));
        assert!(!needs_quoting("a b", &['{', '}', ','], &["NULL"]));
        assert!(!needs_quoting("plain", &['{', '}', ','], &["NULL"]));
    }

    #[test]
    fn test_quote_into() {
        let mut out = String::new();
        quote_into(&mut out, r#"a"b\c"#);
        assert_eq!(out, r#""a\"b\\c""#);
    }
}
