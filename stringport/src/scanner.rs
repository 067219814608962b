//! Line-oriented, quote-aware scanning.
//!
//! Two modes share this module:
//!
//! - table-entry mode ([`parse_table_line`]) pulls `key`/`value` out of an
//!   Android `<string name="key">value</string>` line;
//! - literal-scan mode ([`LiteralScanner`]) finds Objective-C `@"..."`
//!   literals and classifies them for the rewrite engine.
//!
//! Neither mode is a lexer. Both work on a single line and never look past it.

const BEGIN_TAG: &str = "<string name=\"";
const KEY_END: &str = "\">";
const END_TAG: &str = "</string>";
const LITERAL_OPEN: &str = "@\"";

/// Extracts `(key, value)` from one table line.
///
/// Returns `None` for any line lacking the begin tag, the `">` after it, or the
/// end tag after that. The value is returned raw (no unescaping).
pub fn parse_table_line(line: &str) -> Option<(&str, &str)> {
    let begin = line.find(BEGIN_TAG)?;
    let key_start = begin + BEGIN_TAG.len();
    let key_end = key_start + line[key_start..].find(KEY_END)?;
    let value_start = key_end + KEY_END.len();
    let value_end = value_start + line[value_start..].find(END_TAG)?;
    Some((&line[key_start..key_end], &line[value_start..value_end]))
}

/// How a scanned literal may be treated by the rewrite engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    /// The text between the write cursor and the literal already calls the
    /// lookup function.
    AlreadyLocalized,
    /// Too short or too generic to map back to a key (`@"x"`, `@"%s"`).
    Trivial,
    /// Part of a `static`/`const` declaration; a runtime call cannot go there.
    StorageQualified,
    /// Eligible for lookup and rewriting.
    Candidate,
}

/// One `@"..."` occurrence within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal<'a> {
    /// Byte offset of the `@`.
    pub start: usize,
    /// Byte offset just past the closing quote.
    pub end: usize,
    /// Text between the quotes, escapes untouched.
    pub value: &'a str,
    pub kind: LiteralKind,
}

/// Finds and classifies string literals in a source line.
///
/// `from` is where the search starts; `cursor` is the rewrite engine's write
/// position, used as the left edge of the "already localized" and storage
/// qualifier checks.
pub trait LiteralScanner {
    fn next_literal<'a>(&self, line: &'a str, from: usize, cursor: usize) -> Option<Literal<'a>>;
}

/// Delimiter-based scanner for Objective-C `@"..."` literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicScanner {
    localize_function: String,
    storage_qualifiers: Vec<String>,
}

impl HeuristicScanner {
    pub fn new(localize_function: impl Into<String>, storage_qualifiers: Vec<String>) -> Self {
        Self {
            localize_function: localize_function.into(),
            storage_qualifiers,
        }
    }

    fn classify(&self, preceding: &str, value: &str) -> LiteralKind {
        if preceding.contains(self.localize_function.as_str()) {
            LiteralKind::AlreadyLocalized
        } else if value.chars().count() <= 1 || value == "%s" {
            LiteralKind::Trivial
        } else if self
            .storage_qualifiers
            .iter()
            .any(|q| preceding.contains(q.as_str()))
        {
            LiteralKind::StorageQualified
        } else {
            LiteralKind::Candidate
        }
    }
}

impl Default for HeuristicScanner {
    fn default() -> Self {
        Self::new(
            "NSLocalizedString",
            vec!["const".to_string(), "static".to_string()],
        )
    }
}

impl LiteralScanner for HeuristicScanner {
    fn next_literal<'a>(&self, line: &'a str, from: usize, cursor: usize) -> Option<Literal<'a>> {
        if from >= line.len() {
            return None;
        }
        let start = from + line[from..].find(LITERAL_OPEN)?;
        let value_start = start + LITERAL_OPEN.len();
        let close = find_closing_quote(line, value_start)?;
        let value = &line[value_start..close];
        let preceding = line.get(cursor.min(start)..start).unwrap_or("");
        Some(Literal {
            start,
            end: close + 1,
            value,
            kind: self.classify(preceding, value),
        })
    }
}

/// Byte offset of the first `"` at or after `from` that is not escaped by an
/// odd run of backslashes.
fn find_closing_quote(line: &str, from: usize) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut backslashes = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match b {
            b'\\' => backslashes += 1,
            b'"' if backslashes % 2 == 0 => return Some(i),
            _ => backslashes = 0,
        }
    }
    None
}
