//! Rewriting of hardcoded Objective-C literals into lookup calls.

use crate::{
    index::{Diagnostic, StringIndex},
    options::MigrationOptions,
    scanner::{HeuristicScanner, LiteralKind, LiteralScanner},
};

/// A literal that was replaced by a lookup call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedLiteral {
    pub key: String,
    pub value: String,
}

/// Result of rewriting one file's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    /// New file text; `None` when no line changed.
    pub content: Option<String>,
    /// Every replaced literal, in file order.
    pub localized: Vec<LocalizedLiteral>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Rewrite {
    pub fn is_changed(&self) -> bool {
        self.content.is_some()
    }
}

/// Line-by-line literal rewriter backed by a [`StringIndex`].
pub struct RewriteEngine<'a, S = HeuristicScanner> {
    index: &'a StringIndex,
    scanner: S,
    localize_function: String,
    ignored_line_markers: Vec<String>,
    line_comment_marker: String,
}

impl<'a> RewriteEngine<'a, HeuristicScanner> {
    pub fn new(index: &'a StringIndex, options: &MigrationOptions) -> Self {
        let scanner = HeuristicScanner::new(
            options.localize_function.clone(),
            options.storage_qualifiers.clone(),
        );
        Self::with_scanner(index, options, scanner)
    }
}

impl<'a, S: LiteralScanner> RewriteEngine<'a, S> {
    pub fn with_scanner(index: &'a StringIndex, options: &MigrationOptions, scanner: S) -> Self {
        Self {
            index,
            scanner,
            localize_function: options.localize_function.clone(),
            ignored_line_markers: options.ignored_line_markers.clone(),
            line_comment_marker: options.line_comment_marker.clone(),
        }
    }

    /// Rewrites the text of one source file.
    ///
    /// `file` only labels diagnostics. Every output line ends with `\n`.
    pub fn rewrite(&self, text: &str, file: &str) -> Rewrite {
        let mut out = String::with_capacity(text.len() + 256);
        let mut rewrite = Rewrite::default();
        let mut changed = false;

        for line in text.lines() {
            match self.rewrite_line(line, file, &mut rewrite) {
                Some(new_line) => {
                    out.push_str(&new_line);
                    changed = true;
                }
                None => out.push_str(line),
            }
            out.push('\n');
        }

        if changed {
            rewrite.content = Some(out);
        }
        rewrite
    }

    fn is_ignored(&self, line: &str) -> bool {
        (!self.line_comment_marker.is_empty()
            && line.trim_start().starts_with(&self.line_comment_marker))
            || self
                .ignored_line_markers
                .iter()
                .any(|m| line.contains(m.as_str()))
    }

    // Returns the rewritten line, or `None` when nothing on it was replaced.
    fn rewrite_line(&self, line: &str, file: &str, rewrite: &mut Rewrite) -> Option<String> {
        if self.is_ignored(line) {
            return None;
        }

        let mut new_line: Option<String> = None;
        let mut cursor = 0;
        let mut from = 0;
        while let Some(literal) = self.scanner.next_literal(line, from, cursor) {
            from = literal.end;
            match literal.kind {
                LiteralKind::AlreadyLocalized | LiteralKind::Trivial => {}
                LiteralKind::StorageQualified => {
                    if let Some(key) = self.index.find_key_for_value(literal.value) {
                        tracing::debug!(key, file, line, "can't localize static string");
                        rewrite.diagnostics.push(Diagnostic::UnrewritableLiteral {
                            key: key.to_string(),
                            file: file.to_string(),
                            line: line.to_string(),
                        });
                    }
                }
                LiteralKind::Candidate => {
                    let Some(key) = self.index.find_key_for_value(literal.value) else {
                        continue;
                    };
                    let buf = new_line.get_or_insert_with(String::new);
                    buf.push_str(&line[cursor..literal.start]);
                    buf.push_str(&format!(
                        "{}(@\"{}\", @\"{}\")",
                        self.localize_function, key, literal.value
                    ));
                    cursor = literal.end;
                    rewrite.localized.push(LocalizedLiteral {
                        key: key.to_string(),
                        value: literal.value.to_string(),
                    });
                }
            }
        }

        new_line.map(|mut buf| {
            buf.push_str(&line[cursor..]);
            buf
        })
    }
}
