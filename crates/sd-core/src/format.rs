//! Formatting: rewrite shape lines into canonical form.
//!
//! Used by the language server's `textDocument/formatting` handler and the
//! `sd-lsp --format` CLI mode.

use crate::emitter::serialize;
use crate::parser::parse;

/// Canonical form of a single line, or `None` if it is not a shape line.
#[must_use]
pub fn canonicalize(line: &str) -> Option<String> {
    parse(line).map(|record| serialize(&record))
}

/// Canonicalize every shape line; raw and blank lines are left untouched.
///
/// Line count and order are preserved, and the output is idempotent:
/// `format_text(&format_text(s)) == format_text(s)`.
#[must_use]
pub fn format_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match canonicalize(line) {
            Some(canonical) => out.push_str(&canonical),
            None => out.push_str(line),
        }
    }
    out
}
