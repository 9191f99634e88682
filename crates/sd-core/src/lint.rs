//! Line diagnostics for SD documents.
//!
//! Reports problems without modifying the text. Results feed into
//! `textDocument/publishDiagnostics` in the language server. Only
//! `LintSeverity::Error` findings correspond to invalid (raw) lines;
//! warnings and infos are attached to lines that still parse.

use crate::color::ColorResolver;
use crate::model::ColorToken;
use crate::parser::{LineError, parse_line};

// ─── Diagnostic types ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// The line is not a shape line.
    Error,
    /// The line parses but will not render as written.
    Warning,
    /// Style suggestion.
    Info,
}

/// A single finding on one line. Columns count characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiagnostic {
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "grammar", "unknown-color").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run every rule over every line of `text`.
#[must_use]
pub fn lint_text(text: &str, resolver: &ColorResolver) -> Vec<LineDiagnostic> {
    let mut diags = Vec::new();
    for (index, line) in text.split('\n').enumerate() {
        lint_line(index, line, resolver, &mut diags);
    }
    diags
}

fn lint_line(index: usize, line: &str, resolver: &ColorResolver, diags: &mut Vec<LineDiagnostic>) {
    let record = match parse_line(line) {
        Ok(record) => record,
        Err(LineError::Blank) => return,
        Err(err) => {
            let len = line.chars().count();
            let start = err.column().unwrap_or(0).min(len);
            diags.push(LineDiagnostic {
                line: index,
                start,
                end: len.max(start + 1),
                message: err.to_string(),
                severity: LintSeverity::Error,
                rule: "grammar",
            });
            return;
        }
    };

    let (outline_at, fill_at) = color_columns(line, &record.outline, &record.fill);
    for (token, start, role) in [
        (&record.outline, outline_at, "outline"),
        (&record.fill, fill_at, "fill"),
    ] {
        if !resolver.is_known(token) {
            diags.push(LineDiagnostic {
                line: index,
                start,
                end: start + token.as_str().chars().count(),
                message: format!(
                    "Unknown {role} color `{token}`; it will render as {}.",
                    resolver.fallback.to_hex()
                ),
                severity: LintSeverity::Warning,
                rule: "unknown-color",
            });
        }
    }

    if !record.bounds.is_normalized() {
        diags.push(LineDiagnostic {
            line: index,
            start: 0,
            end: line.trim_end().chars().count(),
            message: "Corners are not ordered min→max; the box is drawn normalized.".to_string(),
            severity: LintSeverity::Info,
            rule: "inverted-bounds",
        });
    }
}

/// Character columns of the outline and fill tokens in a line that parsed.
///
/// The two color tokens are always the last two tokens of a shape line.
fn color_columns(line: &str, outline: &ColorToken, fill: &ColorToken) -> (usize, usize) {
    let trimmed = line.trim_end();
    let fill_byte = trimmed.len() - fill.as_str().len();
    let before_fill = trimmed[..fill_byte].trim_end();
    let outline_byte = before_fill.len() - outline.as_str().len();
    (
        line[..outline_byte].chars().count(),
        line[..fill_byte].chars().count(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rules(diags: &[LineDiagnostic]) -> Vec<(usize, &'static str)> {
        diags.iter().map(|d| (d.line, d.rule)).collect()
    }

    #[test]
    fn clean_document_has_no_findings() {
        let text = "oval <0 0 10 10> 1 black white\n\noval <1 1 2 2> 3 #f00 #00ff00";
        assert!(lint_text(text, &ColorResolver::default()).is_empty());
    }

    #[test]
    fn grammar_errors_point_at_the_failure() {
        let diags = lint_text("ok\noval <0 x 1 1> 1 a b", &ColorResolver::default());
        assert_eq!(rules(&diags), vec![(0, "grammar"), (1, "grammar")]);
        assert_eq!(diags[1].start, 8);
        assert_eq!(diags[1].end, 20);
        assert_eq!(diags[1].severity, LintSeverity::Error);
    }

    #[test]
    fn unknown_colors_are_warnings_with_token_ranges() {
        let line = "oval <0 0 10 10> 1 notacolor red";
        let diags = lint_text(line, &ColorResolver::default());
        assert_eq!(rules(&diags), vec![(0, "unknown-color")]);
        let d = &diags[0];
        assert_eq!(d.severity, LintSeverity::Warning);
        assert_eq!(&line[d.start..d.end], "notacolor");
        assert!(d.message.contains("#000000"));
    }

    #[test]
    fn same_token_twice_reports_both_positions() {
        let line = "oval <0 0 1 1> 1 zz zz\r";
        let diags = lint_text(line, &ColorResolver::default());
        assert_eq!(diags.len(), 2);
        assert_eq!((diags[0].start, diags[0].end), (17, 19));
        assert_eq!((diags[1].start, diags[1].end), (20, 22));
    }

    #[test]
    fn stray_whitespace_is_a_grammar_error() {
        let text = "oval <0 0 1 1> 1 black white\n   \n oval <0 0 1 1> 1 black white\n";
        let diags = lint_text(text, &ColorResolver::default());
        assert_eq!(rules(&diags), vec![(1, "grammar"), (2, "grammar")]);
        assert_eq!((diags[0].start, diags[0].end), (0, 3));
        assert_eq!(diags[1].start, 0);
    }

    #[test]
    fn inverted_bounds_are_info() {
        let diags = lint_text("oval <10 10 0 0> 1 black white", &ColorResolver::default());
        assert_eq!(rules(&diags), vec![(0, "inverted-bounds")]);
        assert_eq!(diags[0].severity, LintSeverity::Info);
    }
}
