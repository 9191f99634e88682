//! Diagnostics: lint SD text → LSP diagnostics.

use crate::position::{char_range, line_at};
use sd_core::{ColorResolver, LineDiagnostic, LintSeverity, lint_text};
use tower_lsp::lsp_types::*;

/// Compute diagnostics for every line of the document.
///
/// An empty result clears previously published diagnostics.
pub fn compute_diagnostics(text: &str, resolver: &ColorResolver) -> Vec<Diagnostic> {
    lint_text(text, resolver)
        .into_iter()
        .map(|d| to_lsp(text, d))
        .collect()
}

fn to_lsp(text: &str, diag: LineDiagnostic) -> Diagnostic {
    let line = line_at(text, diag.line).unwrap_or("");
    Diagnostic {
        range: char_range(line, diag.line, diag.start, diag.end),
        severity: Some(match diag.severity {
            LintSeverity::Error => DiagnosticSeverity::ERROR,
            LintSeverity::Warning => DiagnosticSeverity::WARNING,
            LintSeverity::Info => DiagnosticSeverity::INFORMATION,
        }),
        code: Some(NumberOrString::String(diag.rule.to_string())),
        source: Some("sd-lsp".to_string()),
        message: diag.message,
        ..Default::default()
    }
}
