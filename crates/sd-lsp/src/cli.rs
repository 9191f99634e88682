//! One-shot CLI modes: `sd-lsp --format` and `sd-lsp --check`.
//!
//! Both read a document from stdin, so editors and scripts can use them
//! without a full LSP handshake.

use sd_core::{ColorResolver, LintSeverity, format_text, lint_text};
use std::io::Read;

pub enum Mode {
    Format,
    Check,
}

impl Mode {
    pub fn from_arg(arg: Option<&str>) -> Option<Self> {
        match arg {
            Some("--format") => Some(Mode::Format),
            Some("--check") => Some(Mode::Check),
            _ => None,
        }
    }
}

/// Run `mode` against stdin and return the process exit code.
pub fn run(mode: Mode) -> i32 {
    let mut text = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut text) {
        eprintln!("sd-lsp: failed to read stdin: {e}");
        return 2;
    }
    match mode {
        Mode::Format => {
            print!("{}", format_text(&text));
            0
        }
        Mode::Check => {
            let (report, ok) = check_report(&text, &ColorResolver::default());
            print!("{report}");
            if ok { 0 } else { 1 }
        }
    }
}

/// One `line:col: severity[rule]: message` row per finding (1-based), and
/// whether the document has no invalid lines.
pub fn check_report(text: &str, resolver: &ColorResolver) -> (String, bool) {
    let diags = lint_text(text, resolver);
    let mut report = String::new();
    for d in &diags {
        let severity = match d.severity {
            LintSeverity::Error => "error",
            LintSeverity::Warning => "warning",
            LintSeverity::Info => "info",
        };
        report.push_str(&format!(
            "{}:{}: {severity}[{}]: {}\n",
            d.line + 1,
            d.start + 1,
            d.rule,
            d.message
        ));
    }
    let ok = diags.iter().all(|d| d.severity != LintSeverity::Error);
    (report, ok)
}
