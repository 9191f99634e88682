//! Document symbols: one flat entry per shape line.

use crate::position::utf16_col;
use sd_core::{Line, TextBuffer};
use tower_lsp::lsp_types::*;

/// Shape lines as `SymbolInformation`, numbered in z-order.
#[allow(deprecated)] // SymbolInformation::deprecated is deprecated but required
pub fn compute_symbols(uri: &Url, text: &str) -> Vec<SymbolInformation> {
    let buffer = TextBuffer::from_text(text);
    let mut ordinal = 0;
    let mut symbols = Vec::new();

    for (i, line) in buffer.lines().iter().enumerate() {
        let Line::Shape(record) = line else {
            continue;
        };
        ordinal += 1;
        let source = buffer.line_text(i).unwrap_or("");
        symbols.push(SymbolInformation {
            name: format!("{} {}", record.kind, ordinal),
            kind: SymbolKind::OBJECT,
            location: Location {
                uri: uri.clone(),
                range: Range {
                    start: Position::new(i as u32, 0),
                    end: Position::new(i as u32, utf16_col(source, usize::MAX)),
                },
            },
            tags: None,
            deprecated: None,
            container_name: Some(format!("{} / {}", record.outline, record.fill)),
        });
    }

    symbols
}
