//! Formatting: canonicalize shape lines as a single whole-document edit.

use crate::position::full_range;
use sd_core::format_text;
use tower_lsp::lsp_types::TextEdit;

/// Edits that bring `text` into canonical form. Empty when it already is.
pub fn compute_formatting(text: &str) -> Vec<TextEdit> {
    let formatted = format_text(text);
    if formatted == text {
        return Vec::new();
    }
    vec![TextEdit {
        range: full_range(text),
        new_text: formatted,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tower_lsp::lsp_types::Position;

    #[test]
    fn canonical_text_needs_no_edits() {
        assert!(compute_formatting("oval <0 0 1 1> 1 black white\n").is_empty());
    }

    #[test]
    fn replaces_whole_document() {
        let edits = compute_formatting("oval < 0 0 1.0 1 >  1 black white\nbad line");
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].range.start, Position::new(0, 0));
        assert_eq!(edits[0].range.end, Position::new(1, 8));
        assert_eq!(edits[0].new_text, "oval <0 0 1 1> 1 black white\nbad line");
    }
}
