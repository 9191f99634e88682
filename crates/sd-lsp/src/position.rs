//! Column conversion between `sd-core` character columns and LSP UTF-16
//! code units.

use tower_lsp::lsp_types::{Position, Range};

/// Source text of line `index`, without the line terminator.
pub fn line_at(text: &str, index: usize) -> Option<&str> {
    text.split('\n').nth(index)
}

/// UTF-16 column of the character at `char_col` in `line`.
pub fn utf16_col(line: &str, char_col: usize) -> u32 {
    line.chars()
        .take(char_col)
        .map(|c| c.len_utf16() as u32)
        .sum()
}

/// Character column containing UTF-16 column `col`.
pub fn char_col(line: &str, col: u32) -> usize {
    let mut units = 0u32;
    for (i, c) in line.chars().enumerate() {
        units += c.len_utf16() as u32;
        if units > col {
            return i;
        }
    }
    line.chars().count()
}

/// LSP range for character columns `start..end` on line `index`.
pub fn char_range(line: &str, index: usize, start: usize, end: usize) -> Range {
    Range {
        start: Position::new(index as u32, utf16_col(line, start)),
        end: Position::new(index as u32, utf16_col(line, end)),
    }
}

/// Range covering the whole document.
pub fn full_range(text: &str) -> Range {
    let last = text.split('\n').count().saturating_sub(1);
    let last_line = line_at(text, last).unwrap_or("");
    Range {
        start: Position::new(0, 0),
        end: Position::new(last as u32, utf16_col(last_line, usize::MAX)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ascii_columns_are_identity() {
        assert_eq!(utf16_col("oval <0 0 1 1>", 5), 5);
        assert_eq!(char_col("oval <0 0 1 1>", 5), 5);
    }

    #[test]
    fn astral_characters_take_two_units() {
        let line = "🎨 oval";
        assert_eq!(utf16_col(line, 1), 2);
        assert_eq!(utf16_col(line, 2), 3);
        assert_eq!(char_col(line, 0), 0);
        assert_eq!(char_col(line, 1), 0);
        assert_eq!(char_col(line, 3), 2);
        assert_eq!(char_col(line, 99), 6);
    }

    #[test]
    fn full_range_ends_after_last_line() {
        let range = full_range("a\nbc\n");
        assert_eq!(range.end, Position::new(2, 0));
        let range = full_range("a\nbcé");
        assert_eq!(range.end, Position::new(1, 3));
    }
}
