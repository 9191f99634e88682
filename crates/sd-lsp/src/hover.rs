//! Hover: show contextual information on hover.

use crate::position::{char_col, line_at};
use sd_core::{ColorResolver, ColorToken, ShapeRecord, parse, resolve_color};
use tower_lsp::lsp_types::*;

/// Compute hover information at the given position.
///
/// Only shape lines have hovers:
/// - the kind keyword shows the box and thickness;
/// - a color token shows the color it resolves to, or the fallback.
pub fn compute_hover(text: &str, pos: Position, resolver: &ColorResolver) -> Option<Hover> {
    let line = line_at(text, pos.line as usize)?;
    let record = parse(line)?;
    let word = extract_word_at(line, char_col(line, pos.character));

    if word.is_empty() {
        return None;
    }
    if word == record.kind.keyword() && is_first_word(line, word) {
        return Some(make_hover(&describe_shape(&record)));
    }
    if word == record.outline.as_str() || word == record.fill.as_str() {
        return Some(make_hover(&describe_color(
            &ColorToken::new(word),
            resolver,
        )));
    }
    None
}

/// Extract the word at a given character column in a line.
fn extract_word_at(line: &str, col: usize) -> &str {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let col = col.min(chars.len());

    let start = (0..col)
        .rev()
        .find(|&i| !is_word_char(chars[i].1))
        .map(|i| i + 1)
        .unwrap_or(0);
    let end = (col..chars.len())
        .find(|&i| !is_word_char(chars[i].1))
        .unwrap_or(chars.len());

    let byte = |i: usize| chars.get(i).map_or(line.len(), |&(b, _)| b);
    &line[byte(start)..byte(end)]
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '#'
}

fn is_first_word(line: &str, word: &str) -> bool {
    line.starts_with(word)
}

fn describe_shape(record: &ShapeRecord) -> String {
    let b = record.bounds.normalized();
    format!(
        "**{}** at ({}, {}), {} × {}\n\nOutline thickness: {}",
        record.kind,
        b.x0,
        b.y0,
        b.width(),
        b.height(),
        record.thickness
    )
}

fn describe_color(token: &ColorToken, resolver: &ColorResolver) -> String {
    match resolve_color(token.as_str()) {
        Some(color) => format!("`{token}` → `{}`", color.to_hex()),
        None => format!(
            "`{token}` is not a known color.\n\nRenders as `{}`.",
            resolver.fallback.to_hex()
        ),
    }
}

fn make_hover(content: &str) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: content.to_string(),
        }),
        range: None,
    }
}
