//! Text buffer model: the document text split into independently
//! validated lines.
//!
//! The buffer is always rebuilt wholesale from a full text. Each line is
//! parsed on its own, so one malformed line never affects its neighbours.

use crate::emitter::emit_lines;
use crate::model::ShapeRecord;
use crate::parser::{LineError, parse_line};
use serde::Serialize;

/// One line of the buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// Parsed successfully.
    Shape(ShapeRecord),
    /// Failed to parse. Kept verbatim and flagged.
    Raw(String),
    /// Empty. Neither a shape nor an error.
    Blank,
}

impl Line {
    pub fn classify(text: &str) -> Self {
        match parse_line(text) {
            Ok(record) => Line::Shape(record),
            Err(LineError::Blank) => Line::Blank,
            Err(_) => Line::Raw(text.to_string()),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Line::Raw(_))
    }
}

/// A text region to flag as invalid: zero-based line, character columns
/// `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineRange {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBuffer {
    text: String,
    lines: Vec<Line>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::from_text("")
    }
}

impl TextBuffer {
    /// Parse every line of `text`.
    pub fn from_text(text: &str) -> Self {
        let lines = text.split('\n').map(Line::classify).collect();
        Self {
            text: text.to_string(),
            lines,
        }
    }

    /// Build a buffer whose shape lines come first, followed by raw lines.
    ///
    /// The joined text is re-validated line by line, so the result is
    /// exactly what `from_text` would produce for it.
    pub fn from_parts<'a>(
        records: impl IntoIterator<Item = &'a ShapeRecord>,
        raw_lines: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut text = emit_lines(records);
        for raw in raw_lines {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(raw);
        }
        Self::from_text(&text)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Source text of line `index`.
    pub fn line_text(&self, index: usize) -> Option<&str> {
        self.text.split('\n').nth(index)
    }

    /// Records of the shape lines, in file order.
    pub fn shape_records(&self) -> impl Iterator<Item = &ShapeRecord> {
        self.lines.iter().filter_map(|line| match line {
            Line::Shape(record) => Some(record),
            _ => None,
        })
    }

    /// Text of the raw (invalid) lines, in file order.
    pub fn raw_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            Line::Raw(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Regions to highlight, one per raw line.
    pub fn invalid_lines(&self) -> Vec<LineRange> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| match line {
                Line::Raw(text) => Some(LineRange {
                    line: i,
                    start: 0,
                    end: text.chars().count(),
                }),
                _ => None,
            })
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.lines.iter().any(Line::is_invalid)
    }
}
