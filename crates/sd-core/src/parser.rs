//! Line grammar for the SD text format → `ShapeRecord`.
//!
//! Built on `winnow` 0.7. One line describes one shape:
//!
//! ```text
//! oval <x0 y0 x1 y1> thickness outline_color fill_color
//! ```
//!
//! The keyword starts the line and the fill color ends it. Whitespace is
//! free around the brackets and required between the other tokens. Coordinates are signed decimals, the thickness is unsigned, and
//! color tokens are a bare word or a `#`-prefixed word. A line either
//! parses completely or not at all.

use crate::model::{Bounds, ShapeKind, ShapeRecord};
use std::fmt;
use thiserror::Error;
use winnow::ascii::{digit0, digit1};
use winnow::combinator::opt;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

/// Parse one line, returning `None` if it is not a shape line.
#[must_use]
pub fn parse(line: &str) -> Option<ShapeRecord> {
    parse_line(line).ok()
}

/// Why a line is not a shape line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// Empty line. Not a shape, but not an error to report.
    #[error("blank line")]
    Blank,
    #[error("expected {expected} at column {column}")]
    Expected { expected: Expected, column: usize },
    #[error("unexpected `{found}` at column {column} after the fill color")]
    Trailing { found: String, column: usize },
    #[error("trailing whitespace at column {column}")]
    TrailingWhitespace { column: usize },
}

impl LineError {
    /// Whether the line should be flagged to the user.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, LineError::Blank)
    }

    /// Character column the error points at, if any.
    pub fn column(&self) -> Option<usize> {
        match self {
            LineError::Blank => None,
            LineError::Expected { column, .. }
            | LineError::Trailing { column, .. }
            | LineError::TrailingWhitespace { column } => Some(*column),
        }
    }
}

/// The grammar element that was missing or malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Keyword,
    OpenBracket,
    Coordinate,
    CloseBracket,
    Thickness,
    Color,
    Whitespace,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Keyword => {
                f.write_str("a shape keyword (")?;
                for (i, kind) in ShapeKind::ALL.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "`{}`", kind.keyword())?;
                }
                f.write_str(")")
            }
            Expected::OpenBracket => f.write_str("`<`"),
            Expected::Coordinate => f.write_str("a coordinate"),
            Expected::CloseBracket => f.write_str("`>`"),
            Expected::Thickness => f.write_str("a non-negative thickness"),
            Expected::Color => f.write_str("a color name or #hex token"),
            Expected::Whitespace => f.write_str("whitespace"),
        }
    }
}

/// Parse one line into a `ShapeRecord`, reporting the first deviation.
///
/// The keyword must start the line and the fill token must end it. A single
/// trailing `\r` is ignored so CRLF text parses the same as LF text.
pub fn parse_line(line: &str) -> Result<ShapeRecord, LineError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() {
        return Err(LineError::Blank);
    }

    let mut input = line;
    let rest = &mut input;

    let kind = expect(rest, line, Expected::Keyword, parse_kind)?;
    skip_ws(rest);
    expect(rest, line, Expected::OpenBracket, '<')?;
    skip_ws(rest);

    let x0 = expect_number(rest, line, Expected::Coordinate, parse_signed)?;
    expect(rest, line, Expected::Whitespace, ws1)?;
    let y0 = expect_number(rest, line, Expected::Coordinate, parse_signed)?;
    expect(rest, line, Expected::Whitespace, ws1)?;
    let x1 = expect_number(rest, line, Expected::Coordinate, parse_signed)?;
    expect(rest, line, Expected::Whitespace, ws1)?;
    let y1 = expect_number(rest, line, Expected::Coordinate, parse_signed)?;

    skip_ws(rest);
    expect(rest, line, Expected::CloseBracket, '>')?;
    skip_ws(rest);

    let thickness = expect_number(rest, line, Expected::Thickness, parse_unsigned)?;
    expect(rest, line, Expected::Whitespace, ws1)?;
    let outline = expect(rest, line, Expected::Color, parse_color_token)?;
    expect(rest, line, Expected::Whitespace, ws1)?;
    let fill = expect(rest, line, Expected::Color, parse_color_token)?;

    if !rest.is_empty() {
        let token = rest.trim_start();
        if token.is_empty() {
            return Err(LineError::TrailingWhitespace {
                column: column_at(line, rest),
            });
        }
        let found: String = token.chars().take_while(|c| !c.is_whitespace()).collect();
        return Err(LineError::Trailing {
            found,
            column: column_at(line, token),
        });
    }

    Ok(ShapeRecord::new(
        kind,
        Bounds::new(x0, y0, x1, y1),
        thickness,
        outline,
        fill,
    ))
}

/// Whether `token` is exactly one well-formed color token.
///
/// Tokens that fail this check would not survive a serialize → parse
/// round-trip, so they must never be stored on a record.
pub fn is_color_token(token: &str) -> bool {
    let mut input = token;
    parse_color_token(&mut input).is_ok() && input.is_empty()
}

// ─── Low-level parsers ──────────────────────────────────────────────────

/// Run `parser`, mapping failure to `LineError::Expected` at the token start.
fn expect<'a, O>(
    input: &mut &'a str,
    line: &str,
    expected: Expected,
    mut parser: impl Parser<&'a str, O, ErrMode<ContextError>>,
) -> Result<O, LineError> {
    let start = *input;
    parser.parse_next(input).map_err(|_| LineError::Expected {
        expected,
        column: column_at(line, start),
    })
}

fn expect_number<'a>(
    input: &mut &'a str,
    line: &str,
    expected: Expected,
    parser: fn(&mut &'a str) -> ModalResult<&'a str>,
) -> Result<f64, LineError> {
    let start = *input;
    let text = expect(input, line, expected, parser)?;
    text.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or(LineError::Expected {
            expected,
            column: column_at(line, start),
        })
}

/// Character column of `rest` within `line`.
fn column_at(line: &str, rest: &str) -> usize {
    line[..line.len() - rest.len()].chars().count()
}

fn skip_ws(input: &mut &str) {
    let _: ModalResult<&str> = take_while(0.., |c: char| c.is_whitespace()).parse_next(input);
}

fn ws1<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_whitespace()).parse_next(input)
}

fn parse_kind(input: &mut &str) -> ModalResult<ShapeKind> {
    for &kind in ShapeKind::ALL {
        if let Some(rest) = input.strip_prefix(kind.keyword()) {
            *input = rest;
            return Ok(kind);
        }
    }
    Err(ErrMode::Backtrack(ContextError::new()))
}

/// `[+-]?digits(.digits*)?`
fn parse_signed<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (opt(one_of(['+', '-'])), digit1, opt(('.', digit0)))
        .take()
        .parse_next(input)
}

/// `+?digits(.digits*)?`
fn parse_unsigned<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (opt('+'), digit1, opt(('.', digit0)))
        .take()
        .parse_next(input)
}

/// `#?` followed by one or more word characters.
fn parse_color_token<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (
        opt('#'),
        take_while(1.., |c: char| c.is_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}
