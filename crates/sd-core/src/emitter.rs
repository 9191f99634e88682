//! Emitter: `ShapeRecord` → SD text format.
//!
//! Produces the single canonical line for a record. Numbers are written in
//! their shortest exact decimal form so every emitted line parses back to
//! an identical record.

use crate::model::ShapeRecord;
use std::fmt::Write;

/// Emit a record as one canonical line (no trailing newline).
#[must_use]
pub fn serialize(record: &ShapeRecord) -> String {
    let mut out = String::with_capacity(48);
    emit_record(&mut out, record);
    out
}

/// Emit records one per line, in order, joined with `\n`.
#[must_use]
pub fn emit_lines<'a>(records: impl IntoIterator<Item = &'a ShapeRecord>) -> String {
    let mut out = String::new();
    for (i, record) in records.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        emit_record(&mut out, record);
    }
    out
}

fn emit_record(out: &mut String, record: &ShapeRecord) {
    let b = &record.bounds;
    let _ = write!(
        out,
        "{} <{} {} {} {}> {} {} {}",
        record.kind.keyword(),
        format_num(b.x0),
        format_num(b.y0),
        format_num(b.x1),
        format_num(b.y1),
        format_num(record.thickness),
        record.outline,
        record.fill,
    );
}

/// Shortest decimal that parses back to the same value.
///
/// `f64`'s `Display` never switches to exponent notation, which the grammar
/// does not accept. Negative zero is written as `0`.
fn format_num(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bounds, ShapeRecord};
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn serialize_integral_values_without_fraction() {
        let record = ShapeRecord::oval(Bounds::new(0.0, 0.0, 10.0, 20.0), 1.0, "black", "white");
        assert_eq!(serialize(&record), "oval <0 0 10 20> 1 black white");
    }

    #[test]
    fn serialize_fractions_exactly() {
        let record = ShapeRecord::oval(Bounds::new(-0.125, 1.5, 2.0, 3.1), 0.5, "#f00", "red");
        assert_eq!(serialize(&record), "oval <-0.125 1.5 2 3.1> 0.5 #f00 red");
    }

    #[test]
    fn serialize_keeps_unresolvable_tokens() {
        let record = ShapeRecord::oval(Bounds::new(0.0, 0.0, 1.0, 1.0), 1.0, "notacolor", "red");
        assert_eq!(serialize(&record), "oval <0 0 1 1> 1 notacolor red");
    }

    #[test]
    fn negative_zero_is_plain_zero() {
        let record = ShapeRecord::oval(Bounds::new(-0.0, 0.0, 1.0, 1.0), 0.0, "a", "b");
        assert_eq!(serialize(&record), "oval <0 0 1 1> 0 a b");
    }

    #[test]
    fn large_and_tiny_values_reparse() {
        let record = ShapeRecord::oval(
            Bounds::new(1e21, 1e-9, 123456.789, -98765.4321),
            1e-7,
            "black",
            "navy",
        );
        let line = serialize(&record);
        assert!(!line.contains('e'), "exponent leaked into {line}");
        assert_eq!(parse(&line), Some(record));
    }

    #[test]
    fn emit_lines_joins_in_order() {
        let a = ShapeRecord::oval(Bounds::new(0.0, 0.0, 1.0, 1.0), 1.0, "black", "white");
        let b = ShapeRecord::oval(Bounds::new(2.0, 2.0, 3.0, 3.0), 2.0, "red", "blue");
        assert_eq!(
            emit_lines([&a, &b]),
            "oval <0 0 1 1> 1 black white\noval <2 2 3 3> 2 red blue"
        );
        assert_eq!(emit_lines(std::iter::empty()), "");
    }
}
