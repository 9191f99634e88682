//! Core data model for SD documents.
//!
//! A document is a flat, ordered list of shapes. Each shape is described by
//! a `ShapeRecord`: its kind, a bounding box, an outline thickness, and two
//! color tokens. Records are plain values; identity lives on `Shape`, which
//! pairs a record with a `ShapeId` owned by the `ShapeCollection`.

use crate::color::ColorResolver;
use crate::id::ShapeId;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Parse a hex color string.
    ///
    /// Accepts `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, and the wide forms
    /// `#RRRGGGBBB` / `#RRRRGGGGBBBB`, which keep only the most significant
    /// byte of each channel. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        // Channel `i` of width `w` hex digits, scaled to 8 bits.
        let channel = |i: usize, w: usize| -> Option<u8> {
            let mut v: u32 = 0;
            for &b in &bytes[i * w..(i + 1) * w] {
                v = (v << 4) | u32::from(hex_val(b)?);
            }
            Some(match w {
                1 => (v * 17) as u8,
                2 => v as u8,
                3 => (v >> 4) as u8,
                _ => (v >> 8) as u8,
            })
        };

        match bytes.len() {
            3 => Some(Self::rgb(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
            4 => Some(Self::rgba(
                channel(0, 1)?,
                channel(1, 1)?,
                channel(2, 1)?,
                channel(3, 1)?,
            )),
            6 => Some(Self::rgb(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
            8 => Some(Self::rgba(
                channel(0, 2)?,
                channel(1, 2)?,
                channel(2, 2)?,
                channel(3, 2)?,
            )),
            9 => Some(Self::rgb(channel(0, 3)?, channel(1, 3)?, channel(2, 3)?)),
            12 => Some(Self::rgb(channel(0, 4)?, channel(1, 4)?, channel(2, 4)?)),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// A color token exactly as written in the text or chosen in the picker.
///
/// The token is kept verbatim so serialization never rewrites what the user
/// typed, even when the token cannot be resolved to a color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorToken(String);

impl ColorToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColorToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ColorToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box given by two corners `(x0, y0)` and `(x1, y1)`.
///
/// Boxes coming from text are stored as written, so the corners are not
/// guaranteed to be ordered. Boxes produced by interactive resizing are
/// always normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Bounds {
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Zero-size box at a point.
    pub const fn at(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    /// Normalized box spanning two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Same box with `x0 <= x1` and `y0 <= y1`.
    pub fn normalized(&self) -> Self {
        Self::from_corners(Point::new(self.x0, self.y0), Point::new(self.x1, self.y1))
    }

    pub fn is_normalized(&self) -> bool {
        self.x0 <= self.x1 && self.y0 <= self.y1
    }

    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).abs()
    }

    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).abs()
    }

    /// Inclusive containment test against the normalized box.
    pub fn contains(&self, p: Point) -> bool {
        let n = self.normalized();
        p.x >= n.x0 && p.x <= n.x1 && p.y >= n.y0 && p.y <= n.y1
    }

    /// Both corners shifted by a delta, or `None` if any coordinate would
    /// leave the finite range.
    pub fn translated(&self, dx: f64, dy: f64) -> Option<Bounds> {
        let moved = Bounds::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy);
        [moved.x0, moved.y0, moved.x1, moved.y1]
            .iter()
            .all(|c| c.is_finite())
            .then_some(moved)
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────

/// The closed set of shape kinds the grammar understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Oval,
}

impl ShapeKind {
    pub const ALL: &'static [ShapeKind] = &[ShapeKind::Oval];

    /// The keyword that introduces this kind in the text format.
    pub const fn keyword(self) -> &'static str {
        match self {
            ShapeKind::Oval => "oval",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.keyword() == keyword)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The structured value parsed from, or serialized to, one text line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    pub kind: ShapeKind,
    pub bounds: Bounds,
    /// Outline thickness, never negative.
    pub thickness: f64,
    pub outline: ColorToken,
    pub fill: ColorToken,
}

impl ShapeRecord {
    pub fn new(
        kind: ShapeKind,
        bounds: Bounds,
        thickness: f64,
        outline: impl Into<ColorToken>,
        fill: impl Into<ColorToken>,
    ) -> Self {
        Self {
            kind,
            bounds,
            thickness,
            outline: outline.into(),
            fill: fill.into(),
        }
    }

    /// Shorthand for an oval record.
    pub fn oval(
        bounds: Bounds,
        thickness: f64,
        outline: impl Into<ColorToken>,
        fill: impl Into<ColorToken>,
    ) -> Self {
        Self::new(ShapeKind::Oval, bounds, thickness, outline, fill)
    }

    /// Equality with color tokens compared by the color they resolve to.
    ///
    /// `red` and `#FF0000` render identically, as do two different
    /// unresolvable tokens.
    pub fn renders_like(&self, other: &ShapeRecord, resolver: &ColorResolver) -> bool {
        self.kind == other.kind
            && self.bounds == other.bounds
            && self.thickness == other.thickness
            && resolver.resolve(&self.outline) == resolver.resolve(&other.outline)
            && resolver.resolve(&self.fill) == resolver.resolve(&other.fill)
    }
}

/// A record plus a stable identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    pub id: ShapeId,
    pub record: ShapeRecord,
}
