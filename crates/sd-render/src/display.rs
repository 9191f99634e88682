//! Shape collection → render instruction list.
//!
//! The list is what the host's drawing surface consumes: one item per shape
//! in z-order (bottom first) with colors already resolved. Unresolvable
//! tokens arrive here as the resolver's fallback color.

use sd_core::{Bounds, Color, ColorResolver, ShapeCollection, ShapeId, ShapeKind};
use serde::Serialize;

/// Everything needed to draw one shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderItem {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Always normalized.
    pub bounds: Bounds,
    pub thickness: f64,
    pub outline: Color,
    pub fill: Color,
}

/// Build the render list for the current collection.
#[must_use]
pub fn render_list(shapes: &ShapeCollection, resolver: &ColorResolver) -> Vec<RenderItem> {
    shapes
        .iter()
        .map(|shape| {
            let record = &shape.record;
            RenderItem {
                id: shape.id,
                kind: record.kind,
                bounds: record.bounds.normalized(),
                thickness: record.thickness,
                outline: resolver.resolve(&record.outline),
                fill: resolver.resolve(&record.fill),
            }
        })
        .collect()
}

/// Render list as JSON, for hosts that draw outside Rust.
pub fn render_list_json(items: &[RenderItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}
