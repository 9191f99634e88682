//! The shape collection: ordered, identity-bearing store of shapes.
//!
//! Insertion order is z-order: the last shape created paints on top and wins
//! hit tests where shapes overlap. Shapes are never reordered, so the vector
//! stays sorted by `ShapeId` and lookups are a binary search.

use crate::id::{IdAllocator, ShapeId};
use crate::model::{Bounds, Point, Shape, ShapeRecord};

#[derive(Debug, Clone, Default)]
pub struct ShapeCollection {
    shapes: Vec<Shape>,
    ids: IdAllocator,
}

impl ShapeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape on top of the z-order.
    pub fn create(&mut self, record: ShapeRecord) -> ShapeId {
        let id = self.ids.next_id();
        log::trace!("create {id}: {:?}", record.bounds);
        self.shapes.push(Shape { id, record });
        id
    }

    /// Topmost shape whose bounds contain `point`.
    pub fn hit_test(&self, point: Point) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.record.bounds.contains(point))
            .map(|s| s.id)
    }

    /// Shift a shape by a delta.
    ///
    /// Returns `false`, leaving the shape untouched, if the id is unknown or
    /// the move would push a coordinate out of the finite range.
    pub fn translate(&mut self, id: ShapeId, dx: f64, dy: f64) -> bool {
        let Some(shape) = self.get_mut(id) else {
            return false;
        };
        match shape.record.bounds.translated(dx, dy) {
            Some(bounds) => {
                shape.record.bounds = bounds;
                true
            }
            None => {
                log::warn!("translate {id} by ({dx}, {dy}) overflows; shape left in place");
                false
            }
        }
    }

    /// Make `anchor` and `corner` the two corners of a shape's box.
    ///
    /// The stored box is normalized whatever direction the corner was
    /// dragged in. Returns `false` if the id is unknown.
    pub fn resize(&mut self, id: ShapeId, anchor: Point, corner: Point) -> bool {
        match self.get_mut(id) {
            Some(shape) => {
                shape.record.bounds = Bounds::from_corners(anchor, corner);
                true
            }
            None => false,
        }
    }

    /// Records in z-order.
    pub fn snapshot(&self) -> Vec<ShapeRecord> {
        self.shapes.iter().map(|s| s.record.clone()).collect()
    }

    /// Drop every shape and rebuild from `records`, in order.
    ///
    /// New identities are assigned; ids of the previous shapes are never
    /// reused.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = ShapeRecord>) {
        self.shapes.clear();
        for record in records {
            let id = self.ids.next_id();
            self.shapes.push(Shape { id, record });
        }
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.position(id).map(|i| &self.shapes[i])
    }

    /// Shapes in z-order, bottom first.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.position(id).map(|i| &mut self.shapes[i])
    }

    fn position(&self, id: ShapeId) -> Option<usize> {
        self.shapes.binary_search_by_key(&id, |s| s.id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn oval(x0: f64, y0: f64, x1: f64, y1: f64) -> ShapeRecord {
        ShapeRecord::oval(Bounds::new(x0, y0, x1, y1), 1.0, "black", "white")
    }

    #[test]
    fn create_appends_in_z_order() {
        let mut shapes = ShapeCollection::new();
        let a = shapes.create(oval(0.0, 0.0, 1.0, 1.0));
        let b = shapes.create(oval(2.0, 2.0, 3.0, 3.0));
        let ids: Vec<_> = shapes.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(shapes.len(), 2);
    }

    #[test]
    fn hit_test_prefers_most_recent_on_overlap() {
        let mut shapes = ShapeCollection::new();
        let a = shapes.create(oval(0.0, 0.0, 10.0, 10.0));
        let b = shapes.create(oval(5.0, 5.0, 15.0, 15.0));
        assert_eq!(shapes.hit_test(Point::new(7.0, 7.0)), Some(b));
        assert_eq!(shapes.hit_test(Point::new(1.0, 1.0)), Some(a));
        assert_eq!(shapes.hit_test(Point::new(20.0, 20.0)), None);
    }

    #[test]
    fn hit_test_includes_edges() {
        let mut shapes = ShapeCollection::new();
        let a = shapes.create(oval(0.0, 0.0, 10.0, 10.0));
        assert_eq!(shapes.hit_test(Point::new(10.0, 0.0)), Some(a));
    }

    #[test]
    fn translate_keeps_identity_and_order() {
        let mut shapes = ShapeCollection::new();
        let a = shapes.create(oval(0.0, 0.0, 10.0, 10.0));
        let b = shapes.create(oval(20.0, 20.0, 30.0, 30.0));
        assert!(shapes.translate(a, 5.0, -2.0));
        assert_eq!(
            shapes.get(a).unwrap().record.bounds,
            Bounds::new(5.0, -2.0, 15.0, 8.0)
        );
        let ids: Vec<_> = shapes.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn translate_refuses_to_overflow() {
        let mut shapes = ShapeCollection::new();
        let id = shapes.create(oval(-1.0, -1.0, 1.7e308, 1.0));
        assert!(!shapes.translate(id, 1e308, 0.0));
        assert_eq!(
            shapes.get(id).unwrap().record.bounds,
            Bounds::new(-1.0, -1.0, 1.7e308, 1.0)
        );
        assert!(!shapes.translate(id, f64::INFINITY, 0.0));
        assert!(shapes.translate(id, -1e308, 0.0));
    }

    #[test]
    fn resize_normalizes_any_drag_direction() {
        let mut shapes = ShapeCollection::new();
        let id = shapes.create(oval(10.0, 10.0, 10.0, 10.0));
        assert!(shapes.resize(id, Point::new(10.0, 10.0), Point::new(4.0, 2.0)));
        assert_eq!(
            shapes.get(id).unwrap().record.bounds,
            Bounds::new(4.0, 2.0, 10.0, 10.0)
        );
        assert!(shapes.resize(id, Point::new(10.0, 10.0), Point::new(12.0, 3.0)));
        assert_eq!(
            shapes.get(id).unwrap().record.bounds,
            Bounds::new(10.0, 3.0, 12.0, 10.0)
        );
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut shapes = ShapeCollection::new();
        let id = shapes.create(oval(0.0, 0.0, 1.0, 1.0));
        shapes.replace_all(Vec::new());
        assert!(!shapes.translate(id, 1.0, 1.0));
        assert!(!shapes.resize(id, Point::default(), Point::default()));
        assert!(shapes.get(id).is_none());
    }

    #[test]
    fn replace_all_assigns_fresh_ids() {
        let mut shapes = ShapeCollection::new();
        let old = shapes.create(oval(0.0, 0.0, 1.0, 1.0));
        shapes.replace_all(vec![oval(0.0, 0.0, 1.0, 1.0), oval(1.0, 1.0, 2.0, 2.0)]);
        assert_eq!(shapes.len(), 2);
        assert!(shapes.iter().all(|s| s.id != old));
        assert_eq!(
            shapes.snapshot(),
            vec![oval(0.0, 0.0, 1.0, 1.0), oval(1.0, 1.0, 2.0, 2.0)]
        );
    }
}
