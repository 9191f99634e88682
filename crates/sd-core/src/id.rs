use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a shape inside a `ShapeCollection`.
///
/// Ids are handed out in increasing order by the owning collection, so
/// comparing two ids compares creation order (and therefore z-order).
/// 8 bytes, Copy, Eq, Hash in O(1).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(u64);

impl ShapeId {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        ShapeId(raw)
    }
}

impl fmt::Debug for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape_{}", self.0)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape_{}", self.0)
    }
}

/// Hands out increasing `ShapeId`s.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub(crate) fn next_id(&mut self) -> ShapeId {
        let id = ShapeId::from_raw(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocated_ids_are_increasing() {
        let mut ids = IdAllocator::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn display_uses_prefix() {
        assert_eq!(ShapeId::from_raw(7).to_string(), "shape_7");
        assert_eq!(format!("{:?}", ShapeId::from_raw(7)), "shape_7");
    }
}
