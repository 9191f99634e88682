//! Gesture state machine for direct manipulation on the drawing surface.
//!
//! | Begin on          | State        | Move does                            |
//! |-------------------|--------------|--------------------------------------|
//! | empty space       | `DrawingNew` | resize the new shape to anchor → P′  |
//! | an existing shape | `Editing`    | translate the shape by P′ − previous |
//!
//! Moves mutate the `ShapeCollection` directly. Text is only rebuilt once
//! the gesture finishes, by the `Synchronizer`.

use sd_core::{Bounds, ColorToken, EditorConfig, Point, ShapeCollection, ShapeId, ShapeRecord};

/// Thickness and colors given to shapes created by a gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawStyle {
    pub thickness: f64,
    pub outline: ColorToken,
    pub fill: ColorToken,
}

impl From<&EditorConfig> for DrawStyle {
    fn from(config: &EditorConfig) -> Self {
        Self {
            thickness: config.default_thickness,
            outline: config.default_outline.clone(),
            fill: config.default_fill.clone(),
        }
    }
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

impl DrawStyle {
    /// A zero-size oval at `p` in this style.
    pub fn new_shape_at(&self, p: Point) -> ShapeRecord {
        ShapeRecord::oval(
            Bounds::at(p),
            self.thickness,
            self.outline.clone(),
            self.fill.clone(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Drawing a new shape; `anchor` is where the gesture began.
    DrawingNew { anchor: Point, id: ShapeId },
    /// Dragging an existing shape; `last` is the previous pointer position.
    Editing { last: Point, id: ShapeId },
}

impl GestureState {
    pub fn is_active(&self) -> bool {
        !matches!(self, GestureState::Idle)
    }

    /// Shape being drawn or dragged.
    pub fn shape(&self) -> Option<ShapeId> {
        match self {
            GestureState::Idle => None,
            GestureState::DrawingNew { id, .. } | GestureState::Editing { id, .. } => Some(*id),
        }
    }

    /// Start a gesture at `p`. The caller must have finished any active
    /// gesture first.
    pub fn begin(&mut self, shapes: &mut ShapeCollection, p: Point, style: &DrawStyle) {
        *self = match shapes.hit_test(p) {
            Some(id) => {
                log::debug!("gesture begin: editing {id} at ({}, {})", p.x, p.y);
                GestureState::Editing { last: p, id }
            }
            None => {
                let id = shapes.create(style.new_shape_at(p));
                log::debug!("gesture begin: drawing {id} at ({}, {})", p.x, p.y);
                GestureState::DrawingNew { anchor: p, id }
            }
        };
    }

    /// Follow the pointer to `p`. Returns whether the collection changed.
    pub fn move_to(&mut self, shapes: &mut ShapeCollection, p: Point) -> bool {
        match self {
            GestureState::Idle => false,
            GestureState::DrawingNew { anchor, id } => {
                log::trace!("resize {id} to ({}, {})", p.x, p.y);
                shapes.resize(*id, *anchor, p)
            }
            GestureState::Editing { last, id } => {
                let (dx, dy) = (p.x - last.x, p.y - last.y);
                log::trace!("translate {id} by ({dx}, {dy})");
                // Deltas stay relative to where the shape actually is.
                let moved = shapes.translate(*id, dx, dy);
                if moved {
                    *last = p;
                }
                moved
            }
        }
    }

    /// Finish the gesture, leaving the shape where it is. Returns whether a
    /// gesture was active.
    pub fn finish(&mut self) -> bool {
        std::mem::take(self).is_active()
    }
}
