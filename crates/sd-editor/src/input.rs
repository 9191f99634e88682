//! Input abstraction layer.
//!
//! The host delivers pointer gestures in surface-local coordinates as a
//! `begin → move* → end` stream. `Leave` is sent when the pointer leaves
//! the surface mid-gesture; it is handled like `End`.

use sd_core::Point;
use serde::Deserialize;

/// A normalized pointer gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    /// Pointer pressed.
    Begin { x: f64, y: f64 },
    /// Pointer moved while pressed.
    Move { x: f64, y: f64 },
    /// Pointer released.
    End,
    /// Pointer left the surface; the gesture is abandoned where it is.
    Leave,
}

impl GestureEvent {
    pub fn begin(x: f64, y: f64) -> Self {
        Self::Begin { x, y }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::Move { x, y }
    }

    /// Position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Begin { x, y } | Self::Move { x, y } => Some(Point::new(*x, *y)),
            Self::End | Self::Leave => None,
        }
    }

    /// Whether this event finishes the current gesture.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::End | Self::Leave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_host_events() {
        let events: Vec<GestureEvent> = serde_json::from_str(
            r#"[
                { "type": "begin", "x": 1.5, "y": 2 },
                { "type": "move", "x": 3, "y": 4 },
                { "type": "end" },
                { "type": "leave" }
            ]"#,
        )
        .unwrap();
        assert_eq!(
            events,
            vec![
                GestureEvent::begin(1.5, 2.0),
                GestureEvent::moved(3.0, 4.0),
                GestureEvent::End,
                GestureEvent::Leave,
            ]
        );
    }

    #[test]
    fn terminal_events_carry_no_position() {
        assert_eq!(GestureEvent::moved(1.0, 2.0).position(), Some(Point::new(1.0, 2.0)));
        assert_eq!(GestureEvent::Leave.position(), None);
        assert!(GestureEvent::End.is_terminal());
        assert!(!GestureEvent::begin(0.0, 0.0).is_terminal());
    }
}
