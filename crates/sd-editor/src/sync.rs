//! Bidirectional sync engine: drawing surface ↔ shape text.
//!
//! The `Synchronizer` is the only place where the two representations meet:
//!
//! - **Shapes → Text**: gestures mutate the `ShapeCollection` directly while
//!   the pointer moves. When the gesture ends, the text is rebuilt from the
//!   collection, with every previously invalid line appended verbatim.
//!
//! - **Text → Shapes**: a text commit re-parses every line and rebuilds the
//!   collection from the valid ones, in file order.
//!
//! Every entry point returns a `SyncUpdate` describing what the host has to
//! apply. Text written by the synchronizer is handed back to the host and
//! never re-enters as a commit, so the loop cannot echo.

use crate::gesture::{DrawStyle, GestureState};
use crate::input::GestureEvent;
use sd_core::parser::is_color_token;
use sd_core::{
    ColorResolver, ColorToken, EditorConfig, LineRange, Point, ShapeCollection, TextBuffer,
};
use sd_render::{RenderItem, render_list};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EditorError {
    #[error("`{0}` is not a valid color token")]
    MalformedColor(String),
}

/// What the host has to apply after an event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncUpdate {
    /// Replacement for the whole text, when the synchronizer rewrote it.
    pub text: Option<String>,
    /// Line ranges to highlight as invalid, for the current text.
    pub invalid_lines: Vec<LineRange>,
    /// Whether the drawing surface must be redrawn.
    pub repaint: bool,
}

pub struct Synchronizer {
    shapes: ShapeCollection,
    buffer: TextBuffer,
    gesture: GestureState,
    style: DrawStyle,
    resolver: ColorResolver,
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Synchronizer {
    /// Empty text, no shapes.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            shapes: ShapeCollection::new(),
            buffer: TextBuffer::default(),
            gesture: GestureState::Idle,
            style: DrawStyle::from(config),
            resolver: config.resolver(),
        }
    }

    /// Start from an existing document. The text is kept as given.
    pub fn from_text(text: &str, config: &EditorConfig) -> Self {
        let mut sync = Self::new(config);
        sync.commit_text(text);
        sync
    }

    // ─── Shapes → Text direction ─────────────────────────────────────────

    /// Dispatch a host gesture event.
    pub fn handle_gesture(&mut self, event: &GestureEvent) -> SyncUpdate {
        match *event {
            GestureEvent::Begin { x, y } => self.gesture_begin(Point::new(x, y)),
            GestureEvent::Move { x, y } => self.gesture_move(Point::new(x, y)),
            GestureEvent::End | GestureEvent::Leave => self.gesture_end(),
        }
    }

    pub fn gesture_begin(&mut self, p: Point) -> SyncUpdate {
        if !is_finite(p) {
            log::warn!("ignoring gesture begin at non-finite point ({}, {})", p.x, p.y);
            return self.unchanged();
        }
        let mut update = if self.gesture.is_active() {
            log::debug!("gesture begin while active; committing the previous one");
            self.gesture_end()
        } else {
            SyncUpdate::default()
        };
        self.gesture.begin(&mut self.shapes, p, &self.style);
        update.repaint = true;
        update.invalid_lines = self.buffer.invalid_lines();
        update
    }

    pub fn gesture_move(&mut self, p: Point) -> SyncUpdate {
        if !is_finite(p) {
            log::warn!("ignoring gesture move to non-finite point ({}, {})", p.x, p.y);
            return self.unchanged();
        }
        let changed = self.gesture.move_to(&mut self.shapes, p);
        SyncUpdate {
            text: None,
            invalid_lines: self.buffer.invalid_lines(),
            repaint: changed,
        }
    }

    /// Finish the active gesture at the last known position and rewrite the
    /// text. A no-op while idle.
    pub fn gesture_end(&mut self) -> SyncUpdate {
        if !self.gesture.finish() {
            return self.unchanged();
        }
        self.resync_text();
        SyncUpdate {
            text: Some(self.buffer.text().to_string()),
            invalid_lines: self.buffer.invalid_lines(),
            repaint: true,
        }
    }

    fn resync_text(&mut self) {
        let records = self.shapes.snapshot();
        let previous = std::mem::take(&mut self.buffer);
        self.buffer = TextBuffer::from_parts(&records, previous.raw_lines());
        log::debug!(
            "shapes → text: {} shapes, {} raw lines",
            records.len(),
            self.buffer.invalid_lines().len()
        );
        self.check_converged();
    }

    // ─── Text → Shapes direction ─────────────────────────────────────────

    /// Accept the full text from the host's text editor.
    ///
    /// Any active gesture is dropped and the committed text wins, even when
    /// it matches the current text. Only an idle commit of identical text is
    /// a no-op.
    pub fn commit_text(&mut self, text: &str) -> SyncUpdate {
        if !self.gesture.is_active() && text == self.buffer.text() {
            return self.unchanged();
        }
        if self.gesture.finish() {
            log::debug!("text commit during a gesture; gesture dropped");
        }
        self.resync_shapes(text);
        SyncUpdate {
            text: None,
            invalid_lines: self.buffer.invalid_lines(),
            repaint: true,
        }
    }

    fn resync_shapes(&mut self, text: &str) {
        self.buffer = TextBuffer::from_text(text);
        self.shapes.replace_all(self.buffer.shape_records().cloned());
        log::debug!(
            "text → shapes: {} shapes, {} invalid lines",
            self.shapes.len(),
            self.buffer.invalid_lines().len()
        );
        self.check_converged();
    }

    // ─── Drawing style ───────────────────────────────────────────────────

    /// Outline color for new shapes. `None` keeps the current one.
    pub fn set_outline_color(&mut self, token: Option<&str>) -> Result<(), EditorError> {
        if let Some(token) = validated(token)? {
            self.style.outline = token;
        }
        Ok(())
    }

    /// Fill color for new shapes. `None` keeps the current one.
    pub fn set_fill_color(&mut self, token: Option<&str>) -> Result<(), EditorError> {
        if let Some(token) = validated(token)? {
            self.style.fill = token;
        }
        Ok(())
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn shapes(&self) -> &ShapeCollection {
        &self.shapes
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn state(&self) -> GestureState {
        self.gesture
    }

    pub fn style(&self) -> &DrawStyle {
        &self.style
    }

    pub fn resolver(&self) -> &ColorResolver {
        &self.resolver
    }

    pub fn invalid_lines(&self) -> Vec<LineRange> {
        self.buffer.invalid_lines()
    }

    /// What the drawing surface should show now.
    pub fn render_list(&self) -> Vec<RenderItem> {
        render_list(&self.shapes, &self.resolver)
    }

    /// Whether the collection and the text's shape lines agree. Holds
    /// whenever no gesture is active.
    pub fn is_converged(&self) -> bool {
        self.shapes
            .iter()
            .map(|s| &s.record)
            .eq(self.buffer.shape_records())
    }

    fn check_converged(&self) {
        if !self.is_converged() {
            log::warn!("shape collection and text diverged after resync");
        }
    }

    fn unchanged(&self) -> SyncUpdate {
        SyncUpdate {
            text: None,
            invalid_lines: self.buffer.invalid_lines(),
            repaint: false,
        }
    }
}

fn is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

fn validated(token: Option<&str>) -> Result<Option<ColorToken>, EditorError> {
    match token {
        None => Ok(None),
        Some(t) if is_color_token(t) => Ok(Some(ColorToken::new(t))),
        Some(t) => Err(EditorError::MalformedColor(t.to_string())),
    }
}
