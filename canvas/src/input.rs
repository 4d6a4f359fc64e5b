//! Input model: editing modes, cursor affordances, display toggles, and the
//! gesture state carried between pointer events.
//!
//! `InputState` is the source of truth for what the engine is doing. A drag
//! temporarily overrides drawing, so the dragging variant remembers which
//! polygon (if any) was being drawn and the engine resumes it on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::Serialize;

use crate::geom::Point;
use crate::hit::Hit;
use crate::polygon::VertexRef;

/// Coarse editing mode, as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// No polygon is being drawn. Existing vertices can still be dragged.
    #[default]
    Idle,
    /// The most recently added polygon accepts new vertices.
    Drawing,
    /// A vertex is pinned to the pointer.
    Dragging,
}

/// Pointer cursor the host should show over the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    #[default]
    Default,
    /// Over a vertex that can be grabbed.
    Pointer,
}

impl Cursor {
    /// CSS `cursor` property value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Pointer => "pointer",
        }
    }
}

/// Gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// Waiting for a command or a press on a vertex.
    #[default]
    Idle,
    /// Clicks append vertices to `polygon`.
    Drawing {
        /// Index of the open polygon receiving clicks.
        polygon: usize,
    },
    /// Pointer motion moves `target`.
    Dragging {
        /// The pinned vertex.
        target: VertexRef,
        /// Polygon that was being drawn when the drag began.
        resume: Option<usize>,
    },
}

impl InputState {
    #[must_use]
    pub fn mode(self) -> Mode {
        match self {
            Self::Idle => Mode::Idle,
            Self::Drawing { .. } => Mode::Drawing,
            Self::Dragging { .. } => Mode::Dragging,
        }
    }

    /// The polygon accepting vertices, including one suspended by a drag.
    #[must_use]
    pub fn drawing_polygon(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Drawing { polygon } => Some(polygon),
            Self::Dragging { resume, .. } => resume,
        }
    }

    /// The vertex pinned to the pointer, if dragging.
    #[must_use]
    pub fn drag_target(self) -> Option<VertexRef> {
        match self {
            Self::Dragging { target, .. } => Some(target),
            _ => None,
        }
    }
}

/// Display state read by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Draw the full-surface crosshair at the pointer.
    pub show_crosshair: bool,
    /// Draw the `(x, y)` label next to the pointer.
    pub show_mouse_position: bool,
    /// Last pointer position over the overlay.
    pub pointer: Option<Point>,
    /// Vertex under the pointer when not dragging.
    pub hover: Option<Hit>,
    /// Cursor most recently requested from the host.
    pub cursor: Cursor,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_crosshair: true,
            show_mouse_position: true,
            pointer: None,
            hover: None,
            cursor: Cursor::Default,
        }
    }
}
