//! Shared numeric and style constants for the canvas crate.

// ── Hit-testing ─────────────────────────────────────────────────

/// Squared distance below which two points count as the same spot (10 px radius).
///
/// Used for vertex hit-testing and for the click-near-first-vertex close rule.
pub const PROXIMITY_THRESHOLD_SQ: f64 = 100.0;

/// Minimum vertex count before a polygon may close.
pub const MIN_CLOSED_VERTICES: usize = 3;

// ── Surface ─────────────────────────────────────────────────────

/// Overlay width before the first frame declares its size.
pub const DEFAULT_SURFACE_WIDTH: u32 = 640;

/// Overlay height before the first frame declares its size.
pub const DEFAULT_SURFACE_HEIGHT: u32 = 480;

// ── Rendering ───────────────────────────────────────────────────

/// Radius of a regular vertex marker.
pub const VERTEX_RADIUS_PX: f64 = 3.0;

/// Radius of the hovered first-vertex marker on an open polygon.
pub const HOVER_RADIUS_PX: f64 = 5.0;

/// Offset of the coordinate label from the pointer.
pub const LABEL_OFFSET_X: f64 = 5.0;
pub const LABEL_OFFSET_Y: f64 = -5.0;

pub const VERTEX_COLOR: &str = "red";
pub const FIRST_VERTEX_COLOR: &str = "green";
pub const POLYGON_STROKE: &str = "blue";
pub const POLYGON_FILL: &str = "rgba(0, 0, 255, 0.3)";
pub const POLYGON_LINE_WIDTH: f64 = 2.0;
pub const CROSSHAIR_COLOR: &str = "rgba(0, 0, 0, 0.5)";
pub const LABEL_COLOR: &str = "black";
pub const LABEL_FONT: &str = "10px Arial";
