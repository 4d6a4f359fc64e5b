#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

use crate::consts::PROXIMITY_THRESHOLD_SQ;

/// A position in overlay-local space (origin at the overlay's top-left, pixels).
///
/// Pointer coordinates and polygon vertices share this one type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[must_use]
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Whether `other` lies within the system-wide proximity threshold.
    #[must_use]
    pub fn is_near(self, other: Point) -> bool {
        proximity(self, other, PROXIMITY_THRESHOLD_SQ)
    }
}

/// True iff the squared distance between `a` and `b` is strictly below `threshold_sq`.
#[must_use]
pub fn proximity(a: Point, b: Point, threshold_sq: f64) -> bool {
    a.distance_sq(b) < threshold_sq
}
