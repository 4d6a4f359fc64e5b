//! Overlay surface: the drawing area's size, tracked from the live frame feed.
//!
//! The overlay coordinate space always matches the dimensions declared by
//! the most recent frame. Frames never touch polygon data; losing the feed
//! only flips `live` and the engine keeps editing against the last size.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use frames::VideoFrame;

use crate::consts::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    /// Overlay width in pixels.
    pub width: u32,
    /// Overlay height in pixels.
    pub height: u32,
    /// Id of the last frame received, if any.
    pub frame_id: Option<String>,
    /// Whether frames are currently arriving.
    pub live: bool,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
            frame_id: None,
            live: false,
        }
    }
}

impl Surface {
    /// Record a frame. Returns true if the overlay size changed.
    ///
    /// Frames without declared dimensions keep the current size.
    pub fn apply_frame(&mut self, frame: &VideoFrame) -> bool {
        self.frame_id = Some(frame.frame_id.clone());
        self.live = true;

        if !frame.has_dimensions() || (frame.width == self.width && frame.height == self.height) {
            return false;
        }
        self.width = frame.width;
        self.height = frame.height;
        true
    }

    /// The frame feed went away. Size is kept.
    pub fn mark_lost(&mut self) {
        self.live = false;
    }

    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }
}
