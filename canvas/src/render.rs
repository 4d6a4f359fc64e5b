//! Rendering: draws the overlay scene through the [`Renderer`] adapter.
//!
//! [`draw_scene`] decides *what* to draw from read-only engine state; a
//! [`Renderer`] decides *how*. The browser implementation, [`CanvasRenderer`],
//! is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! Renderers own no geometry and report nothing back beyond errors.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{
    CROSSHAIR_COLOR, FIRST_VERTEX_COLOR, HOVER_RADIUS_PX, LABEL_COLOR, LABEL_FONT, LABEL_OFFSET_X, LABEL_OFFSET_Y,
    POLYGON_FILL, POLYGON_LINE_WIDTH, POLYGON_STROKE, VERTEX_COLOR, VERTEX_RADIUS_PX,
};
use crate::engine::EngineCore;
use crate::geom::Point;
use crate::hit::HitPart;
use crate::input::Mode;
use crate::polygon::Polygon;

/// Drawing capability consumed by the engine.
pub trait Renderer {
    type Error;

    /// Erase the whole surface.
    fn clear(&mut self, width: f64, height: f64) -> Result<(), Self::Error>;

    /// Filled circular marker.
    fn draw_vertex(&mut self, at: Point, radius: f64, color: &str) -> Result<(), Self::Error>;

    /// Connected path through `points`, with a closing edge when `closed`.
    fn draw_polyline(&mut self, points: &[Point], closed: bool, stroke: &str, fill: &str) -> Result<(), Self::Error>;

    /// Full-width horizontal and full-height vertical line through `at`.
    fn draw_crosshair(&mut self, at: Point, width: f64, height: f64, color: &str) -> Result<(), Self::Error>;

    /// Text anchored at `at`.
    fn draw_label(&mut self, text: &str, at: Point, color: &str) -> Result<(), Self::Error>;
}

/// Draw the full overlay: polygons, hover marker, crosshair, and pointer label.
///
/// Pointer decorations are skipped while a vertex is being dragged.
///
/// # Errors
///
/// Propagates the first error returned by the renderer.
pub fn draw_scene<R: Renderer>(renderer: &mut R, core: &EngineCore) -> Result<(), R::Error> {
    let (width, height) = core.surface.size();
    renderer.clear(width, height)?;

    for polygon in core.polygons.iter().filter(|p| !p.is_empty()) {
        draw_polygon(renderer, polygon)?;
    }

    if core.mode() == Mode::Dragging {
        return Ok(());
    }

    if let Some(hit) = core.ui.hover.filter(|h| h.part == HitPart::OpenStart) {
        if let Some(at) = core.polygons.vertex(hit.target) {
            renderer.draw_vertex(at, HOVER_RADIUS_PX, VERTEX_COLOR)?;
        }
    }

    let Some(pointer) = core.ui.pointer else {
        return Ok(());
    };
    if core.ui.show_crosshair {
        renderer.draw_crosshair(pointer, width, height, CROSSHAIR_COLOR)?;
    }
    if core.ui.show_mouse_position {
        let at = Point::new(pointer.x + LABEL_OFFSET_X, pointer.y + LABEL_OFFSET_Y);
        renderer.draw_label(&coordinate_label(pointer), at, LABEL_COLOR)?;
    }
    Ok(())
}

/// Pointer label text, e.g. `(12, 40.5)`.
#[must_use]
pub fn coordinate_label(at: Point) -> String {
    format!("({}, {})", at.x, at.y)
}

/// Markers go down first; the path and its translucent fill sit over them.
fn draw_polygon<R: Renderer>(renderer: &mut R, polygon: &Polygon) -> Result<(), R::Error> {
    for &vertex in polygon.vertices() {
        renderer.draw_vertex(vertex, VERTEX_RADIUS_PX, VERTEX_COLOR)?;
    }
    if !polygon.is_closed() {
        if let Some(first) = polygon.first_vertex() {
            renderer.draw_vertex(first, VERTEX_RADIUS_PX, FIRST_VERTEX_COLOR)?;
        }
    }
    renderer.draw_polyline(polygon.vertices(), polygon.is_closed(), POLYGON_STROKE, POLYGON_FILL)
}

// =============================================================
// Browser canvas
// =============================================================

/// [`Renderer`] over a browser 2D context.
pub struct CanvasRenderer<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasRenderer<'a> {
    #[must_use]
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Renderer for CanvasRenderer<'_> {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn draw_vertex(&mut self, at: Point, radius: f64, color: &str) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        self.ctx.arc(at.x, at.y, radius, 0.0, 2.0 * PI)?;
        self.ctx.fill();
        self.ctx.close_path();
        Ok(())
    }

    fn draw_polyline(&mut self, points: &[Point], closed: bool, stroke: &str, fill: &str) -> Result<(), JsValue> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(());
        };

        self.ctx.save();
        self.ctx.set_stroke_style_str(stroke);
        self.ctx.set_fill_style_str(fill);
        self.ctx.set_line_width(POLYGON_LINE_WIDTH);
        self.ctx.begin_path();
        self.ctx.move_to(first.x, first.y);
        for p in rest {
            self.ctx.line_to(p.x, p.y);
        }
        if closed {
            self.ctx.close_path();
        }
        self.ctx.stroke();
        self.ctx.fill();
        self.ctx.restore();
        Ok(())
    }

    fn draw_crosshair(&mut self, at: Point, width: f64, height: f64, color: &str) -> Result<(), JsValue> {
        self.ctx.set_stroke_style_str(color);
        self.ctx.begin_path();
        self.ctx.move_to(at.x, 0.0);
        self.ctx.line_to(at.x, height);
        self.ctx.move_to(0.0, at.y);
        self.ctx.line_to(width, at.y);
        self.ctx.stroke();
        Ok(())
    }

    fn draw_label(&mut self, text: &str, at: Point, color: &str) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_font(LABEL_FONT);
        self.ctx.fill_text(text, at.x, at.y)
    }
}
