use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use frames::VideoFrame;

use crate::geom::Point;
use crate::hit::{find_nearest_vertex, hit_test};
use crate::input::{Cursor, InputState, Mode, UiState};
use crate::polygon::{AppendOutcome, Polygon, PolygonSet, VertexRef};
use crate::render::{self, CanvasRenderer};
use crate::surface::Surface;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// The overlay must be redrawn.
    RenderNeeded,
    /// The host should switch the overlay cursor.
    SetCursor(Cursor),
    /// The overlay surface changed size.
    Resize { width: u32, height: u32 },
    /// The frame feed came up or went away.
    FeedChanged { live: bool },
    /// A new empty polygon now receives clicks.
    PolygonStarted { index: usize },
    /// A click appended a vertex.
    VertexAdded { polygon: usize, vertex: usize },
    /// A click near the first vertex closed the polygon.
    PolygonClosed { index: usize },
    /// A drag moved a vertex.
    VertexMoved { polygon: usize, vertex: usize, to: Point },
    /// All polygons were discarded.
    Reset,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Every handler is total: events that make no sense in the current state
/// return an empty action list and change nothing.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub polygons: PolygonSet,
    pub input: InputState,
    pub ui: UiState,
    pub surface: Surface,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Commands ---

    /// Begin a new polygon. Ignored while another polygon is still being drawn.
    pub fn start_new_polygon(&mut self) -> Vec<Action> {
        if let Some(polygon) = self.input.drawing_polygon() {
            debug!(polygon, "start_new_polygon ignored: already drawing");
            return Vec::new();
        }

        let index = self.polygons.push(Polygon::new());
        self.input = match self.input {
            InputState::Dragging { target, .. } => InputState::Dragging { target, resume: Some(index) },
            _ => InputState::Drawing { polygon: index },
        };
        debug!(index, "polygon started");
        vec![Action::PolygonStarted { index }, Action::RenderNeeded]
    }

    /// Discard every polygon and any gesture in progress.
    pub fn reset(&mut self) -> Vec<Action> {
        debug!(polygons = self.polygons.len(), mode = ?self.input.mode(), "reset");
        self.polygons.clear();
        self.input = InputState::Idle;
        self.ui.hover = None;

        let mut actions = vec![Action::Reset];
        self.set_cursor(Cursor::Default, &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn set_show_crosshair(&mut self, show: bool) -> Vec<Action> {
        self.ui.show_crosshair = show;
        vec![Action::RenderNeeded]
    }

    pub fn set_show_mouse_position(&mut self, show: bool) -> Vec<Action> {
        self.ui.show_mouse_position = show;
        vec![Action::RenderNeeded]
    }

    // --- Frame feed ---

    /// A frame arrived from the relay. Only its size and liveness matter here.
    pub fn apply_frame(&mut self, frame: &VideoFrame) -> Vec<Action> {
        let was_live = self.surface.live;
        let resized = self.surface.apply_frame(frame);

        let mut actions = Vec::new();
        if !was_live {
            actions.push(Action::FeedChanged { live: true });
        }
        if resized {
            debug!(width = self.surface.width, height = self.surface.height, "surface resized");
            actions.push(Action::Resize { width: self.surface.width, height: self.surface.height });
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// The frame transport disconnected. Editing continues at the last known size.
    pub fn frame_feed_lost(&mut self) -> Vec<Action> {
        if !self.surface.live {
            return Vec::new();
        }
        self.surface.mark_lost();
        vec![Action::FeedChanged { live: false }]
    }

    // --- Pointer input ---

    /// Press: grab the first vertex under the pointer, whatever the mode.
    pub fn on_pointer_down(&mut self, pt: Point) -> Vec<Action> {
        let Some(target) = find_nearest_vertex(pt, &self.polygons) else {
            return Vec::new();
        };

        let resume = self.input.drawing_polygon();
        self.input = InputState::Dragging { target, resume };
        self.ui.pointer = Some(pt);
        self.ui.hover = None;
        debug!(polygon = target.polygon, vertex = target.vertex, "drag started");
        vec![Action::RenderNeeded]
    }

    /// Motion: move the pinned vertex, or refresh hover feedback.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        self.ui.pointer = Some(pt);
        let mut actions = Vec::new();

        if let Some(target) = self.input.drag_target() {
            if self.polygons.move_vertex(target, pt) {
                actions.push(Action::VertexMoved { polygon: target.polygon, vertex: target.vertex, to: pt });
            }
        } else {
            self.refresh_hover(pt, &mut actions);
        }

        actions.push(Action::RenderNeeded);
        actions
    }

    /// Release: end a drag and resume whatever the drag interrupted.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let InputState::Dragging { target, resume } = self.input else {
            return Vec::new();
        };

        let still_open = |index: &usize| self.polygons.get(*index).is_some_and(|p| !p.is_closed());
        self.input = match resume.filter(still_open) {
            Some(polygon) => InputState::Drawing { polygon },
            None => InputState::Idle,
        };
        debug!(polygon = target.polygon, vertex = target.vertex, mode = ?self.input.mode(), "drag ended");

        let mut actions = Vec::new();
        if let Some(pt) = self.ui.pointer {
            self.refresh_hover(pt, &mut actions);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Click: add a vertex to the polygon being drawn, or close it.
    ///
    /// Clicks landing on another polygon's vertex, or on any vertex other
    /// than the drawing polygon's first, are swallowed.
    pub fn on_click(&mut self, pt: Point) -> Vec<Action> {
        let InputState::Drawing { polygon } = self.input else {
            return Vec::new();
        };

        if let Some(hit) = find_nearest_vertex(pt, &self.polygons) {
            if hit.polygon != polygon || !hit.is_first() {
                debug!(polygon = hit.polygon, vertex = hit.vertex, "click swallowed by existing vertex");
                return Vec::new();
            }
        }

        let Some(current) = self.polygons.get_mut(polygon) else {
            self.input = InputState::Idle;
            return Vec::new();
        };

        let mut actions = Vec::new();
        match current.append_vertex(pt) {
            AppendOutcome::Appended => {
                let vertex = current.vertex_count() - 1;
                actions.push(Action::VertexAdded { polygon, vertex });
            }
            AppendOutcome::Closed => {
                debug!(polygon, vertices = current.vertex_count(), "polygon closed");
                self.input = InputState::Idle;
                actions.push(Action::PolygonClosed { index: polygon });
            }
            AppendOutcome::Ignored => {
                self.input = InputState::Idle;
                return actions;
            }
        }

        self.refresh_hover(pt, &mut actions);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// The pointer left the overlay. A drag in progress is kept.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.ui.pointer = None;
        let mut actions = Vec::new();
        if self.input.drag_target().is_none() {
            self.ui.hover = None;
            self.set_cursor(Cursor::Default, &mut actions);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.input.mode()
    }

    #[must_use]
    pub fn polygons(&self) -> &PolygonSet {
        &self.polygons
    }

    /// The vertex pinned to the pointer, if dragging.
    #[must_use]
    pub fn drag_target(&self) -> Option<VertexRef> {
        self.input.drag_target()
    }

    /// Index of the polygon receiving clicks, if any.
    #[must_use]
    pub fn drawing_polygon(&self) -> Option<usize> {
        self.input.drawing_polygon()
    }

    // --- Helpers ---

    fn refresh_hover(&mut self, pt: Point, actions: &mut Vec<Action>) {
        let hover = hit_test(pt, &self.polygons);
        self.ui.hover = hover;
        let cursor = if hover.is_some() { Cursor::Pointer } else { Cursor::Default };
        self.set_cursor(cursor, actions);
    }

    fn set_cursor(&mut self, cursor: Cursor, actions: &mut Vec<Action>) {
        if self.ui.cursor != cursor {
            self.ui.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }
}

/// The full overlay engine. Wraps `EngineCore` and owns the browser canvas element.
///
/// Pointer events and `reset` need a 2D context; when the canvas cannot
/// provide one the event is dropped before it reaches the core, so nothing
/// is mutated and the next event starts clean.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let core = EngineCore::new();
        canvas.set_width(core.surface.width);
        canvas.set_height(core.surface.height);
        Self { canvas, core }
    }

    // --- Commands ---

    pub fn start_new_polygon(&mut self) -> Vec<Action> {
        let actions = self.core.start_new_polygon();
        self.apply(&actions);
        actions
    }

    pub fn reset(&mut self) -> Vec<Action> {
        self.dispatch(EngineCore::reset)
    }

    pub fn set_show_crosshair(&mut self, show: bool) -> Vec<Action> {
        let actions = self.core.set_show_crosshair(show);
        self.apply(&actions);
        actions
    }

    pub fn set_show_mouse_position(&mut self, show: bool) -> Vec<Action> {
        let actions = self.core.set_show_mouse_position(show);
        self.apply(&actions);
        actions
    }

    // --- Frame feed ---

    pub fn apply_frame(&mut self, frame: &VideoFrame) -> Vec<Action> {
        let actions = self.core.apply_frame(frame);
        self.apply(&actions);
        actions
    }

    pub fn frame_feed_lost(&mut self) -> Vec<Action> {
        let actions = self.core.frame_feed_lost();
        self.apply(&actions);
        actions
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, pt: Point) -> Vec<Action> {
        self.dispatch(|core| core.on_pointer_down(pt))
    }

    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        self.dispatch(|core| core.on_pointer_move(pt))
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.dispatch(EngineCore::on_pointer_up)
    }

    pub fn on_click(&mut self, pt: Point) -> Vec<Action> {
        self.dispatch(|core| core.on_click(pt))
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.dispatch(EngineCore::on_pointer_leave)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        match self.context() {
            Some(ctx) => render::draw_scene(&mut CanvasRenderer::new(&ctx), &self.core),
            None => Ok(()),
        }
    }

    // --- Internals ---

    fn context(&self) -> Option<CanvasRenderingContext2d> {
        let Ok(Some(object)) = self.canvas.get_context("2d") else {
            return None;
        };
        let Ok(ctx) = object.dyn_into::<CanvasRenderingContext2d>() else {
            return None;
        };
        Some(ctx)
    }

    fn dispatch(&mut self, handler: impl FnOnce(&mut EngineCore) -> Vec<Action>) -> Vec<Action> {
        if self.context().is_none() {
            debug!("render target unavailable; event dropped");
            return Vec::new();
        }
        let actions = handler(&mut self.core);
        self.apply(&actions);
        actions
    }

    fn apply(&self, actions: &[Action]) {
        let mut render_needed = false;
        for action in actions {
            match action {
                Action::SetCursor(cursor) => {
                    if let Err(err) = self.canvas.style().set_property("cursor", cursor.as_css()) {
                        warn!(?err, "failed to set overlay cursor");
                    }
                }
                Action::Resize { width, height } => {
                    self.canvas.set_width(*width);
                    self.canvas.set_height(*height);
                }
                Action::RenderNeeded => render_needed = true,
                _ => {}
            }
        }

        if render_needed {
            if let Err(err) = self.render() {
                warn!(?err, "overlay render failed");
            }
        }
    }
}
