use super::*;

// =============================================================
// Mode
// =============================================================

#[test]
fn mode_default_is_idle() {
    assert_eq!(Mode::default(), Mode::Idle);
}

#[test]
fn mode_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&Mode::Drawing).unwrap(), "\"drawing\"");
    assert_eq!(serde_json::to_string(&Mode::Dragging).unwrap(), "\"dragging\"");
}

// =============================================================
// Cursor
// =============================================================

#[test]
fn cursor_css_values() {
    assert_eq!(Cursor::Default.as_css(), "default");
    assert_eq!(Cursor::Pointer.as_css(), "pointer");
}

#[test]
fn cursor_default_is_default() {
    assert_eq!(Cursor::default(), Cursor::Default);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    let state = InputState::default();
    assert_eq!(state, InputState::Idle);
    assert_eq!(state.mode(), Mode::Idle);
    assert_eq!(state.drawing_polygon(), None);
    assert_eq!(state.drag_target(), None);
}

#[test]
fn drawing_reports_its_polygon() {
    let state = InputState::Drawing { polygon: 2 };
    assert_eq!(state.mode(), Mode::Drawing);
    assert_eq!(state.drawing_polygon(), Some(2));
    assert_eq!(state.drag_target(), None);
}

#[test]
fn dragging_reports_target_and_suspended_polygon() {
    let target = VertexRef::new(0, 1);
    let state = InputState::Dragging { target, resume: Some(3) };
    assert_eq!(state.mode(), Mode::Dragging);
    assert_eq!(state.drag_target(), Some(target));
    assert_eq!(state.drawing_polygon(), Some(3));
}

#[test]
fn dragging_from_idle_has_no_drawing_polygon() {
    let state = InputState::Dragging { target: VertexRef::new(0, 0), resume: None };
    assert_eq!(state.drawing_polygon(), None);
}

// =============================================================
// UiState
// =============================================================

#[test]
fn ui_state_default_shows_overlays() {
    let ui = UiState::default();
    assert!(ui.show_crosshair);
    assert!(ui.show_mouse_position);
    assert!(ui.pointer.is_none());
    assert!(ui.hover.is_none());
    assert_eq!(ui.cursor, Cursor::Default);
}
