use super::*;
use crate::convert::{PLACEHOLDER_TEXT, TextConverter};
use crate::draw::{PageSize, PenStyle, color::BLACK, color::RED};
use crate::input::events::{PointerEvent, TouchPoint};
use crate::input::stroke::Stroke;
use crate::input::tool::Tool;
use crate::input::transform::{PanOffset, ViewportRect};
use crate::util::Point;

const WHITE_PX: [u8; 4] = [255, 255, 255, 255];
const BLACK_PX: [u8; 4] = [0, 0, 0, 255];

fn create_test_session() -> DrawingSession {
    let settings = SessionSettings {
        page: PageSize::new(200, 200),
        ..SessionSettings::default()
    };
    let mut session = DrawingSession::new(settings);
    assert!(session.initialize_surface());
    session
}

/// Presses at the first point, drags through the rest, then releases.
fn draw_stroke(session: &mut DrawingSession, points: &[(f64, f64)]) {
    let (x0, y0) = points[0];
    session.on_pointer_down(x0, y0);
    for &(x, y) in &points[1..] {
        session.on_pointer_move(x, y);
    }
    session.on_pointer_up();
}

fn horizontal_stroke(y: f64, count: usize) -> Vec<(f64, f64)> {
    (0..count).map(|i| (20.0 + i as f64 * 20.0, y)).collect()
}

fn pixel(session: &mut DrawingSession, x: u32, y: u32) -> [u8; 4] {
    session
        .surface_mut()
        .and_then(|surface| surface.pixel_at(x, y))
        .expect("surface is ready")
}

#[test]
fn test_session_starts_with_defaults() {
    let session = create_test_session();
    let tools = session.tool_state();
    assert_eq!(tools.tool, Tool::Pen);
    assert_eq!(tools.color, BLACK);
    assert_eq!(tools.brush_size, 2.0);
    assert_eq!(tools.pen_style, PenStyle::Ballpoint);
    assert_eq!(session.view().zoom, 1.0);
    assert_eq!(session.view().pan_offset, PanOffset::default());

    // Blank page is the first history entry
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history().index(), Some(0));
    assert!(session.converted_text().is_empty());
}

#[test]
fn test_initialize_surface_is_idempotent() {
    let mut session = create_test_session();
    assert!(session.initialize_surface());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_five_point_stroke_is_discarded() {
    let mut session = create_test_session();
    draw_stroke(&mut session, &horizontal_stroke(50.0, 5));

    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history().index(), Some(0));
    assert!(session.converted_text().is_empty());
    assert!(!session.is_capturing());
}

#[test]
fn test_six_point_stroke_is_committed() {
    let mut session = create_test_session();
    draw_stroke(&mut session, &horizontal_stroke(50.0, 6));

    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history().index(), Some(1));
    assert_eq!(session.converted_text(), PLACEHOLDER_TEXT);
    assert_eq!(pixel(&mut session, 60, 50), BLACK_PX);
}

#[test]
fn test_history_grows_with_each_commit() {
    let mut session = create_test_session();
    for k in 1..=4 {
        draw_stroke(&mut session, &horizontal_stroke(20.0 + k as f64 * 30.0, 6));
        assert_eq!(session.history().index(), Some(k));
        assert_eq!(session.history().len(), k + 1);
    }
    assert_eq!(session.converted_text(), PLACEHOLDER_TEXT.repeat(4));
}

#[test]
fn test_undo_restores_previous_page() {
    let mut session = create_test_session();
    draw_stroke(&mut session, &horizontal_stroke(50.0, 6));
    assert_eq!(pixel(&mut session, 60, 50), BLACK_PX);

    assert!(session.undo());
    assert_eq!(session.history().index(), Some(0));
    assert_eq!(pixel(&mut session, 60, 50), WHITE_PX);
}

#[test]
fn test_undo_at_first_entry_leaves_surface_alone() {
    let mut session = create_test_session();

    // A discarded tap still leaves ink behind; undo must not wipe it.
    draw_stroke(&mut session, &horizontal_stroke(50.0, 3));
    assert_eq!(pixel(&mut session, 40, 50), BLACK_PX);

    for _ in 0..3 {
        assert!(!session.undo());
        assert_eq!(session.history().index(), Some(0));
    }
    assert_eq!(pixel(&mut session, 40, 50), BLACK_PX);
}

#[test]
fn test_commit_after_undo_drops_undone_entry() {
    // Linear undo: there is no redo, the undone page is unrecoverable.
    let mut session = create_test_session();
    draw_stroke(&mut session, &horizontal_stroke(50.0, 6));
    let first_commit = session.history().current().cloned().unwrap();

    session.undo();
    draw_stroke(&mut session, &horizontal_stroke(150.0, 6));

    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history().index(), Some(1));
    assert!(!session.history().entries().contains(&first_commit));
    assert_eq!(pixel(&mut session, 60, 50), WHITE_PX);
    assert_eq!(pixel(&mut session, 60, 150), BLACK_PX);
}

#[test]
fn test_zoom_is_clamped() {
    let mut session = create_test_session();
    session.set_zoom(10.0);
    assert_eq!(session.view().zoom, 3.0);
    session.set_zoom(0.1);
    assert_eq!(session.view().zoom, 0.5);
    session.set_zoom(f64::NAN);
    assert_eq!(session.view().zoom, 0.5);
}

#[test]
fn test_zoom_steps() {
    let mut session = create_test_session();
    session.zoom_in();
    assert!((session.view().zoom - 1.1).abs() < 1e-9);
    session.zoom_out();
    session.zoom_out();
    assert!((session.view().zoom - 0.9).abs() < 1e-9);

    for _ in 0..40 {
        session.zoom_in();
    }
    assert_eq!(session.view().zoom, 3.0);
}

#[test]
fn test_brush_size_is_clamped() {
    let mut session = create_test_session();
    session.set_brush_size(50.0);
    assert_eq!(session.tool_state().brush_size, 20.0);
    session.set_brush_size(0.0);
    assert_eq!(session.tool_state().brush_size, 1.0);
    session.set_brush_size(f64::INFINITY);
    assert_eq!(session.tool_state().brush_size, 1.0);
    assert_eq!(session.surface().unwrap().style().width, 1.0);
}

#[test]
fn test_style_rebuilds_on_change() {
    let mut session = create_test_session();
    assert!(session.surface().unwrap().style().glow.is_none());

    session.set_pen_style(PenStyle::Fountain);
    let glow = session.surface().unwrap().style().glow.unwrap();
    assert_eq!(glow.width, 1.0);

    assert!(session.set_color("#ff0000"));
    assert_eq!(session.surface().unwrap().style().color, RED);
    assert_eq!(session.surface().unwrap().style().glow.unwrap().color.r, 1.0);

    session.set_pen_style(PenStyle::Marker);
    assert!(session.surface().unwrap().style().glow.is_none());
}

#[test]
fn test_invalid_color_is_ignored() {
    let mut session = create_test_session();
    assert!(!session.set_color("#zzzzzz"));
    assert_eq!(session.tool_state().color, BLACK);
}

#[test]
fn test_pointer_maps_through_viewport_and_zoom() {
    let mut session = DrawingSession::new(SessionSettings::default());
    assert!(session.initialize_surface());
    session.set_viewport(ViewportRect::new(0.0, 0.0, 500.0, 500.0));
    session.set_zoom(2.0);
    session.set_pan_offset(PanOffset::new(50.0, 0.0));

    session.on_pointer_down(150.0, 100.0);
    let start = session.recorder.points()[0];
    assert!((start.x - 248.0).abs() < 1e-9);
    assert!((start.y - 350.8).abs() < 1e-9);
}

#[test]
fn test_pan_drag_moves_offset_without_stroke() {
    let mut session = create_test_session();
    session.set_tool(Tool::Pan);

    session.on_pointer_down(100.0, 100.0);
    session.on_pointer_move(110.0, 120.0);
    assert_eq!(session.view().pan_offset, PanOffset::new(10.0, 20.0));
    assert!(!session.is_capturing());

    session.on_pointer_up();
    session.on_pointer_move(180.0, 180.0);
    assert_eq!(session.view().pan_offset, PanOffset::new(10.0, 20.0));
    assert_eq!(session.history().len(), 1);
    assert!(session.converted_text().is_empty());
}

#[test]
fn test_pan_drag_accumulates_screen_pixels() {
    // A4 page shown in a 500px viewport: canvas scale is 4.96, the pan is not
    let mut session = DrawingSession::new(SessionSettings::default());
    session.set_viewport(ViewportRect::new(0.0, 0.0, 500.0, 500.0));
    session.set_zoom(2.0);
    session.set_tool(Tool::Pan);

    session.on_pointer_down(100.0, 100.0);
    for step in 1..=3 {
        session.on_pointer_move(100.0 + step as f64 * 10.0, 100.0 - step as f64 * 5.0);
    }
    assert_eq!(session.view().pan_offset, PanOffset::new(30.0, -15.0));

    // Second drag continues from the current offset
    session.on_pointer_up();
    session.on_pointer_down(0.0, 0.0);
    session.on_pointer_move(-5.0, 5.0);
    session.on_pointer_up();
    assert_eq!(session.view().pan_offset, PanOffset::new(25.0, -10.0));
}

#[test]
fn test_failed_restore_keeps_history_index() {
    let mut session = create_test_session();
    session
        .history
        .push(crate::history::HistoryEntry::from_png(vec![0, 1, 2, 3]));
    draw_stroke(&mut session, &horizontal_stroke(50.0, 6));
    assert_eq!(session.history().index(), Some(2));

    // Restoring the corrupt entry fails: index and pixels stay put
    assert!(!session.undo());
    assert_eq!(session.history().index(), Some(2));
    assert_eq!(pixel(&mut session, 60, 50), BLACK_PX);
}

#[test]
fn test_eraser_removes_ink() {
    let mut session = create_test_session();
    draw_stroke(&mut session, &horizontal_stroke(50.0, 6));

    session.set_tool(Tool::Eraser);
    session.set_brush_size(8.0);
    draw_stroke(&mut session, &horizontal_stroke(50.0, 6));

    assert_eq!(pixel(&mut session, 60, 50)[3], 0);
    assert_eq!(session.history().len(), 3);
}

#[test]
fn test_placeholder_tools_do_nothing() {
    for tool in [Tool::Rectangle, Tool::Circle] {
        let mut session = create_test_session();
        session.set_tool(tool);
        draw_stroke(&mut session, &horizontal_stroke(50.0, 8));

        assert!(!session.is_capturing());
        assert_eq!(session.history().len(), 1);
        assert_eq!(pixel(&mut session, 60, 50), WHITE_PX);
        assert!(session.converted_text().is_empty());
    }
}

#[test]
fn test_input_ignored_until_surface_ready() {
    let mut session = DrawingSession::new(SessionSettings {
        page: PageSize::new(100, 100),
        ..SessionSettings::default()
    });
    assert!(!session.is_ready());

    draw_stroke(&mut session, &horizontal_stroke(50.0, 8));
    assert!(!session.is_capturing());
    assert!(session.history().is_empty());
    assert!(session.converted_text().is_empty());
    assert!(!session.undo());

    // Style changes are still recorded for when the surface arrives
    session.set_pen_style(PenStyle::Fountain);
    assert!(session.initialize_surface());
    assert!(session.surface().unwrap().style().glow.is_some());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_touch_events_draw_like_pointer() {
    let mut session = create_test_session();
    let touch = |x: f64, y: f64| vec![TouchPoint { x, y }];

    session.handle_pointer_event(&PointerEvent::TouchStart {
        touches: touch(20.0, 50.0),
    });
    for i in 1..6 {
        session.handle_pointer_event(&PointerEvent::TouchMove {
            touches: touch(20.0 + i as f64 * 20.0, 50.0),
        });
    }
    session.handle_pointer_event(&PointerEvent::TouchMove { touches: vec![] });
    session.handle_pointer_event(&PointerEvent::TouchEnd);

    assert_eq!(session.history().len(), 2);
    assert_eq!(pixel(&mut session, 60, 50), BLACK_PX);
}

#[test]
fn test_pointer_leave_finishes_stroke() {
    let mut session = create_test_session();
    session.handle_pointer_event(&PointerEvent::Down { x: 20.0, y: 50.0 });
    for i in 1..6 {
        session.handle_pointer_event(&PointerEvent::Move {
            x: 20.0 + i as f64 * 20.0,
            y: 50.0,
        });
    }
    session.handle_pointer_event(&PointerEvent::Leave);

    assert!(!session.is_capturing());
    assert_eq!(session.history().len(), 2);
}

#[test]
fn test_undo_drops_stroke_in_progress() {
    let mut session = create_test_session();
    session.on_pointer_down(20.0, 50.0);
    session.on_pointer_move(40.0, 50.0);
    assert!(session.is_capturing());

    session.undo();
    assert!(!session.is_capturing());
}

#[test]
fn test_clear_resets_session() {
    let mut session = create_test_session();
    session.set_color("#ff0000");
    session.set_brush_size(9.0);
    session.set_zoom(2.0);
    session.set_pan_offset(PanOffset::new(30.0, 40.0));
    session.set_tool(Tool::Eraser);
    session.set_tool(Tool::Pen);
    draw_stroke(&mut session, &horizontal_stroke(50.0, 6));

    session.clear();

    assert!(session.history().is_empty());
    assert_eq!(session.history().index(), None);
    assert!(session.converted_text().is_empty());
    assert_eq!(session.tool_state().color, BLACK);
    assert_eq!(session.tool_state().brush_size, 2.0);
    assert_eq!(session.view().zoom, 1.0);
    assert_eq!(session.view().pan_offset, PanOffset::default());
    assert_eq!(session.surface().unwrap().style().color, BLACK);
    assert_eq!(pixel(&mut session, 60, 50), WHITE_PX);

    // First commit after a clear lands at index 0
    draw_stroke(&mut session, &horizontal_stroke(80.0, 6));
    assert_eq!(session.history().index(), Some(0));
}

struct PointCounter;

impl TextConverter for PointCounter {
    fn convert(&mut self, stroke: &Stroke) -> String {
        format!("{}:{}\n", stroke.tool(), stroke.len())
    }
}

#[test]
fn test_custom_converter_receives_committed_strokes() {
    let settings = SessionSettings {
        page: PageSize::new(200, 200),
        ..SessionSettings::default()
    };
    let mut session = DrawingSession::new(settings).with_converter(Box::new(PointCounter));
    session.initialize_surface();

    draw_stroke(&mut session, &horizontal_stroke(50.0, 7));
    draw_stroke(&mut session, &horizontal_stroke(80.0, 2));
    session.set_tool(Tool::Eraser);
    draw_stroke(&mut session, &horizontal_stroke(50.0, 6));

    assert_eq!(session.converted_text(), "pen:7\neraser:6\n");
}

#[test]
fn test_settings_from_config() {
    let mut config = crate::config::Config::default();
    config.drawing.default_brush_size = 4.0;
    config.page.min_stroke_points = 2;
    config.page.width = 120;
    config.page.height = 90;

    let settings = SessionSettings::from_config(&config);
    assert_eq!(settings.default_brush_size, 4.0);
    assert_eq!(settings.page, PageSize::new(120, 90));

    let mut session = DrawingSession::new(settings);
    session.initialize_surface();
    draw_stroke(&mut session, &[(10.0, 10.0), (20.0, 10.0), (30.0, 10.0)]);
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.canvas_point(5.0, 5.0), Point::new(5.0, 5.0));
}
