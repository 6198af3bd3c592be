//! End-to-end drawing, history and input behaviour through the controller.

use kurbo::{Point, Rect};
use peniko::Color;
use signpad_core::{PointerInput, PointerPhase, SignpadConfig, SurfaceController};

const WIDTH: u32 = 120;
const HEIGHT: u32 = 60;

fn white() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}

fn mouse(x: f64, y: f64) -> PointerInput {
    // Canvas sits at (10, 20) in the page
    PointerInput::mouse(x + 10.0, y + 20.0, 10.0, 20.0)
}

/// Draw one stroke through `points` using mouse events.
fn draw(controller: &mut SurfaceController, points: &[(f64, f64)]) {
    let (first, rest) = points.split_first().expect("stroke needs a point");
    controller.handle_pointer(PointerPhase::Down, &mouse(first.0, first.1));
    for &(x, y) in rest {
        controller.handle_pointer(PointerPhase::Move, &mouse(x, y));
    }
    controller.handle_pointer(PointerPhase::Up, &mouse(0.0, 0.0));
}

fn strokes() -> Vec<Vec<(f64, f64)>> {
    vec![
        vec![(5.0, 5.0), (40.0, 30.0), (80.0, 10.0)],
        vec![(10.0, 50.0), (60.0, 50.0)],
        vec![(100.0, 5.0), (110.0, 55.0), (90.0, 40.0), (95.0, 20.0)],
        vec![(30.0, 30.0), (31.0, 31.0)],
    ]
}

#[test]
fn test_n_strokes_then_n_undos_returns_to_background() {
    for n in 1..=strokes().len() {
        let mut controller = SurfaceController::new(WIDTH, HEIGHT, SignpadConfig::default());
        for stroke in strokes().iter().take(n) {
            draw(&mut controller, stroke);
        }
        assert!(!controller.surface().is_filled_with(white()));

        for _ in 0..n {
            assert!(controller.undo());
        }

        assert!(controller.surface().is_filled_with(white()), "not blank after {n} undos");
        assert!(!controller.can_undo());
    }
}

#[test]
fn test_undo_then_redo_is_identity() {
    for stroke in strokes() {
        let mut controller = SurfaceController::new(WIDTH, HEIGHT, SignpadConfig::default());
        draw(&mut controller, &stroke);
        let before = controller.capture();

        controller.undo();
        controller.redo();

        assert_eq!(controller.surface(), &before);
    }
}

#[test]
fn test_stroke_after_undo_discards_redo() {
    let mut controller = SurfaceController::new(WIDTH, HEIGHT, SignpadConfig::default());
    for stroke in strokes() {
        draw(&mut controller, &stroke);
    }
    controller.undo();
    controller.undo();
    assert_eq!(controller.redo_depth(), 2);

    draw(&mut controller, &[(1.0, 1.0), (2.0, 2.0)]);

    assert!(!controller.can_redo());
    let after = controller.capture();
    assert!(!controller.redo());
    assert_eq!(controller.surface(), &after);
}

#[test]
fn test_clear_makes_undo_and_redo_noops() {
    let mut controller = SurfaceController::new(WIDTH, HEIGHT, SignpadConfig::default());
    for stroke in strokes() {
        draw(&mut controller, &stroke);
    }
    controller.undo();

    controller.clear();

    assert!(!controller.undo());
    assert!(!controller.redo());
    assert!(controller.surface().is_filled_with(white()));
}

#[test]
fn test_touch_and_mouse_resolve_to_same_point() {
    let touch = PointerInput::touch([Point::new(50.0, 60.0)], Rect::new(10.0, 20.0, 130.0, 80.0));
    let mouse = PointerInput::mouse(50.0, 60.0, 10.0, 20.0);

    assert_eq!(touch.resolve(), Some(Point::new(40.0, 40.0)));
    assert_eq!(mouse.resolve(), Some(Point::new(40.0, 40.0)));
}

#[test]
fn test_touch_and_mouse_strokes_render_identically() {
    let bounds = Rect::new(10.0, 20.0, 130.0, 80.0);
    let path = [(5.0, 5.0), (40.0, 30.0), (80.0, 10.0)];

    let mut by_mouse = SurfaceController::new(WIDTH, HEIGHT, SignpadConfig::default());
    draw(&mut by_mouse, &path);

    let mut by_touch = SurfaceController::new(WIDTH, HEIGHT, SignpadConfig::default());
    let touch = |x: f64, y: f64| PointerInput::touch([Point::new(x + 10.0, y + 20.0)], bounds);
    by_touch.handle_pointer(PointerPhase::Down, &touch(path[0].0, path[0].1));
    for &(x, y) in &path[1..] {
        by_touch.handle_pointer(PointerPhase::Move, &touch(x, y));
    }
    by_touch.handle_pointer(PointerPhase::Up, &PointerInput::touch([], bounds));

    assert_eq!(by_mouse.surface(), by_touch.surface());
}

#[test]
fn test_bounded_history_still_round_trips() {
    let config = SignpadConfig {
        history_limit: Some(2),
        ..SignpadConfig::default()
    };
    let mut controller = SurfaceController::new(WIDTH, HEIGHT, config);
    for stroke in strokes() {
        draw(&mut controller, &stroke);
    }
    let latest = controller.capture();

    assert_eq!(controller.undo_depth(), 2);
    assert!(controller.undo());
    assert!(controller.undo());
    assert!(!controller.undo());
    // Oldest strokes were folded into the base state, not lost
    assert!(!controller.surface().is_filled_with(white()));

    assert!(controller.redo());
    assert!(controller.redo());
    assert_eq!(controller.surface(), &latest);
}
