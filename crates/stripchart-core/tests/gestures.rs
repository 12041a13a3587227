// File: crates/stripchart-core/tests/gestures.rs
// Purpose: Gesture tracker: pan hysteresis, pinch suppressing pan, vertical targets.

use stripchart_core::{
    ChartConfig, GestureContext, GestureTracker, LineConfig, VerticalTarget, ViewportSize, ViewportState,
};

fn setup() -> (ViewportState, GestureTracker, Vec<bool>) {
    let cfg = ChartConfig {
        lines: vec![
            LineConfig::new("a", -4.0, 4.0).with_window(-1.0, 1.0),
            LineConfig::new("b", -2.0, 2.0).with_window(-1.0, 1.0),
        ],
        ..ChartConfig::default()
    };
    let mut view = ViewportState::from_config(&cfg);
    view.set_offset(500);
    (view, GestureTracker::new(cfg.pan_threshold_px), vec![true, true])
}

fn ctx(enabled: &[bool]) -> GestureContext<'_> {
    GestureContext { viewport: ViewportSize::new(1000.0, 500.0), size: 2000, enabled }
}

#[test]
fn small_moves_are_ignored() {
    let (mut view, mut tracker, enabled) = setup();
    tracker.set_vertical_target(VerticalTarget::Off);
    tracker.on_pan_start(&mut view, 10.0, 10.0);
    assert!(!tracker.on_pan_move(&mut view, &ctx(&enabled), 5.0, -5.0));
    assert_eq!(view.offset(), 500);

    assert!(tracker.on_pan_move(&mut view, &ctx(&enabled), 50.0, 0.0));
    assert_eq!(view.offset(), 480);
    // Hysteresis is measured from the last applied move.
    assert!(!tracker.on_pan_move(&mut view, &ctx(&enabled), 55.0, 0.0));
    assert_eq!(view.offset(), 480);
    tracker.on_pan_end(&mut view);
    assert!(tracker.is_idle());
}

#[test]
fn pinch_suppresses_pan_until_all_pointers_up() {
    let (mut view, mut tracker, enabled) = setup();
    tracker.on_pan_start(&mut view, 100.0, 100.0);
    tracker.on_pinch_start(&mut view, &ctx(&enabled), 500.0, 250.0, 300.0, 2.0);
    assert!(tracker.on_pinch_update(&mut view, &ctx(&enabled), 2.0, 1.0));
    assert_eq!(view.range(), 300);
    tracker.on_pinch_end(&mut view);

    let offset = view.offset();
    assert!(!tracker.on_pan_move(&mut view, &ctx(&enabled), 400.0, 0.0));
    assert_eq!(view.offset(), offset);

    tracker.on_pan_end(&mut view);
    tracker.on_pan_start(&mut view, 0.0, 0.0);
    assert!(tracker.on_pan_move(&mut view, &ctx(&enabled), 400.0, 0.0));
    assert!(view.offset() < offset);
}

#[test]
fn pinch_with_flat_vertical_span_leaves_y_alone() {
    let (mut view, mut tracker, enabled) = setup();
    tracker.on_pinch_start(&mut view, &ctx(&enabled), 500.0, 250.0, 300.0, 2.0);
    tracker.on_pinch_update(&mut view, &ctx(&enabled), 1.0, 4.0);
    let y = view.y_window(0).expect("line 0");
    assert_eq!((y.min, y.max), (-1.0, 1.0));
}

#[test]
fn vertical_target_selects_lines() {
    let (mut view, mut tracker, enabled) = setup();
    tracker.set_vertical_target(VerticalTarget::Line(1));
    tracker.on_pinch_start(&mut view, &ctx(&enabled), 500.0, 250.0, 300.0, 300.0);
    assert!(tracker.on_pinch_update(&mut view, &ctx(&enabled), 1.0, 0.5));
    tracker.on_pinch_end(&mut view);

    let a = view.y_window(0).expect("line 0");
    let b = view.y_window(1).expect("line 1");
    assert_eq!((a.min, a.max), (-1.0, 1.0));
    assert_eq!((b.min, b.max), (-0.5, 0.5));
}

#[test]
fn disabled_lines_are_skipped_by_vertical_pan() {
    let (mut view, mut tracker, _) = setup();
    let enabled = vec![false, true];
    tracker.on_pan_start(&mut view, 0.0, 0.0);
    tracker.on_pan_move(&mut view, &ctx(&enabled), 0.0, 250.0);
    tracker.on_pan_end(&mut view);

    let a = view.y_window(0).expect("line 0");
    let b = view.y_window(1).expect("line 1");
    assert_eq!((a.min, a.max), (-1.0, 1.0));
    // 250 px of a 500 px viewport is half of the 2.0 wide window.
    assert_eq!((b.min, b.max), (0.0, 2.0));
}

#[test]
fn cancel_restores_viewport() {
    let (mut view, mut tracker, enabled) = setup();
    tracker.on_pan_start(&mut view, 0.0, 0.0);
    tracker.on_pan_move(&mut view, &ctx(&enabled), 300.0, 100.0);
    assert_ne!(view.offset(), 500);
    assert!(tracker.on_pan_cancel(&mut view));
    assert_eq!(view.offset(), 500);
    let a = view.y_window(0).expect("line 0");
    assert_eq!((a.min, a.max), (-1.0, 1.0));
    assert!(tracker.is_idle());
}

#[test]
fn cancel_after_pinch_restores_touch_down_state() {
    let (mut view, mut tracker, enabled) = setup();
    tracker.on_pan_start(&mut view, 500.0, 250.0);
    tracker.on_pinch_start(&mut view, &ctx(&enabled), 500.0, 250.0, 400.0, 300.0);
    assert!(tracker.on_pinch_update(&mut view, &ctx(&enabled), 2.0, 2.0));
    tracker.on_pinch_end(&mut view);
    assert_ne!(view.range(), 200);

    assert!(tracker.on_pan_cancel(&mut view));
    assert_eq!(view.offset(), 500);
    assert_eq!(view.range(), 200);
    let a = view.y_window(0).expect("line 0");
    assert_eq!((a.min, a.max), (-1.0, 1.0));
    assert!(tracker.is_idle());
}

#[test]
fn pinch_without_pointer_down_ends_the_gesture() {
    let (mut view, mut tracker, enabled) = setup();
    tracker.on_pinch_start(&mut view, &ctx(&enabled), 500.0, 250.0, 400.0, 0.0);
    tracker.on_pinch_update(&mut view, &ctx(&enabled), 0.5, 1.0);
    tracker.on_pinch_end(&mut view);
    assert!(!view.in_gesture());
}
