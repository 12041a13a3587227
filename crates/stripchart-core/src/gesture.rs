// File: crates/stripchart-core/src/gesture.rs
// Summary: Pan/pinch gesture state machine translating pointer parameters into viewport
// mutations.
// Notes:
// - Pan deltas are cumulative from the pan start; pinch ratios are start span over
//   current span. Both are applied to the state captured when the gesture began.
// - Once a pinch has started, pan moves are ignored until every pointer is up.

use crate::types::ViewportSize;
use crate::view::ViewportState;

/// Which lines vertical pans and pinches act on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalTarget {
    Off,
    #[default]
    AllEnabled,
    Line(usize),
}

/// Per-call context the tracker needs from the chart.
#[derive(Clone, Copy, Debug)]
pub struct GestureContext<'a> {
    pub viewport: ViewportSize,
    /// Samples available, bounds how far a pinch may widen the window.
    pub size: usize,
    pub enabled: &'a [bool],
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Panning { last_dx: f32, last_dy: f32 },
    Pinching { focal_fraction: f32, zoom_x: bool, zoom_y: bool },
}

#[derive(Clone, Debug)]
pub struct GestureTracker {
    phase: Phase,
    pointer_down: bool,
    pinch_seen: bool,
    threshold_px: f32,
    vertical: VerticalTarget,
}

impl GestureTracker {
    pub fn new(threshold_px: f32) -> Self {
        Self {
            phase: Phase::Idle,
            pointer_down: false,
            pinch_seen: false,
            threshold_px,
            vertical: VerticalTarget::default(),
        }
    }

    pub fn vertical_target(&self) -> VerticalTarget {
        self.vertical
    }

    pub fn set_vertical_target(&mut self, target: VerticalTarget) {
        self.vertical = target;
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle && !self.pointer_down
    }

    pub fn on_pan_start(&mut self, view: &mut ViewportState, _x: f32, _y: f32) {
        self.pointer_down = true;
        if self.pinch_seen {
            return;
        }
        view.begin_gesture();
        self.phase = Phase::Panning { last_dx: 0.0, last_dy: 0.0 };
        log::trace!("pan start at offset {}", view.offset());
    }

    /// `dx`/`dy` are measured from the pan start. Returns true when the viewport moved.
    pub fn on_pan_move(&mut self, view: &mut ViewportState, ctx: &GestureContext<'_>, dx: f32, dy: f32) -> bool {
        let Phase::Panning { last_dx, last_dy } = self.phase else {
            return false;
        };
        if self.pinch_seen {
            return false;
        }
        if (dx - last_dx).abs() <= self.threshold_px && (dy - last_dy).abs() <= self.threshold_px {
            return false;
        }
        self.phase = Phase::Panning { last_dx: dx, last_dy: dy };
        let mut changed = view.pan_by(dx, ctx.viewport.width);
        for line in self.vertical_lines(ctx.enabled) {
            changed |= view.pan_y_anchored(line, dy, ctx.viewport.height);
        }
        changed
    }

    /// Every pointer is up.
    pub fn on_pan_end(&mut self, view: &mut ViewportState) {
        self.pointer_down = false;
        self.pinch_seen = false;
        self.phase = Phase::Idle;
        view.end_gesture();
    }

    /// Pointer stream aborted: restore the state captured at gesture start.
    pub fn on_pan_cancel(&mut self, view: &mut ViewportState) -> bool {
        self.pointer_down = false;
        self.pinch_seen = false;
        self.phase = Phase::Idle;
        view.cancel_gesture()
    }

    pub fn on_pinch_start(
        &mut self,
        view: &mut ViewportState,
        ctx: &GestureContext<'_>,
        focal_x: f32,
        _focal_y: f32,
        span_x: f32,
        span_y: f32,
    ) {
        let focal_fraction = if ctx.viewport.width > 0.0 { focal_x / ctx.viewport.width } else { 0.5 };
        view.begin_pinch(focal_fraction);
        // A pinch with almost no extent along an axis yields a meaningless ratio there.
        self.phase = Phase::Pinching {
            focal_fraction,
            zoom_x: span_x.abs() > self.threshold_px,
            zoom_y: span_y.abs() > self.threshold_px,
        };
        self.pinch_seen = true;
        log::trace!("pinch start: focal {focal_fraction:.3}, span {span_x}x{span_y}");
    }

    /// Ratios are start span over current span per axis. Returns true when the viewport
    /// changed.
    pub fn on_pinch_update(
        &mut self,
        view: &mut ViewportState,
        ctx: &GestureContext<'_>,
        ratio_x: f32,
        ratio_y: f32,
    ) -> bool {
        let Phase::Pinching { focal_fraction, zoom_x, zoom_y } = self.phase else {
            return false;
        };
        let mut changed = false;
        if zoom_x {
            changed |= view.zoom_by(ratio_x, focal_fraction, ctx.size);
        }
        if zoom_y {
            for line in self.vertical_lines(ctx.enabled) {
                changed |= view.zoom_y_anchored(line, ratio_y);
            }
        }
        changed
    }

    /// Pan stays suppressed until the pointers are released. While a pointer is still down
    /// the gesture start state is kept so a cancel can restore it.
    pub fn on_pinch_end(&mut self, view: &mut ViewportState) {
        if matches!(self.phase, Phase::Pinching { .. }) {
            self.phase = Phase::Idle;
        }
        if self.pointer_down {
            view.end_pinch();
        } else {
            view.end_gesture();
        }
    }

    fn vertical_lines<'e>(&self, enabled: &'e [bool]) -> impl Iterator<Item = usize> + 'e {
        let target = self.vertical;
        enabled.iter().enumerate().filter_map(move |(line, &on)| {
            let wanted = match target {
                VerticalTarget::Off => false,
                VerticalTarget::AllEnabled => on,
                VerticalTarget::Line(l) => l == line,
            };
            wanted.then_some(line)
        })
    }
}
