// File: crates/stripchart-core/src/view.rs
// Summary: Viewport state: visible sample window, per-line vertical windows, and the
// pan/zoom math that gestures are translated into.
// Notes:
// - Every mutator clamps instead of failing: `offset >= 0`, `min_range <= range <= capacity`,
//   and `y_abs_min <= y_min <= y_max <= y_abs_max` hold after any call.
// - Gesture math is anchored: pans and pinches are applied to the state captured by
//   `begin_gesture`/`begin_pinch`, so cumulative gesture deltas do not compound.

use crate::config::ChartConfig;
use crate::downsample::stride_for;
use crate::geometry::clamp;
use crate::types::ViewportSize;
use crate::window::{LineWindow, RenderWindow};

/// Visible and absolute vertical bounds of one line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YWindow {
    pub min: f32,
    pub max: f32,
    pub abs_min: f32,
    pub abs_max: f32,
}

impl YWindow {
    pub fn new(min: f32, max: f32, abs_min: f32, abs_max: f32) -> Self {
        let mut w = Self { min, max, abs_min, abs_max };
        w.contain();
        w
    }

    pub fn range(&self) -> f32 {
        self.max - self.min
    }

    pub fn abs_range(&self) -> f32 {
        self.abs_max - self.abs_min
    }

    /// Force `abs_min <= min <= max <= abs_max`, shifting before shrinking.
    fn contain(&mut self) {
        if self.abs_min > self.abs_max {
            std::mem::swap(&mut self.abs_min, &mut self.abs_max);
        }
        if self.min > self.max {
            std::mem::swap(&mut self.min, &mut self.max);
        }
        let range = self.range().min(self.abs_range());
        self.place(self.min, range);
    }

    /// Position a window of `range` starting at `min`, translated as a whole back inside
    /// the absolute bounds.
    fn place(&mut self, min: f32, range: f32) {
        if min < self.abs_min {
            self.min = self.abs_min;
            self.max = self.abs_min + range;
        } else if min + range > self.abs_max {
            self.max = self.abs_max;
            self.min = self.abs_max - range;
        } else {
            self.min = min;
            self.max = min + range;
        }
        self.min = self.min.max(self.abs_min);
        self.max = self.max.min(self.abs_max).max(self.min);
    }
}

/// State captured when the first pointer went down; cancel restores it.
#[derive(Clone, Debug)]
struct GestureAnchor {
    offset: usize,
    range: usize,
    y: Vec<YWindow>,
}

/// State captured at pinch start; pinch ratios apply to it.
#[derive(Clone, Debug)]
struct PinchAnchor {
    range: usize,
    focal_fraction: f32,
    focal_sample: usize,
    y: Vec<YWindow>,
}

#[derive(Clone, Debug)]
pub struct ViewportState {
    offset: usize,
    range: usize,
    stride: f64,
    min_range: usize,
    capacity: usize,
    max_vertices: usize,
    drag_sensitivity: f32,
    pinch_damping: f32,
    min_y_range_fraction: f32,
    y: Vec<YWindow>,
    anchor: Option<GestureAnchor>,
    pinch: Option<PinchAnchor>,
}

impl ViewportState {
    /// `config` is expected to have passed [`ChartConfig::validate`].
    pub fn from_config(config: &ChartConfig) -> Self {
        let mut view = Self {
            offset: 0,
            range: config.initial_range,
            stride: 1.0,
            min_range: config.min_visible_range,
            capacity: config.max_samples,
            max_vertices: config.max_visible_vertices,
            drag_sensitivity: config.drag_sensitivity,
            pinch_damping: config.pinch_damping,
            min_y_range_fraction: config.min_y_range_fraction,
            y: config
                .lines
                .iter()
                .map(|l| YWindow::new(l.y_min, l.y_max, l.y_abs_min, l.y_abs_max))
                .collect(),
            anchor: None,
            pinch: None,
        };
        view.set_range(config.initial_range);
        view
    }

    pub fn offset(&self) -> usize { self.offset }
    pub fn range(&self) -> usize { self.range }
    pub fn stride(&self) -> f64 { self.stride }
    pub fn min_range(&self) -> usize { self.min_range }
    pub fn capacity(&self) -> usize { self.capacity }
    pub fn y_window(&self, line: usize) -> Option<YWindow> { self.y.get(line).copied() }
    pub fn y_windows(&self) -> &[YWindow] { &self.y }
    pub fn in_gesture(&self) -> bool { self.anchor.is_some() || self.pinch.is_some() }

    /// First and one-past-last sample index of the window.
    pub fn visible_window(&self) -> (usize, usize) {
        (self.offset, self.offset + self.range)
    }

    /// Immutable copy of everything a render pass reads. `sizes` and `enabled` are indexed
    /// by line; lines missing from either are treated as empty and disabled.
    pub fn snapshot(&self, sizes: &[usize], enabled: &[bool], viewport: ViewportSize) -> RenderWindow {
        let lines = self
            .y
            .iter()
            .enumerate()
            .map(|(line, y)| LineWindow {
                enabled: enabled.get(line).copied().unwrap_or(false),
                size: sizes.get(line).copied().unwrap_or(0),
                y_min: y.min,
                y_max: y.max,
            })
            .collect();
        RenderWindow {
            offset: self.offset,
            range: self.range,
            stride: self.stride,
            viewport,
            lines,
        }
    }

    pub fn set_range(&mut self, new_range: usize) {
        self.range = clamp(new_range, self.min_range, self.capacity);
        self.stride = stride_for(self.range, self.max_vertices);
    }

    /// Offsets past the last sample are allowed; they render as absent samples.
    pub fn set_offset(&mut self, new_offset: i64) {
        self.offset = new_offset.max(0) as usize;
    }

    /// Put the newest of `size` samples at the right edge.
    pub fn follow(&mut self, size: usize) {
        self.offset = size.saturating_sub(self.range);
    }

    pub fn begin_gesture(&mut self) {
        self.anchor = Some(GestureAnchor { offset: self.offset, range: self.range, y: self.y.clone() });
        self.pinch = None;
    }

    /// Start a pinch centred at `focal_fraction` (0 = left edge, 1 = right edge). A
    /// gesture already in progress keeps its start state for [`Self::cancel_gesture`].
    pub fn begin_pinch(&mut self, focal_fraction: f32) {
        let focal_fraction = if focal_fraction.is_finite() { focal_fraction.clamp(0.0, 1.0) } else { 0.5 };
        if self.anchor.is_none() {
            self.begin_gesture();
        }
        self.pinch = Some(PinchAnchor {
            range: self.range,
            focal_fraction,
            focal_sample: self.offset + (focal_fraction * self.range as f32).round() as usize,
            y: self.y.clone(),
        });
    }

    /// Finish the pinch; the gesture start state stays until [`Self::end_gesture`].
    pub fn end_pinch(&mut self) {
        self.pinch = None;
    }

    pub fn end_gesture(&mut self) {
        self.anchor = None;
        self.pinch = None;
    }

    /// Roll back to the state captured when the gesture began. Returns false when no
    /// gesture is active.
    pub fn cancel_gesture(&mut self) -> bool {
        self.pinch = None;
        match self.anchor.take() {
            Some(anchor) => {
                self.offset = anchor.offset;
                self.set_range(anchor.range);
                self.y = anchor.y;
                true
            }
            None => false,
        }
    }

    /// Horizontal drag by `dx` pixels (positive = content dragged right, older samples
    /// come into view).
    pub fn pan_by(&mut self, dx: f32, viewport_width: f32) -> bool {
        if !(viewport_width > 0.0) || !dx.is_finite() {
            return false;
        }
        let base = self.anchor.as_ref().map_or(self.offset, |a| a.offset);
        let shift = (self.drag_sensitivity as f64 * dx as f64 * self.range as f64 / viewport_width as f64).round();
        // Float to int casts saturate, so extreme drags pin to 0 or i64::MAX.
        let target = (base as f64 - shift).clamp(0.0, i64::MAX as f64) as i64;
        let before = self.offset;
        self.set_offset(target);
        self.offset != before
    }

    /// Pinch zoom. `span_ratio` is start span over current span, so values above 1 widen
    /// the window. The sample under the focal point stays put.
    pub fn zoom_by(&mut self, span_ratio: f32, focal_fraction: f32, size: usize) -> bool {
        if !(span_ratio.is_finite() && span_ratio > 0.0) {
            return false;
        }
        let pinch = self.pinch.as_ref().map(|p| (p.range, p.focal_fraction, p.focal_sample));
        let (base_range, focal_fraction, focal_sample) = match pinch {
            Some(anchored) => anchored,
            None => {
                let ff = if focal_fraction.is_finite() { focal_fraction.clamp(0.0, 1.0) } else { 0.5 };
                (self.range, ff, self.offset + (ff * self.range as f32).round() as usize)
            }
        };
        let scale = 1.0 + (span_ratio as f64 - 1.0) * self.pinch_damping as f64;
        let upper = (size + self.min_range).min(self.capacity);
        let wanted = (base_range as f64 * scale).round().max(0.0) as usize;
        let before = (self.offset, self.range);

        self.set_range(clamp(wanted, self.min_range, upper));
        let left = (focal_fraction * self.range as f32).round() as i64;
        self.set_offset(focal_sample as i64 - left);
        before != (self.offset, self.range)
    }

    /// Vertical zoom of `line` by `span_ratio` (values above 1 widen the window), relative
    /// to the current window.
    pub fn zoom_y(&mut self, line: usize, span_ratio: f32) -> bool {
        match self.y.get(line).copied() {
            Some(base) => self.zoom_y_from(line, base, span_ratio),
            None => false,
        }
    }

    /// Vertical zoom relative to the window captured at gesture start.
    pub fn zoom_y_anchored(&mut self, line: usize, span_ratio: f32) -> bool {
        match self.anchored_y(line) {
            Some(base) => self.zoom_y_from(line, base, span_ratio),
            None => false,
        }
    }

    fn zoom_y_from(&mut self, line: usize, base: YWindow, span_ratio: f32) -> bool {
        if !(span_ratio.is_finite() && span_ratio > 0.0) {
            return false;
        }
        let Some(current) = self.y.get_mut(line) else { return false };
        let floor = self.min_y_range_fraction * base.abs_range();
        let range = (base.range() * span_ratio).clamp(floor, base.abs_range());
        let center = (base.abs_min + base.abs_max) * 0.5;
        let before = *current;
        current.place(center - range * 0.5, range);
        *current != before
    }

    /// Vertical drag of `line` by `dy` pixels, relative to the current window.
    pub fn pan_y(&mut self, line: usize, dy: f32, viewport_height: f32) -> bool {
        match self.y.get(line).copied() {
            Some(base) => self.pan_y_from(line, base, dy, viewport_height),
            None => false,
        }
    }

    /// Vertical drag relative to the window captured at gesture start.
    pub fn pan_y_anchored(&mut self, line: usize, dy: f32, viewport_height: f32) -> bool {
        match self.anchored_y(line) {
            Some(base) => self.pan_y_from(line, base, dy, viewport_height),
            None => false,
        }
    }

    fn pan_y_from(&mut self, line: usize, base: YWindow, dy: f32, viewport_height: f32) -> bool {
        if !(viewport_height > 0.0) || !dy.is_finite() {
            return false;
        }
        let Some(current) = self.y.get_mut(line) else { return false };
        let range = base.range();
        let delta = dy * range / viewport_height;
        let before = *current;
        current.place(base.min + delta, range);
        *current != before
    }

    /// Replace the visible window of `line`; it is clamped into the absolute bounds.
    pub fn set_y_window(&mut self, line: usize, y_min: f32, y_max: f32) -> bool {
        let Some(w) = self.y.get_mut(line) else { return false };
        *w = YWindow::new(y_min, y_max, w.abs_min, w.abs_max);
        true
    }

    /// Replace the absolute bounds of `line`, pulling the visible window inside them.
    pub fn set_y_abs(&mut self, line: usize, y_abs_min: f32, y_abs_max: f32) -> bool {
        let Some(w) = self.y.get_mut(line) else { return false };
        *w = YWindow::new(w.min, w.max, y_abs_min, y_abs_max);
        true
    }

    fn anchored_y(&self, line: usize) -> Option<YWindow> {
        let anchored = match (&self.pinch, &self.anchor) {
            (Some(p), _) => &p.y,
            (None, Some(a)) => &a.y,
            (None, None) => &self.y,
        };
        anchored.get(line).copied()
    }
}
