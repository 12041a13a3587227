// File: crates/stripchart-core/src/config.rs
// Summary: Per-chart configuration (lines, capacities, gesture tuning) and validation.

use crate::error::ConfigError;
use crate::types::ViewportSize;

/// One plotted channel. `color` is an opaque ARGB style token handed to the renderer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct LineConfig {
    pub label: String,
    pub color: u32,
    pub enabled: bool,
    pub y_min: f32,
    pub y_max: f32,
    pub y_abs_min: f32,
    pub y_abs_max: f32,
}

impl LineConfig {
    /// Line whose visible window starts out equal to its absolute bounds.
    pub fn new(label: impl Into<String>, y_abs_min: f32, y_abs_max: f32) -> Self {
        Self {
            label: label.into(),
            color: 0xFF40A0FF,
            enabled: true,
            y_min: y_abs_min,
            y_max: y_abs_max,
            y_abs_min,
            y_abs_max,
        }
    }

    pub fn with_window(mut self, y_min: f32, y_max: f32) -> Self {
        self.y_min = y_min;
        self.y_max = y_max;
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Bounds must be finite, the window non-empty and inside the absolute bounds.
    pub fn validate(&self, line: usize) -> Result<(), ConfigError> {
        check_bounds(line, self.y_min, self.y_max, self.y_abs_min, self.y_abs_max)
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self::new("", -1.0, 1.0)
    }
}

pub(crate) fn check_bounds(
    line: usize,
    y_min: f32,
    y_max: f32,
    y_abs_min: f32,
    y_abs_max: f32,
) -> Result<(), ConfigError> {
    let finite = [y_min, y_max, y_abs_min, y_abs_max].iter().all(|v| v.is_finite());
    if finite && y_min < y_max && y_abs_min <= y_min && y_max <= y_abs_max {
        Ok(())
    } else {
        Err(ConfigError::LineBounds { line, y_min, y_max, y_abs_min, y_abs_max })
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ChartConfig {
    pub lines: Vec<LineConfig>,
    /// Sample capacity per line; appends past it are ignored.
    pub max_samples: usize,
    /// Upper bound on polyline points per line; wider windows are stride-sampled.
    pub max_visible_vertices: usize,
    pub min_visible_range: usize,
    pub initial_range: usize,
    /// Samples scrolled per window-width of horizontal drag.
    pub drag_sensitivity: f32,
    /// Scales raw pinch ratios before they are applied to the range.
    pub pinch_damping: f32,
    /// Smallest vertical window as a fraction of the absolute span.
    pub min_y_range_fraction: f32,
    /// Drag distance (px) a pan must move past the last applied move before it takes effect.
    pub pan_threshold_px: f32,
    /// Keep the newest sample at the right edge as data arrives.
    pub follow_latest: bool,
    /// Render only the newest queued request instead of every request in order.
    pub coalesce_requests: bool,
    pub viewport: ViewportSize,
}

impl ChartConfig {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lines.is_empty() {
            return Err(ConfigError::NoLines);
        }
        if self.max_visible_vertices < 2 {
            return Err(ConfigError::TooFewVertices(self.max_visible_vertices));
        }
        if self.min_visible_range < 2 {
            return Err(ConfigError::RangeTooSmall(self.min_visible_range));
        }
        if self.min_visible_range > self.max_samples {
            return Err(ConfigError::RangeExceedsCapacity {
                min: self.min_visible_range,
                max: self.max_samples,
            });
        }
        if self.initial_range < self.min_visible_range || self.initial_range > self.max_samples {
            return Err(ConfigError::InitialRange {
                range: self.initial_range,
                min: self.min_visible_range,
                max: self.max_samples,
            });
        }
        if !(self.drag_sensitivity.is_finite() && self.drag_sensitivity > 0.0) {
            return Err(ConfigError::Parameter {
                name: "drag_sensitivity",
                expected: "finite and positive",
                value: self.drag_sensitivity,
            });
        }
        if !(self.pinch_damping > 0.0 && self.pinch_damping <= 1.0) {
            return Err(ConfigError::Parameter {
                name: "pinch_damping",
                expected: "within (0, 1]",
                value: self.pinch_damping,
            });
        }
        if !(self.min_y_range_fraction > 0.0 && self.min_y_range_fraction <= 1.0) {
            return Err(ConfigError::Parameter {
                name: "min_y_range_fraction",
                expected: "within (0, 1]",
                value: self.min_y_range_fraction,
            });
        }
        if !(self.pan_threshold_px.is_finite() && self.pan_threshold_px >= 0.0) {
            return Err(ConfigError::Parameter {
                name: "pan_threshold_px",
                expected: "finite and non-negative",
                value: self.pan_threshold_px,
            });
        }
        if self.viewport.is_empty() {
            return Err(ConfigError::Viewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for (line, cfg) in self.lines.iter().enumerate() {
            cfg.validate(line)?;
        }
        Ok(())
    }
}

impl Default for ChartConfig {
    /// Three lines with widening amplitude, 2000 samples, a 200 sample window.
    fn default() -> Self {
        Self {
            lines: vec![
                LineConfig::new("line 0", -1.0, 1.0).with_color(0xFFFF0000),
                LineConfig::new("line 1", -2.0, 2.0).with_color(0xFF00FF00),
                LineConfig::new("line 2", -4.0, 4.0).with_color(0xFF0000FF),
            ],
            max_samples: 2000,
            max_visible_vertices: 1000,
            min_visible_range: 10,
            initial_range: 200,
            drag_sensitivity: 2.0,
            pinch_damping: 0.5,
            min_y_range_fraction: 0.1,
            pan_threshold_px: 10.0,
            follow_latest: true,
            coalesce_requests: false,
            viewport: ViewportSize::default(),
        }
    }
}
