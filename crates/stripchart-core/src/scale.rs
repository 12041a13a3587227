// File: crates/stripchart-core/src/scale.rs
// Summary: Sample-index (X) and value (Y) to screen transforms for the visible window.

/// Maps window-relative sample positions `0..range` linearly onto `[0, width]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleScale {
    pub width: f32,
    pub range: usize,
}

impl SampleScale {
    pub fn new(width: f32, range: usize) -> Self {
        Self { width, range }
    }

    /// Independent of the window offset, which is what lets an incremental pass keep
    /// the X coordinates of the previous frame.
    #[inline]
    pub fn to_px(&self, i: usize) -> f32 {
        if self.range <= 1 {
            return 0.0;
        }
        let last = self.range - 1;
        if i >= last {
            return self.width;
        }
        (i as f32 * self.width) / last as f32
    }
}

/// Maps values in `[vmin, vmax]` onto `[0, height]`, clamping values outside the window
/// to the boundary pixel instead of extrapolating.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub height: f32,
    pub vmin: f32,
    pub vmax: f32,
}

impl ValueScale {
    pub fn new(height: f32, vmin: f32, vmax: f32) -> Self {
        Self { height, vmin, vmax }
    }

    #[inline]
    pub fn to_px(&self, value: f32) -> f32 {
        let span = self.vmax - self.vmin;
        if !(span > 0.0) || value.is_nan() {
            return 0.0;
        }
        if value >= self.vmax {
            self.height
        } else if value <= self.vmin {
            0.0
        } else {
            ((value - self.vmin) / span) * self.height
        }
    }

    #[inline]
    pub fn from_px(&self, py: f32) -> f32 {
        if !(self.height > 0.0) {
            return self.vmin;
        }
        self.vmin + (py / self.height) * (self.vmax - self.vmin)
    }
}
