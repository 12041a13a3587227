// File: crates/stripchart-core/src/types.rs
// Summary: Shared types and constants (viewport size, defaults).

/// Default viewport width in pixels.
pub const WIDTH: f32 = 1024.0;
/// Default viewport height in pixels.
pub const HEIGHT: f32 = 640.0;

/// Size of the data area the vertices are laid out in, in pixels.
/// Contract: both dimensions are positive for a usable chart.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero, negative or not a number.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0) || !self.width.is_finite() || !self.height.is_finite()
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}
