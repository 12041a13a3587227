// File: crates/stripchart-core/src/window.rs
// Summary: Immutable render-window snapshots and the full/incremental update decision.

use crate::types::ViewportSize;

/// Per-line part of a snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineWindow {
    pub enabled: bool,
    /// Samples available when the snapshot was taken.
    pub size: usize,
    pub y_min: f32,
    pub y_max: f32,
}

impl LineWindow {
    /// Samples of the window `offset..offset + range` that exist.
    pub fn visible(&self, offset: usize, range: usize) -> usize {
        self.size.saturating_sub(offset).min(range)
    }
}

/// Everything a render pass needs from the driver, copied at enqueue time.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderWindow {
    pub offset: usize,
    pub range: usize,
    pub stride: f64,
    pub viewport: ViewportSize,
    pub lines: Vec<LineWindow>,
}

impl RenderWindow {
    pub fn visible(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| l.visible(self.offset, self.range))
    }

    pub fn is_downsampled(&self) -> bool {
        self.stride > 1.0
    }

    /// True when every enabled line fills the whole window.
    fn is_full(&self) -> bool {
        self.lines
            .iter()
            .filter(|l| l.enabled)
            .all(|l| l.visible(self.offset, self.range) == self.range)
    }
}

/// How a render pass fills the back buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateMode {
    /// Recompute every vertex of the window.
    FullRebuild,
    /// Scroll the frame published as `base_seq` left by one sample and append the new
    /// right-most sample.
    IncrementalAppend { base_seq: u64 },
}

impl UpdateMode {
    /// Compare the previously enqueued window (with its sequence number) to `next`.
    ///
    /// Incremental append is only chosen when the window advanced by exactly one sample
    /// and nothing else changed: same range and viewport, no downsampling, the same lines
    /// enabled with the same vertical bounds, and every enabled line filling the window
    /// both before and after.
    pub fn decide(prev: Option<(u64, &RenderWindow)>, next: &RenderWindow) -> Self {
        let Some((base_seq, prev)) = prev else {
            return Self::FullRebuild;
        };
        let same_shape = prev.range == next.range
            && prev.viewport == next.viewport
            && !prev.is_downsampled()
            && !next.is_downsampled()
            && prev.lines.len() == next.lines.len();
        if !same_shape || next.offset != prev.offset + 1 {
            return Self::FullRebuild;
        }
        let same_lines = prev.lines.iter().zip(&next.lines).all(|(a, b)| {
            a.enabled == b.enabled && a.y_min == b.y_min && a.y_max == b.y_max
        });
        if same_lines && prev.is_full() && next.is_full() {
            Self::IncrementalAppend { base_seq }
        } else {
            Self::FullRebuild
        }
    }
}
