// File: crates/stripchart-core/src/downsample.rs
// Summary: Stride sampling for windows wider than the vertex capacity.
// Notes:
// - One representative sample per stride is kept; there is no min/max reduction, so
//   short peaks can disappear at high zoom-out.

/// Samples per emitted vertex: 1 while the window fits, `range / max_vertices` otherwise.
pub fn stride_for(range: usize, max_vertices: usize) -> f64 {
    if max_vertices == 0 || range <= max_vertices {
        1.0
    } else {
        range as f64 / max_vertices as f64
    }
}

/// Window-relative sample position of the `j`-th emitted vertex.
#[inline]
pub fn sample_index(j: usize, stride: f64) -> usize {
    (j as f64 * stride).round() as usize
}

/// Window-relative positions to emit for a window with `visible` samples, at most
/// `max_points` of them.
pub fn stride_points(visible: usize, stride: f64, max_points: usize) -> StridePoints {
    StridePoints { next: 0, visible, stride, remaining: max_points }
}

#[derive(Clone, Debug)]
pub struct StridePoints {
    next: usize,
    visible: usize,
    stride: f64,
    remaining: usize,
}

impl Iterator for StridePoints {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let i = if self.stride <= 1.0 { self.next } else { sample_index(self.next, self.stride) };
        if i >= self.visible {
            return None;
        }
        self.next += 1;
        self.remaining -= 1;
        Some(i)
    }
}
