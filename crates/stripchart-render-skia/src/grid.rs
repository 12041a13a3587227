// File: crates/stripchart-render-skia/src/grid.rs
// Summary: Grid line placement for the plot area.

/// `steps` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f32, end: f32, steps: usize) -> Vec<f32> {
    if steps < 2 {
        return vec![start, end];
    }
    let step = (end - start) / (steps as f32 - 1.0);
    (0..steps).map(|i| start + step * i as f32).collect()
}
