// File: crates/stripchart-core/src/error.rs
// Summary: Error types for configuration, the chart facade and render passes.

use thiserror::Error;

/// Rejected configuration values. Produced by [`crate::ChartConfig::validate`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("chart needs at least one line")]
    NoLines,
    #[error("max_visible_vertices must be at least 2 (got {0})")]
    TooFewVertices(usize),
    #[error("min_visible_range must be at least 2 (got {0})")]
    RangeTooSmall(usize),
    #[error("min_visible_range {min} exceeds max_samples {max}")]
    RangeExceedsCapacity { min: usize, max: usize },
    #[error("initial_range {range} outside [{min}, {max}]")]
    InitialRange { range: usize, min: usize, max: usize },
    #[error("{name} must be {expected} (got {value})")]
    Parameter {
        name: &'static str,
        expected: &'static str,
        value: f32,
    },
    #[error("line {line}: invalid vertical bounds (window {y_min}..{y_max}, absolute {y_abs_min}..{y_abs_max})")]
    LineBounds {
        line: usize,
        y_min: f32,
        y_max: f32,
        y_abs_min: f32,
        y_abs_max: f32,
    },
    #[error("viewport must have a positive size (got {width}x{height})")]
    Viewport { width: f32, height: f32 },
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("line {line} out of range (chart has {count} lines)")]
    UnknownLine { line: usize, count: usize },
    #[error("render scheduler is shut down")]
    SchedulerClosed,
    #[error("failed to spawn render worker: {0}")]
    WorkerSpawn(#[from] std::io::Error),
}

/// Failure of a single line inside a render pass. Logged by the worker, never returned
/// to the driver.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    #[error("line {line} missing from the sample store")]
    MissingLine { line: usize },
    #[error("line {line}: sample {index} unavailable (store holds {size})")]
    SampleUnavailable { line: usize, index: usize, size: usize },
}
