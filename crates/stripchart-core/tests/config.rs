// File: crates/stripchart-core/tests/config.rs
// Purpose: Configuration defaults and validation errors.

use stripchart_core::{ChartConfig, ConfigError, LineConfig, ViewportSize};

#[test]
fn default_config_is_valid() {
    let cfg = ChartConfig::default();
    assert_eq!(cfg.validate(), Ok(()));
    assert_eq!(cfg.line_count(), 3);
    assert_eq!(cfg.max_samples, 2000);
    assert_eq!(cfg.initial_range, 200);
    assert_eq!(cfg.pinch_damping, 0.5);
}

#[test]
fn structural_errors_are_reported() {
    let empty = ChartConfig { lines: Vec::new(), ..ChartConfig::default() };
    assert_eq!(empty.validate(), Err(ConfigError::NoLines));

    let tiny = ChartConfig { min_visible_range: 1, ..ChartConfig::default() };
    assert_eq!(tiny.validate(), Err(ConfigError::RangeTooSmall(1)));

    let vertices = ChartConfig { max_visible_vertices: 1, ..ChartConfig::default() };
    assert_eq!(vertices.validate(), Err(ConfigError::TooFewVertices(1)));

    let over = ChartConfig { min_visible_range: 5000, ..ChartConfig::default() };
    assert!(matches!(over.validate(), Err(ConfigError::RangeExceedsCapacity { min: 5000, max: 2000 })));

    let initial = ChartConfig { initial_range: 5, ..ChartConfig::default() };
    assert!(matches!(initial.validate(), Err(ConfigError::InitialRange { range: 5, .. })));
}

#[test]
fn tuning_parameters_are_range_checked() {
    let damping = ChartConfig { pinch_damping: 0.0, ..ChartConfig::default() };
    assert!(matches!(damping.validate(), Err(ConfigError::Parameter { name: "pinch_damping", .. })));

    let drag = ChartConfig { drag_sensitivity: f32::NAN, ..ChartConfig::default() };
    assert!(matches!(drag.validate(), Err(ConfigError::Parameter { name: "drag_sensitivity", .. })));

    let floor = ChartConfig { min_y_range_fraction: 1.5, ..ChartConfig::default() };
    assert!(matches!(floor.validate(), Err(ConfigError::Parameter { name: "min_y_range_fraction", .. })));

    let viewport = ChartConfig { viewport: ViewportSize::new(640.0, 0.0), ..ChartConfig::default() };
    assert!(matches!(viewport.validate(), Err(ConfigError::Viewport { .. })));
}

#[test]
fn line_bounds_must_nest() {
    let cfg = ChartConfig {
        lines: vec![LineConfig::new("ok", -1.0, 1.0), LineConfig::new("bad", -1.0, 1.0).with_window(-2.0, 0.0)],
        ..ChartConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(ConfigError::LineBounds { line: 1, .. })));

    let flat = LineConfig::new("flat", 3.0, 3.0);
    assert!(flat.validate(0).is_err());
    assert_eq!(LineConfig::default().validate(0), Ok(()));
}
