// File: crates/stripchart-render-skia/src/lib.rs
// Summary: Skia renderer crate; draws stripchart front frames on CPU raster surfaces.

pub mod grid;
pub mod render;
pub mod sink;
pub mod theme;

pub use render::{draw_chart, render_to_png, render_to_png_bytes, render_to_rgba8, Insets, RenderOptions};
pub use sink::SkiaSink;
pub use theme::Theme;
