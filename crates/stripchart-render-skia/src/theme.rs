// File: crates/stripchart-render-skia/src/theme.rs
// Summary: Light/Dark colour schemes for the strip chart surface.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub border: skia::Color,
    pub label: skia::Color,
    /// Used for lines whose configured colour is fully transparent.
    pub fallback_stroke: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            border: skia::Color::from_argb(255, 180, 180, 190),
            label: skia::Color::from_argb(255, 235, 235, 245),
            fallback_stroke: skia::Color::from_argb(255, 64, 160, 255),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            border: skia::Color::from_argb(255, 60, 60, 70),
            label: skia::Color::from_argb(255, 20, 20, 30),
            fallback_stroke: skia::Color::from_argb(255, 32, 120, 200),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            grid: skia::Color::from_argb(255, 0x22, 0x22, 0x22),
            border: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            label: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            fallback_stroke: skia::Color::from_argb(255, 0x00, 0xff, 0xff),
        }
    }

    /// Stroke colour for a line configured with ARGB `color`.
    pub fn stroke_for(&self, color: u32) -> skia::Color {
        let c = skia::Color::new(color);
        if c.a() == 0 { self.fallback_stroke } else { c }
    }
}

pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Theme::dark)
}
