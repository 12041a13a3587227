// File: crates/stripchart-render-skia/src/render.rs
// Summary: Headless rendering of a StreamChart's front frame to PNG/RGBA using Skia CPU
// raster surfaces.

use anyhow::Result;
use skia_safe as skia;
use stripchart_core::{Frame, StreamChart};

use crate::grid::linspace;
use crate::sink::SkiaSink;
use crate::theme::Theme;

/// Screen margins around the plot area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(16, 16, 16, 16)
    }
}

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    pub stroke_width: f32,
    pub draw_grid: bool,
    /// Window extent and latest values as text. Off in tests to avoid font variance.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 640,
            insets: Insets::default(),
            theme: Theme::dark(),
            stroke_width: 2.0,
            draw_grid: true,
            draw_labels: true,
        }
    }
}

impl RenderOptions {
    pub fn plot_rect(&self) -> skia::Rect {
        let i = self.insets;
        let left = i.left as f32;
        let top = i.top as f32;
        let right = (self.width as f32 - i.right as f32).max(left);
        let bottom = (self.height as f32 - i.bottom as f32).max(top);
        skia::Rect::new(left, top, right, bottom)
    }
}

/// Draw the chart's current front frame onto `canvas`. Returns the segments drawn.
pub fn draw_chart(canvas: &skia::Canvas, chart: &StreamChart, opts: &RenderOptions) -> usize {
    canvas.clear(opts.theme.background);
    let plot = opts.plot_rect();
    if opts.draw_grid {
        draw_grid(canvas, plot, &opts.theme);
    }

    let strokes: Vec<skia::Color> = chart
        .config()
        .lines
        .iter()
        .map(|l| opts.theme.stroke_for(l.color))
        .collect();
    let drawn = chart.front(|frame| {
        canvas.save();
        canvas.clip_rect(plot, skia::ClipOp::Intersect, true);
        let mut sink = SkiaSink::new(canvas, plot, frame.viewport, &strokes, opts.theme.fallback_stroke)
            .with_stroke_width(opts.stroke_width);
        let drawn = frame.draw(&mut sink);
        canvas.restore();
        if opts.draw_labels {
            draw_labels(canvas, plot, chart, frame, &strokes, &opts.theme);
        }
        drawn
    });
    log::trace!("drew frame {} ({drawn} segments)", chart.front_seq());
    drawn
}

/// Render the front frame to a PNG at `output_png_path`.
pub fn render_to_png(
    chart: &StreamChart,
    opts: &RenderOptions,
    output_png_path: impl AsRef<std::path::Path>,
) -> Result<()> {
    let bytes = render_to_png_bytes(chart, opts)?;
    if let Some(parent) = output_png_path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_png_path.as_ref(), bytes)?;
    log::debug!("wrote {}", output_png_path.as_ref().display());
    Ok(())
}

pub fn render_to_png_bytes(chart: &StreamChart, opts: &RenderOptions) -> Result<Vec<u8>> {
    let mut surface = raster_surface(opts)?;
    draw_chart(surface.canvas(), chart, opts);
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Unpremultiplied RGBA8 pixels with `(pixels, width, height, row_bytes)`.
pub fn render_to_rgba8(chart: &StreamChart, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
    let mut surface = raster_surface(opts)?;
    draw_chart(surface.canvas(), chart, opts);
    let info = skia::ImageInfo::new(
        (opts.width, opts.height),
        skia::ColorType::RGBA8888,
        skia::AlphaType::Unpremul,
        None,
    );
    let row_bytes = opts.width as usize * 4;
    let mut pixels = vec![0u8; row_bytes * opts.height as usize];
    if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        anyhow::bail!("reading back {}x{} pixels failed", opts.width, opts.height);
    }
    Ok((pixels, opts.width as u32, opts.height as u32, row_bytes))
}

fn raster_surface(opts: &RenderOptions) -> Result<skia::Surface> {
    skia::surfaces::raster_n32_premul((opts.width, opts.height))
        .ok_or_else(|| anyhow::anyhow!("failed to create {}x{} raster surface", opts.width, opts.height))
}

// ---- helpers ----------------------------------------------------------------

fn draw_grid(canvas: &skia::Canvas, plot: skia::Rect, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    for x in linspace(plot.left, plot.right, 11) {
        canvas.draw_line((x, plot.top), (x, plot.bottom), &paint);
    }
    for y in linspace(plot.top, plot.bottom, 9) {
        canvas.draw_line((plot.left, y), (plot.right, y), &paint);
    }

    let mut border = skia::Paint::default();
    border.set_color(theme.border);
    border.set_anti_alias(true);
    border.set_style(skia::paint::Style::Stroke);
    border.set_stroke_width(1.5);
    canvas.draw_rect(plot, &border);
}

fn draw_labels(
    canvas: &skia::Canvas,
    plot: skia::Rect,
    chart: &StreamChart,
    frame: &Frame,
    strokes: &[skia::Color],
    theme: &Theme,
) {
    let mut font = skia::Font::default();
    font.set_size(13.0);
    let mut text = skia::Paint::default();
    text.set_anti_alias(true);
    text.set_color(theme.label);

    let window = format!("samples {}..{}", frame.offset, frame.offset + frame.range);
    canvas.draw_str(&window, (plot.left + 6.0, plot.bottom - 6.0), &font, &text);

    let mut y = plot.top + 16.0;
    for (line, cfg) in chart.config().lines.iter().enumerate() {
        if !chart.is_line_enabled(line) {
            continue;
        }
        let Some(value) = chart.latest_visible_value(line) else { continue };
        text.set_color(strokes.get(line).copied().unwrap_or(theme.label));
        let label = format!("{}: {value:.3}", cfg.label);
        canvas.draw_str(&label, (plot.right - 140.0, y), &font, &text);
        y += 16.0;
    }
}
