// File: crates/stripchart-render-skia/src/sink.rs
// Summary: PolylineSink drawing segment-pair vertex buffers onto a Skia canvas.
// Notes:
// - Frame vertices live in viewport space with y growing upwards; the sink scales them
//   into the plot rectangle and flips y for Skia's top-down coordinates.

use skia_safe as skia;
use stripchart_core::{PolylineSink, VertexBuffer, ViewportSize};

pub struct SkiaSink<'a> {
    canvas: &'a skia::Canvas,
    plot: skia::Rect,
    viewport: ViewportSize,
    strokes: &'a [skia::Color],
    fallback: skia::Color,
    stroke_width: f32,
    points: Vec<skia::Point>,
}

impl<'a> SkiaSink<'a> {
    /// `strokes[line]` is the colour of each line; lines past the end use `fallback`.
    pub fn new(
        canvas: &'a skia::Canvas,
        plot: skia::Rect,
        viewport: ViewportSize,
        strokes: &'a [skia::Color],
        fallback: skia::Color,
    ) -> Self {
        Self { canvas, plot, viewport, strokes, fallback, stroke_width: 2.0, points: Vec::new() }
    }

    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    #[inline]
    fn to_canvas(plot: skia::Rect, viewport: ViewportSize, x: f32, y: f32) -> skia::Point {
        let sx = if viewport.width > 0.0 { plot.width() / viewport.width } else { 0.0 };
        let sy = if viewport.height > 0.0 { plot.height() / viewport.height } else { 0.0 };
        skia::Point::new(plot.left + x * sx, plot.bottom - y * sy)
    }
}

impl PolylineSink for SkiaSink<'_> {
    fn draw_polyline(&mut self, line: usize, vertices: &VertexBuffer, segment_count: usize) {
        let count = 2 * segment_count.min(vertices.segment_count());
        if count == 0 {
            return;
        }
        let (plot, viewport) = (self.plot, self.viewport);
        self.points.clear();
        self.points.extend(
            vertices.vertices()[..count]
                .iter()
                .map(|v| Self::to_canvas(plot, viewport, v.x, v.y)),
        );

        let mut stroke = skia::Paint::default();
        stroke.set_anti_alias(true);
        stroke.set_style(skia::paint::Style::Stroke);
        stroke.set_stroke_width(self.stroke_width);
        stroke.set_stroke_cap(skia::paint::Cap::Round);
        stroke.set_color(self.strokes.get(line).copied().unwrap_or(self.fallback));

        self.canvas.draw_points(skia::canvas::PointMode::Lines, &self.points, &stroke);
    }
}
