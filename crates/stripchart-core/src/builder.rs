// File: crates/stripchart-core/src/builder.rs
// Summary: Geometry builder: fills a back frame from the sample store and a render request,
// either by full rebuild or by scrolling the front frame one sample.

use crate::buffer::{Frame, VertexBuffer};
use crate::downsample::stride_points;
use crate::error::BuildError;
use crate::geometry::Vertex;
use crate::scale::{SampleScale, ValueScale};
use crate::scheduler::RenderRequest;
use crate::store::SampleStore;
use crate::window::{LineWindow, RenderWindow, UpdateMode};

/// Summary of a finished pass, handed to the redraw callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameInfo {
    pub seq: u64,
    /// Mode actually used; an incremental request is downgraded when its base frame is
    /// not the current front.
    pub mode: UpdateMode,
    pub complete: bool,
    pub total_segments: usize,
}

pub struct GeometryBuilder;

impl GeometryBuilder {
    /// Fill `back` for `request`. Lines that fail are logged and left empty; the frame is
    /// then marked incomplete so the next pass rebuilds it fully.
    pub fn build(store: &SampleStore, request: &RenderRequest, front: &Frame, back: &mut Frame) -> FrameInfo {
        let window = &request.window;
        let mode = Self::effective_mode(request, front);

        back.seq = request.seq;
        back.mode = mode;
        back.complete = true;
        back.offset = window.offset;
        back.range = window.range;
        back.stride = window.stride;
        back.viewport = window.viewport;

        for (line, buf) in back.lines.iter_mut().enumerate() {
            let Some(lw) = window.lines.get(line) else {
                buf.clear();
                continue;
            };
            if !lw.enabled {
                buf.clear();
                continue;
            }
            let result = match (mode, front.line(line)) {
                (UpdateMode::IncrementalAppend { .. }, Some(prev)) => {
                    Self::append_line(store, window, line, lw, prev, buf)
                }
                _ => Self::rebuild_line(store, window, line, lw, buf),
            };
            if let Err(err) = result {
                log::warn!("render pass {}: {err}; line left empty for this frame", request.seq);
                buf.clear();
                back.complete = false;
            }
        }

        let info = FrameInfo {
            seq: request.seq,
            mode,
            complete: back.complete,
            total_segments: back.total_segments(),
        };
        log::debug!(
            "render pass {} ({:?}): offset {} range {} -> {} segments",
            info.seq,
            info.mode,
            window.offset,
            window.range,
            info.total_segments
        );
        info
    }

    fn effective_mode(request: &RenderRequest, front: &Frame) -> UpdateMode {
        match request.mode {
            UpdateMode::IncrementalAppend { base_seq }
                if front.complete
                    && front.seq == base_seq
                    && front.offset + 1 == request.window.offset
                    && front.range == request.window.range =>
            {
                request.mode
            }
            _ => UpdateMode::FullRebuild,
        }
    }

    /// Recompute every point of the window, stride-sampling when it is wider than the
    /// vertex capacity.
    pub fn rebuild_line(
        store: &SampleStore,
        window: &RenderWindow,
        line: usize,
        lw: &LineWindow,
        buf: &mut VertexBuffer,
    ) -> Result<(), BuildError> {
        buf.clear();
        let reader = store.line(line).ok_or(BuildError::MissingLine { line })?;
        let visible = lw.visible(window.offset, window.range);
        let xs = SampleScale::new(window.viewport.width, window.range);
        let ys = ValueScale::new(window.viewport.height, lw.y_min, lw.y_max);
        for i in stride_points(visible, window.stride, buf.max_points()) {
            let index = window.offset + i;
            let value = reader
                .get(index)
                .ok_or(BuildError::SampleUnavailable { line, index, size: reader.len() })?;
            buf.push_point(Vertex::new(xs.to_px(i), ys.to_px(value)));
        }
        Ok(())
    }

    /// Scroll `prev` by one sample into `buf` and append the new right-most sample.
    /// Falls back to a rebuild when `prev` does not hold a full window.
    pub fn append_line(
        store: &SampleStore,
        window: &RenderWindow,
        line: usize,
        lw: &LineWindow,
        prev: &VertexBuffer,
        buf: &mut VertexBuffer,
    ) -> Result<(), BuildError> {
        if window.range < 2 || prev.point_count() != window.range {
            return Self::rebuild_line(store, window, line, lw, buf);
        }
        let index = window.offset + window.range - 1;
        let value = store.get(line, index).ok_or(BuildError::SampleUnavailable {
            line,
            index,
            size: store.size_of(line),
        })?;
        let ys = ValueScale::new(window.viewport.height, lw.y_min, lw.y_max);
        if buf.shift_append(prev, ys.to_px(value)) {
            Ok(())
        } else {
            Self::rebuild_line(store, window, line, lw, buf)
        }
    }
}
