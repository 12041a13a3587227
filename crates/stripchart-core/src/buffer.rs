// File: crates/stripchart-core/src/buffer.rs
// Summary: Fixed-capacity per-line vertex buffers and the front/back frame pair they live in.
// Notes:
// - Vertices are stored as segment pairs: for points p0..pn the buffer holds
//   p0,p1, p1,p2, ..., p(n-1),pn, so a renderer can draw disjoint segments directly and
//   there is never a trailing half segment.
// - The render worker is the only writer. It writes the back frame while holding the
//   front frame for reading, then flips the front index with Release ordering. Readers
//   load the index with Acquire and only ever lock the front slot, so they observe
//   either the previous or the new frame in full. A reader that races a swap retries
//   against the new front instead of waiting for the pass in progress.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError, RwLock, TryLockError};

use crate::geometry::Vertex;
use crate::types::ViewportSize;
use crate::window::UpdateMode;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexBuffer {
    vertices: Vec<Vertex>,
    last: Option<Vertex>,
    max_points: usize,
}

impl VertexBuffer {
    /// Room for `max_points` polyline points, allocated up front.
    pub fn with_capacity(max_points: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(2 * max_points.saturating_sub(1)),
            last: None,
            max_points,
        }
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// Segment-pair vertices, `2 * segment_count()` long.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Number of polyline points (one more than the segments, or 0/1 when empty).
    pub fn point_count(&self) -> usize {
        if self.vertices.is_empty() {
            usize::from(self.last.is_some())
        } else {
            self.segment_count() + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segment_count() == 0
    }

    pub fn segments(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.vertices.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Polyline point `k`, or `None` past the end.
    pub fn point(&self, k: usize) -> Option<Vertex> {
        if self.vertices.is_empty() {
            return if k == 0 { self.last } else { None };
        }
        let slot = if k == 0 { 0 } else { 2 * k - 1 };
        self.vertices.get(slot).copied()
    }

    /// Drop all points, keeping the allocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.last = None;
    }

    /// Append the next polyline point. Points beyond `max_points` are ignored.
    pub fn push_point(&mut self, p: Vertex) {
        if self.point_count() >= self.max_points {
            return;
        }
        if let Some(prev) = self.last {
            self.vertices.push(prev);
            self.vertices.push(p);
        }
        self.last = Some(p);
    }

    /// Rebuild this buffer as `front` scrolled one point left with a new right-most
    /// value `y_last`. X coordinates are taken from `front` unchanged.
    /// Returns false (leaving this buffer cleared) when `front` has fewer than two points.
    pub fn shift_append(&mut self, front: &VertexBuffer, y_last: f32) -> bool {
        self.clear();
        let n = front.point_count();
        if n < 2 {
            return false;
        }
        for k in 0..n - 1 {
            match (front.point(k), front.point(k + 1)) {
                (Some(here), Some(next)) => self.push_point(Vertex::new(here.x, next.y)),
                _ => {
                    self.clear();
                    return false;
                }
            }
        }
        match front.point(n - 1) {
            Some(tail) => {
                self.push_point(Vertex::new(tail.x, y_last));
                true
            }
            None => {
                self.clear();
                false
            }
        }
    }
}

/// One complete render output: the vertex buffers of every line plus the window they
/// were built from.
#[derive(Clone, Debug)]
pub struct Frame {
    pub seq: u64,
    pub mode: UpdateMode,
    /// False when some line failed during the pass; such a frame is never used as the
    /// base of an incremental pass.
    pub complete: bool,
    pub offset: usize,
    pub range: usize,
    pub stride: f64,
    pub viewport: ViewportSize,
    pub lines: Vec<VertexBuffer>,
}

impl Frame {
    pub fn new(line_count: usize, max_points: usize) -> Self {
        Self {
            seq: 0,
            mode: UpdateMode::FullRebuild,
            complete: false,
            offset: 0,
            range: 0,
            stride: 1.0,
            viewport: ViewportSize::default(),
            lines: (0..line_count).map(|_| VertexBuffer::with_capacity(max_points)).collect(),
        }
    }

    pub fn line(&self, line: usize) -> Option<&VertexBuffer> {
        self.lines.get(line)
    }

    pub fn total_segments(&self) -> usize {
        self.lines.iter().map(VertexBuffer::segment_count).sum()
    }

    /// Hand every non-empty line to `sink`. Returns the number of segments drawn.
    pub fn draw(&self, sink: &mut impl PolylineSink) -> usize {
        let mut drawn = 0;
        for (line, buf) in self.lines.iter().enumerate() {
            let segments = buf.segment_count();
            if segments > 0 {
                sink.draw_polyline(line, buf, segments);
                drawn += segments;
            }
        }
        drawn
    }
}

pub struct DoubleBuffer {
    slots: [RwLock<Frame>; 2],
    front: AtomicUsize,
    writer: Mutex<()>,
}

impl DoubleBuffer {
    pub fn new(line_count: usize, max_points: usize) -> Self {
        Self {
            slots: [
                RwLock::new(Frame::new(line_count, max_points)),
                RwLock::new(Frame::new(line_count, max_points)),
            ],
            front: AtomicUsize::new(0),
            writer: Mutex::new(()),
        }
    }

    pub fn front_index(&self) -> usize {
        self.front.load(Ordering::Acquire)
    }

    /// Run `f` against the current front frame.
    ///
    /// Never waits on a render pass: the writer only ever locks the back slot for writing,
    /// so a slot that is busy (or stopped being the front while we locked it) means a swap
    /// happened and the new front is read instead.
    pub fn read_front<R>(&self, f: impl FnOnce(&Frame) -> R) -> R {
        loop {
            let idx = self.front.load(Ordering::Acquire);
            let guard = match self.slots[idx].try_read() {
                Ok(guard) => guard,
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                Err(TryLockError::WouldBlock) => {
                    std::hint::spin_loop();
                    continue;
                }
            };
            if self.front.load(Ordering::Acquire) == idx {
                return f(&guard);
            }
        }
    }

    pub fn front_seq(&self) -> u64 {
        self.read_front(|frame| frame.seq)
    }

    /// Fill the back frame with `f(front, back)` and make it the front when `f` returns
    /// true. Writers are serialized; readers are never handed the frame being written.
    pub fn publish(&self, f: impl FnOnce(&Frame, &mut Frame) -> bool) -> bool {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let front = self.front.load(Ordering::Acquire);
        let back = 1 - front;
        let swap = {
            let front_frame = self.slots[front].read().unwrap_or_else(PoisonError::into_inner);
            let mut back_frame = self.slots[back].write().unwrap_or_else(PoisonError::into_inner);
            f(&front_frame, &mut back_frame)
        };
        if swap {
            self.front.store(back, Ordering::Release);
        }
        swap
    }
}

impl std::fmt::Debug for DoubleBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoubleBuffer").field("front", &self.front_index()).finish()
    }
}

/// Consumer of the front frame: draws one line's segments.
pub trait PolylineSink {
    fn draw_polyline(&mut self, line: usize, vertices: &VertexBuffer, segment_count: usize);
}
