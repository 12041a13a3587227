// File: crates/stripchart-core/src/store.rs
// Summary: Append-only per-line sample buffers shared between the feed and the render worker.
// Notes:
// - Storage is allocated once at construction (`max_size` slots per line) and never moves.
// - One writer appends; any number of readers observe a prefix through the published size.
//   A slot is written before the size covering it is stored with Release ordering, so a
//   reader that loads the size with Acquire only ever sees fully written samples.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

struct LineSamples {
    values: Box<[AtomicU32]>,
    size: AtomicUsize,
    saturation_logged: AtomicBool,
}

impl LineSamples {
    fn new(max_size: usize) -> Self {
        Self {
            values: (0..max_size).map(|_| AtomicU32::new(0)).collect(),
            size: AtomicUsize::new(0),
            saturation_logged: AtomicBool::new(false),
        }
    }
}

pub struct SampleStore {
    lines: Vec<LineSamples>,
    max_size: usize,
}

impl SampleStore {
    pub fn new(line_count: usize, max_size: usize) -> Self {
        Self {
            lines: (0..line_count).map(|_| LineSamples::new(max_size)).collect(),
            max_size,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Append `value` to `line`, returning its index.
    ///
    /// Returns `None` once the line holds `max_size` samples (the store is left untouched)
    /// or when `line` does not exist. Must only be called from the single feed context.
    pub fn append(&self, line: usize, value: f32) -> Option<usize> {
        let samples = self.lines.get(line)?;
        let index = samples.size.load(Ordering::Relaxed);
        if index >= self.max_size {
            if !samples.saturation_logged.swap(true, Ordering::Relaxed) {
                log::debug!("line {line} reached capacity ({} samples); further appends ignored", self.max_size);
            }
            return None;
        }
        samples.values[index].store(value.to_bits(), Ordering::Relaxed);
        samples.size.store(index + 1, Ordering::Release);
        Some(index)
    }

    /// Sample at `index`, or `None` when it has not been written yet.
    pub fn get(&self, line: usize, index: usize) -> Option<f32> {
        self.line(line)?.get(index)
    }

    /// Number of samples in `line` (0 for an unknown line).
    pub fn size_of(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |s| s.size.load(Ordering::Acquire))
    }

    pub fn is_saturated(&self, line: usize) -> bool {
        self.lines.get(line).is_some_and(|_| self.size_of(line) >= self.max_size)
    }

    /// Snapshot of a line: readers index against the size observed here.
    pub fn line(&self, line: usize) -> Option<LineReader<'_>> {
        let samples = self.lines.get(line)?;
        let size = samples.size.load(Ordering::Acquire);
        Some(LineReader { values: &samples.values[..size] })
    }

    /// Explicit reset: every line goes back to zero samples.
    pub fn clear(&self) {
        for samples in &self.lines {
            samples.size.store(0, Ordering::Release);
            samples.saturation_logged.store(false, Ordering::Relaxed);
        }
    }
}

impl std::fmt::Debug for SampleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sizes: Vec<usize> = (0..self.lines.len()).map(|l| self.size_of(l)).collect();
        f.debug_struct("SampleStore")
            .field("max_size", &self.max_size)
            .field("sizes", &sizes)
            .finish()
    }
}

/// Read view of one line's published prefix.
#[derive(Clone, Copy)]
pub struct LineReader<'a> {
    values: &'a [AtomicU32],
}

impl LineReader<'_> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).map(|v| f32::from_bits(v.load(Ordering::Relaxed)))
    }
}
