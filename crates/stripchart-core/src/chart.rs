// File: crates/stripchart-core/src/chart.rs
// Summary: StreamChart facade. Owns the sample store, viewport, gesture tracker and render
// worker, and turns feed/gesture input into render requests.
// Notes:
// - All methods run on the driver side. Nothing here blocks on the worker except
//   `shutdown` (and `Drop`).
// - Every request carries a snapshot of the window taken here; the worker never reads
//   driver state.

use std::sync::Arc;

use crate::buffer::{DoubleBuffer, Frame, PolylineSink};
use crate::builder::FrameInfo;
use crate::config::{check_bounds, ChartConfig};
use crate::error::{ChartError, ConfigError};
use crate::gesture::{GestureContext, GestureTracker, VerticalTarget};
use crate::scheduler::{FrameCallback, RenderRequest, RenderScheduler};
use crate::store::SampleStore;
use crate::types::ViewportSize;
use crate::view::ViewportState;
use crate::window::{RenderWindow, UpdateMode};

pub struct StreamChart {
    config: ChartConfig,
    store: Arc<SampleStore>,
    view: ViewportState,
    gestures: GestureTracker,
    enabled: Vec<bool>,
    viewport: ViewportSize,
    follow: bool,
    buffers: Arc<DoubleBuffer>,
    scheduler: RenderScheduler,
    next_seq: u64,
    last_request: Option<(u64, RenderWindow)>,
}

impl StreamChart {
    pub fn new(config: ChartConfig) -> Result<Self, ChartError> {
        Self::build(config, None)
    }

    /// Like [`StreamChart::new`], with `on_frame` called on the worker thread after every
    /// published frame. Typically used to schedule a UI redraw.
    pub fn with_redraw(
        config: ChartConfig,
        on_frame: impl Fn(&FrameInfo) + Send + 'static,
    ) -> Result<Self, ChartError> {
        Self::build(config, Some(Box::new(on_frame)))
    }

    fn build(config: ChartConfig, on_frame: Option<FrameCallback>) -> Result<Self, ChartError> {
        config.validate()?;
        let store = Arc::new(SampleStore::new(config.line_count(), config.max_samples));
        let buffers = Arc::new(DoubleBuffer::new(config.line_count(), config.max_visible_vertices));
        let scheduler = RenderScheduler::spawn(
            Arc::clone(&store),
            Arc::clone(&buffers),
            config.coalesce_requests,
            on_frame,
        )?;
        log::info!(
            "stream chart: {} lines, {} samples/line, {} vertices, initial range {}",
            config.line_count(),
            config.max_samples,
            config.max_visible_vertices,
            config.initial_range
        );
        Ok(Self {
            view: ViewportState::from_config(&config),
            gestures: GestureTracker::new(config.pan_threshold_px),
            enabled: config.lines.iter().map(|l| l.enabled).collect(),
            viewport: config.viewport,
            follow: config.follow_latest,
            store,
            buffers,
            scheduler,
            next_seq: 1,
            last_request: None,
            config,
        })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn line_count(&self) -> usize {
        self.enabled.len()
    }

    pub fn store(&self) -> &Arc<SampleStore> {
        &self.store
    }

    pub fn viewport_state(&self) -> &ViewportState {
        &self.view
    }

    pub fn viewport_size(&self) -> ViewportSize {
        self.viewport
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    pub fn is_line_enabled(&self, line: usize) -> bool {
        self.enabled.get(line).copied().unwrap_or(false)
    }

    // --- feed -----------------------------------------------------------------------

    /// Append one sample. `Ok(None)` means the line is full and the value was dropped;
    /// check [`StreamChart::size_of`] to react to saturation.
    pub fn append_sample(&mut self, line: usize, value: f32) -> Result<Option<usize>, ChartError> {
        self.check_line(line)?;
        Ok(self.store.append(line, value))
    }

    pub fn size_of(&self, line: usize) -> usize {
        self.store.size_of(line)
    }

    /// Called once per arrived data point, after its samples were appended. Keeps the
    /// newest sample at the right edge while following and requests a render.
    pub fn notify_window_advanced(&mut self) {
        if self.follow && !self.view.in_gesture() {
            self.view.follow(self.data_size());
        }
        self.enqueue(false);
    }

    /// Reset every line to zero samples and start from offset 0.
    pub fn clear_samples(&mut self) {
        self.store.clear();
        self.view.set_offset(0);
        self.last_request = None;
        log::info!("sample store cleared");
        self.enqueue(true);
    }

    // --- gestures -------------------------------------------------------------------

    pub fn on_pan_start(&mut self, x: f32, y: f32) {
        self.gestures.on_pan_start(&mut self.view, x, y);
    }

    /// `dx`/`dy` are pixels moved since the pan started. Returns true when the viewport
    /// changed; following stops in that case.
    pub fn on_pan_move(&mut self, dx: f32, dy: f32) -> bool {
        let size = self.data_size();
        let ctx = GestureContext { viewport: self.viewport, size, enabled: &self.enabled };
        let changed = self.gestures.on_pan_move(&mut self.view, &ctx, dx, dy);
        if changed {
            self.stop_following();
            self.enqueue(false);
        }
        changed
    }

    pub fn on_pan_end(&mut self) {
        self.gestures.on_pan_end(&mut self.view);
    }

    /// Abort the current gesture and restore the viewport it started from.
    pub fn on_pan_cancel(&mut self) {
        if self.gestures.on_pan_cancel(&mut self.view) {
            log::debug!("gesture cancelled; viewport restored to offset {}", self.view.offset());
            self.enqueue(true);
        }
    }

    pub fn on_pinch_start(&mut self, focal_x: f32, focal_y: f32, span_x: f32, span_y: f32) {
        let size = self.data_size();
        let ctx = GestureContext { viewport: self.viewport, size, enabled: &self.enabled };
        self.gestures
            .on_pinch_start(&mut self.view, &ctx, focal_x, focal_y, span_x, span_y);
    }

    /// Ratios are start span over current span. Returns true when the viewport changed.
    pub fn on_pinch_update(&mut self, ratio_x: f32, ratio_y: f32) -> bool {
        let size = self.data_size();
        let ctx = GestureContext { viewport: self.viewport, size, enabled: &self.enabled };
        let changed = self.gestures.on_pinch_update(&mut self.view, &ctx, ratio_x, ratio_y);
        if changed {
            self.stop_following();
            self.enqueue(false);
        }
        changed
    }

    pub fn on_pinch_end(&mut self) {
        self.gestures.on_pinch_end(&mut self.view);
    }

    pub fn set_vertical_target(&mut self, target: VerticalTarget) -> Result<(), ChartError> {
        if let VerticalTarget::Line(line) = target {
            self.check_line(line)?;
        }
        self.gestures.set_vertical_target(target);
        Ok(())
    }

    // --- configuration --------------------------------------------------------------

    pub fn set_range(&mut self, range: usize) {
        self.view.set_range(range);
        if self.follow {
            self.view.follow(self.data_size());
        }
        self.enqueue(false);
    }

    /// Jump to `offset` (clamped at 0). Stops following.
    pub fn set_offset(&mut self, offset: i64) {
        self.stop_following();
        self.view.set_offset(offset);
        self.enqueue(false);
    }

    pub fn set_follow_latest(&mut self, follow: bool) {
        self.follow = follow;
        if follow {
            self.view.follow(self.data_size());
            self.enqueue(false);
        }
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) -> Result<(), ChartError> {
        let viewport = ViewportSize::new(width, height);
        if viewport.is_empty() {
            return Err(ConfigError::Viewport { width, height }.into());
        }
        self.viewport = viewport;
        log::debug!("viewport resized to {width}x{height}");
        self.enqueue(true);
        Ok(())
    }

    pub fn set_line_enabled(&mut self, line: usize, enabled: bool) -> Result<(), ChartError> {
        self.check_line(line)?;
        self.enabled[line] = enabled;
        self.enqueue(false);
        Ok(())
    }

    /// Replace the visible vertical window of `line`.
    pub fn set_line_bounds(&mut self, line: usize, y_min: f32, y_max: f32) -> Result<(), ChartError> {
        self.check_line(line)?;
        if let Some(w) = self.view.y_window(line) {
            check_bounds(line, y_min, y_max, w.abs_min, w.abs_max)?;
        }
        self.view.set_y_window(line, y_min, y_max);
        self.enqueue(false);
        Ok(())
    }

    /// Replace the absolute vertical bounds of `line`; the visible window is pulled inside.
    pub fn set_line_abs_bounds(&mut self, line: usize, y_abs_min: f32, y_abs_max: f32) -> Result<(), ChartError> {
        self.check_line(line)?;
        if !(y_abs_min.is_finite() && y_abs_max.is_finite() && y_abs_min < y_abs_max) {
            let (y_min, y_max) = self.view.y_window(line).map_or((0.0, 0.0), |w| (w.min, w.max));
            return Err(ConfigError::LineBounds { line, y_min, y_max, y_abs_min, y_abs_max }.into());
        }
        self.view.set_y_abs(line, y_abs_min, y_abs_max);
        self.enqueue(false);
        Ok(())
    }

    // --- queries --------------------------------------------------------------------

    /// First and one-past-last sample index of the window, for axis labels.
    pub fn visible_window(&self) -> (usize, usize) {
        self.view.visible_window()
    }

    /// Newest sample inside the window, `None` when the window shows nothing of `line`.
    pub fn latest_visible_value(&self, line: usize) -> Option<f32> {
        let (start, end) = self.view.visible_window();
        let end = end.min(self.store.size_of(line));
        if end <= start {
            return None;
        }
        self.store.get(line, end - 1)
    }

    // --- rendering ------------------------------------------------------------------

    /// Request a render of the current window. Returns the request's sequence number.
    pub fn update(&mut self) -> Result<u64, ChartError> {
        self.submit(false)
    }

    /// Hand every non-empty line of the front frame to `sink`. Returns the number of
    /// segments drawn.
    pub fn draw(&self, sink: &mut impl PolylineSink) -> usize {
        self.buffers.read_front(|frame| frame.draw(sink))
    }

    /// Run `f` against the front frame.
    pub fn front<R>(&self, f: impl FnOnce(&Frame) -> R) -> R {
        self.buffers.read_front(f)
    }

    pub fn front_seq(&self) -> u64 {
        self.buffers.front_seq()
    }

    /// Finish every queued pass and stop the worker. Later requests fail with
    /// [`ChartError::SchedulerClosed`].
    pub fn shutdown(&mut self) {
        self.scheduler.shutdown();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    // --- internals ------------------------------------------------------------------

    fn check_line(&self, line: usize) -> Result<(), ChartError> {
        if line < self.enabled.len() {
            Ok(())
        } else {
            Err(ChartError::UnknownLine { line, count: self.enabled.len() })
        }
    }

    /// Samples available for navigation: the longest enabled line.
    fn data_size(&self) -> usize {
        self.enabled
            .iter()
            .enumerate()
            .filter(|&(_, &on)| on)
            .map(|(line, _)| self.store.size_of(line))
            .max()
            .unwrap_or(0)
    }

    fn stop_following(&mut self) {
        if self.follow {
            log::debug!("following disabled by user navigation");
            self.follow = false;
        }
    }

    fn enqueue(&mut self, force_full: bool) {
        if let Err(err) = self.submit(force_full) {
            log::warn!("render request dropped: {err}");
        }
    }

    fn submit(&mut self, force_full: bool) -> Result<u64, ChartError> {
        if !self.scheduler.is_running() {
            return Err(ChartError::SchedulerClosed);
        }
        let sizes: Vec<usize> = (0..self.enabled.len()).map(|l| self.store.size_of(l)).collect();
        let window = self.view.snapshot(&sizes, &self.enabled, self.viewport);
        let mode = if force_full {
            UpdateMode::FullRebuild
        } else {
            UpdateMode::decide(self.last_request.as_ref().map(|(seq, w)| (*seq, w)), &window)
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        self.scheduler.submit(RenderRequest { seq, mode, window: window.clone() })?;
        self.last_request = Some((seq, window));
        Ok(seq)
    }
}

impl std::fmt::Debug for StreamChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamChart")
            .field("offset", &self.view.offset())
            .field("range", &self.view.range())
            .field("follow", &self.follow)
            .field("store", &self.store)
            .field("buffers", &self.buffers)
            .finish()
    }
}
