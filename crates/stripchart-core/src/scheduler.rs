// File: crates/stripchart-core/src/scheduler.rs
// Summary: Single-worker render scheduler. Serializes geometry passes on a background
// thread and publishes each result through the double buffer.
//
// ```text
// ┌──────────────┐  RenderRequest  ┌──────────────────┐  publish  ┌──────────────┐
// │ driver       │ ──────────────► │ render worker    │ ────────► │ DoubleBuffer │
// │ (feed/input) │   (unbounded)   │ GeometryBuilder  │           │ front / back │
// └──────────────┘                 └──────────────────┘           └──────────────┘
// ```

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};

use crate::buffer::DoubleBuffer;
use crate::builder::{FrameInfo, GeometryBuilder};
use crate::error::ChartError;
use crate::store::SampleStore;
use crate::window::{RenderWindow, UpdateMode};

/// One queued pass: the window snapshot taken at enqueue time and the mode decided for it.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRequest {
    pub seq: u64,
    pub mode: UpdateMode,
    pub window: RenderWindow,
}

/// Called on the worker thread after every swap.
pub type FrameCallback = Box<dyn Fn(&FrameInfo) + Send + 'static>;

enum RenderCommand {
    Render(RenderRequest),
    Shutdown,
}

pub struct RenderScheduler {
    command_tx: Sender<RenderCommand>,
    thread_handle: Option<JoinHandle<()>>,
}

impl RenderScheduler {
    /// Spawn the worker thread.
    ///
    /// With `coalesce` set the worker renders only the newest of the requests waiting in
    /// the queue; otherwise every request is rendered in enqueue order.
    pub fn spawn(
        store: Arc<SampleStore>,
        buffers: Arc<DoubleBuffer>,
        coalesce: bool,
        on_frame: Option<FrameCallback>,
    ) -> Result<Self, ChartError> {
        let (command_tx, command_rx) = channel::unbounded();
        let worker = RenderWorker { store, buffers, coalesce, on_frame };
        let thread_handle = thread::Builder::new()
            .name("stripchart-render".to_string())
            .spawn(move || worker.run(command_rx))?;
        Ok(Self { command_tx, thread_handle: Some(thread_handle) })
    }

    /// Queue a pass. Never blocks.
    pub fn submit(&self, request: RenderRequest) -> Result<(), ChartError> {
        if self.thread_handle.is_none() {
            return Err(ChartError::SchedulerClosed);
        }
        self.command_tx
            .send(RenderCommand::Render(request))
            .map_err(|_| ChartError::SchedulerClosed)
    }

    pub fn is_running(&self) -> bool {
        self.thread_handle.is_some()
    }

    /// Stop accepting requests, let the worker finish what is already queued, and join it.
    pub fn shutdown(&mut self) {
        let Some(handle) = self.thread_handle.take() else { return };
        let _ = self.command_tx.send(RenderCommand::Shutdown);
        if handle.join().is_err() {
            log::error!("render worker panicked");
        }
    }
}

impl Drop for RenderScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct RenderWorker {
    store: Arc<SampleStore>,
    buffers: Arc<DoubleBuffer>,
    coalesce: bool,
    on_frame: Option<FrameCallback>,
}

impl RenderWorker {
    fn run(self, command_rx: Receiver<RenderCommand>) {
        log::info!("render worker started");
        while let Ok(cmd) = command_rx.recv() {
            match cmd {
                RenderCommand::Render(request) if self.coalesce => {
                    let (latest, stop) = Self::drain_latest(request, &command_rx);
                    self.render(&latest);
                    if stop {
                        break;
                    }
                }
                RenderCommand::Render(request) => self.render(&request),
                RenderCommand::Shutdown => break,
            }
        }
        log::info!("render worker stopped");
    }

    /// Newest queued request, and whether a shutdown was queued behind it.
    fn drain_latest(mut latest: RenderRequest, command_rx: &Receiver<RenderCommand>) -> (RenderRequest, bool) {
        let mut skipped = 0usize;
        while let Ok(cmd) = command_rx.try_recv() {
            match cmd {
                RenderCommand::Render(next) => {
                    latest = next;
                    skipped += 1;
                }
                RenderCommand::Shutdown => return (latest, true),
            }
        }
        if skipped > 0 {
            log::trace!("coalesced {skipped} render requests into {}", latest.seq);
        }
        (latest, false)
    }

    fn render(&self, request: &RenderRequest) {
        let mut info = None;
        self.buffers.publish(|front, back| {
            info = Some(GeometryBuilder::build(&self.store, request, front, back));
            true
        });
        if let (Some(info), Some(on_frame)) = (info, self.on_frame.as_ref()) {
            on_frame(&info);
        }
    }
}
