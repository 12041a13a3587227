// File: crates/stripchart-demo/src/session.rs
// Summary: Scripted demo session: stream a source into a chart at a fixed period, replay
// a few gestures and write a PNG snapshot after each step.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam::channel;
use stripchart_core::{StreamChart, UpdateMode};
use stripchart_render_skia::{render_to_png, theme, RenderOptions};

use crate::settings::DemoSettings;
use crate::source::SampleSource;

#[derive(Debug, Default)]
pub struct SessionReport {
    pub points_fed: usize,
    pub saturated: bool,
    pub frames: usize,
    pub incremental_frames: usize,
    pub snapshots: Vec<PathBuf>,
}

pub struct Session {
    settings: DemoSettings,
    stamp: String,
    render_snapshots: bool,
}

impl Session {
    pub fn new(settings: DemoSettings) -> Self {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        Self { settings, stamp, render_snapshots: true }
    }

    /// Skip PNG output (used by tests).
    pub fn without_snapshots(mut self) -> Self {
        self.render_snapshots = false;
        self
    }

    pub fn run(&self, source: &mut dyn SampleSource) -> Result<SessionReport> {
        let frames = Arc::new(AtomicUsize::new(0));
        let incremental = Arc::new(AtomicUsize::new(0));
        let (f, inc) = (Arc::clone(&frames), Arc::clone(&incremental));
        let mut chart = StreamChart::with_redraw(self.settings.chart.clone(), move |info| {
            f.fetch_add(1, Ordering::Relaxed);
            if matches!(info.mode, UpdateMode::IncrementalAppend { .. }) {
                inc.fetch_add(1, Ordering::Relaxed);
            }
        })?;
        anyhow::ensure!(
            source.line_count() >= chart.line_count(),
            "source provides {} lines, chart needs {}",
            source.line_count(),
            chart.line_count()
        );

        let mut report = SessionReport::default();
        self.stream(&mut chart, source, &mut report)?;
        self.snapshot(&mut chart, "live", &mut report)?;

        // Drag older data into view: half a viewport to the right.
        let width = chart.viewport_size().width;
        chart.on_pan_start(width * 0.5, 0.0);
        chart.on_pan_move(width * 0.25, 0.0);
        chart.on_pan_end();
        self.snapshot(&mut chart, "panned", &mut report)?;

        // Pinch in around the centre to zoom out: fingers end at half their starting distance,
        // so the window widens.
        chart.on_pinch_start(width * 0.5, 0.0, 400.0, 0.0);
        chart.on_pinch_update(2.0, 1.0);
        chart.on_pinch_end();
        chart.on_pan_end();
        self.snapshot(&mut chart, "zoomed", &mut report)?;

        // A cancelled drag leaves the view where it was.
        chart.on_pan_start(0.0, 0.0);
        chart.on_pan_move(width, 0.0);
        chart.on_pan_cancel();

        chart.set_follow_latest(true);
        self.snapshot(&mut chart, "latest", &mut report)?;

        chart.shutdown();
        report.frames = frames.load(Ordering::Relaxed);
        report.incremental_frames = incremental.load(Ordering::Relaxed);
        log::info!(
            "session done: {} points, {} frames ({} incremental), {} snapshots",
            report.points_fed,
            report.frames,
            report.incremental_frames,
            report.snapshots.len()
        );
        Ok(report)
    }

    fn stream(&self, chart: &mut StreamChart, source: &mut dyn SampleSource, report: &mut SessionReport) -> Result<()> {
        let feed = &self.settings.feed;
        let ticker = (feed.interval_ms > 0).then(|| channel::tick(Duration::from_millis(feed.interval_ms)));
        let mut row = Vec::with_capacity(chart.line_count());
        let started = Instant::now();

        while report.points_fed < feed.samples {
            if let Some(ticker) = &ticker {
                ticker.recv()?;
            }
            if !source.next_row(&mut row) {
                log::info!("source exhausted after {} points", report.points_fed);
                break;
            }
            let mut stored = false;
            for (line, value) in row.iter().take(chart.line_count()).enumerate() {
                stored |= chart.append_sample(line, *value)?.is_some();
            }
            if !stored {
                log::warn!("sample store full at {} points; stopping feed", chart.size_of(0));
                report.saturated = true;
                break;
            }
            chart.notify_window_advanced();
            report.points_fed += 1;
        }
        log::info!("streamed {} points in {:.2?}", report.points_fed, started.elapsed());
        Ok(())
    }

    fn snapshot(&self, chart: &mut StreamChart, name: &str, report: &mut SessionReport) -> Result<()> {
        let seq = chart.update()?;
        settle(chart, seq, Duration::from_secs(2));
        let (start, end) = chart.visible_window();
        log::info!("{name}: samples {start}..{end}");
        if !self.render_snapshots {
            return Ok(());
        }
        let out = &self.settings.output;
        let opts = RenderOptions {
            width: out.width,
            height: out.height,
            theme: theme::find(&out.theme),
            ..RenderOptions::default()
        };
        let path = out.dir.join(format!("stripchart_{}_{name}.png", self.stamp));
        render_to_png(chart, &opts, &path)?;
        println!("Wrote {}", path.display());
        report.snapshots.push(path);
        Ok(())
    }
}

/// Wait until the worker has published `seq` or `timeout` elapses.
fn settle(chart: &StreamChart, seq: u64, timeout: Duration) {
    let deadline = Instant::now() + timeout;
    while chart.front_seq() < seq {
        if Instant::now() >= deadline {
            log::warn!("frame {seq} not published within {timeout:?}");
            return;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
}
