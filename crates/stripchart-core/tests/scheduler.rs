// File: crates/stripchart-core/tests/scheduler.rs
// Purpose: Render scheduler ordering, shutdown drain and incremental downgrade.

use std::sync::{Arc, Mutex};

use stripchart_core::{
    DoubleBuffer, FrameInfo, LineWindow, RenderRequest, RenderScheduler, RenderWindow, SampleStore, UpdateMode,
    ViewportSize,
};

fn store_with(n: usize) -> Arc<SampleStore> {
    let store = SampleStore::new(1, 1024);
    for i in 0..n {
        store.append(0, (i as f32 * 0.1).sin());
    }
    Arc::new(store)
}

fn request(store: &SampleStore, seq: u64, mode: UpdateMode, offset: usize) -> RenderRequest {
    RenderRequest {
        seq,
        mode,
        window: RenderWindow {
            offset,
            range: 100,
            stride: 1.0,
            viewport: ViewportSize::new(500.0, 200.0),
            lines: vec![LineWindow { enabled: true, size: store.size_of(0), y_min: -1.0, y_max: 1.0 }],
        },
    }
}

fn recording() -> (Arc<Mutex<Vec<FrameInfo>>>, stripchart_core::FrameCallback) {
    let frames = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&frames);
    let callback: stripchart_core::FrameCallback = Box::new(move |info: &FrameInfo| {
        if let Ok(mut frames) = sink.lock() {
            frames.push(*info);
        }
    });
    (frames, callback)
}

#[test]
fn passes_run_in_enqueue_order_and_drain_on_shutdown() {
    let store = store_with(600);
    let buffers = Arc::new(DoubleBuffer::new(1, 1000));
    let (frames, callback) = recording();
    let mut scheduler =
        RenderScheduler::spawn(Arc::clone(&store), Arc::clone(&buffers), false, Some(callback)).expect("spawn");

    scheduler.submit(request(&store, 1, UpdateMode::FullRebuild, 0)).expect("submit");
    for seq in 2..=100u64 {
        let mode = UpdateMode::IncrementalAppend { base_seq: seq - 1 };
        scheduler.submit(request(&store, seq, mode, seq as usize - 1)).expect("submit");
    }
    scheduler.shutdown();

    let frames = frames.lock().expect("frames");
    assert_eq!(frames.len(), 100);
    assert!(frames.iter().enumerate().all(|(i, f)| f.seq == i as u64 + 1));
    assert!(frames[1..].iter().all(|f| matches!(f.mode, UpdateMode::IncrementalAppend { .. })));
    assert_eq!(buffers.front_seq(), 100);
    buffers.read_front(|frame| {
        assert_eq!(frame.offset, 99);
        assert_eq!(frame.lines[0].segment_count(), 99);
    });
}

#[test]
fn stale_incremental_request_is_rebuilt() {
    let store = store_with(300);
    let buffers = Arc::new(DoubleBuffer::new(1, 1000));
    let (frames, callback) = recording();
    let mut scheduler =
        RenderScheduler::spawn(Arc::clone(&store), Arc::clone(&buffers), false, Some(callback)).expect("spawn");

    scheduler.submit(request(&store, 1, UpdateMode::FullRebuild, 0)).expect("submit");
    // Base 2 was never published.
    scheduler
        .submit(request(&store, 3, UpdateMode::IncrementalAppend { base_seq: 2 }, 1))
        .expect("submit");
    scheduler.shutdown();

    let frames = frames.lock().expect("frames");
    assert_eq!(frames.last().map(|f| f.mode), Some(UpdateMode::FullRebuild));
    assert_eq!(buffers.front_seq(), 3);
}

#[test]
fn coalescing_renders_latest_request_last() {
    let store = store_with(800);
    let buffers = Arc::new(DoubleBuffer::new(1, 1000));
    let (frames, callback) = recording();
    let mut scheduler =
        RenderScheduler::spawn(Arc::clone(&store), Arc::clone(&buffers), true, Some(callback)).expect("spawn");

    for seq in 1..=200u64 {
        scheduler.submit(request(&store, seq, UpdateMode::FullRebuild, seq as usize)).expect("submit");
    }
    scheduler.shutdown();

    let frames = frames.lock().expect("frames");
    assert!(!frames.is_empty() && frames.len() <= 200);
    assert!(frames.windows(2).all(|w| w[0].seq < w[1].seq));
    assert_eq!(frames.last().map(|f| f.seq), Some(200));
    buffers.read_front(|frame| assert_eq!(frame.offset, 200));
}

#[test]
fn submit_after_shutdown_fails() {
    let store = store_with(10);
    let buffers = Arc::new(DoubleBuffer::new(1, 1000));
    let mut scheduler = RenderScheduler::spawn(store, buffers, false, None).expect("spawn");
    scheduler.shutdown();
    scheduler.shutdown();
    assert!(!scheduler.is_running());
    let store = SampleStore::new(1, 4);
    assert!(scheduler.submit(request(&store, 1, UpdateMode::FullRebuild, 0)).is_err());
}
