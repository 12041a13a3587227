// File: crates/stripchart-core/tests/builder.rs
// Purpose: Geometry builder: incremental append matches full rebuild exactly, stride
// sampling, mode downgrades and per-line failures.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stripchart_core::{
    Frame, GeometryBuilder, LineWindow, RenderRequest, RenderWindow, SampleStore, UpdateMode, ViewportSize,
};

const VIEWPORT: ViewportSize = ViewportSize::new(800.0, 400.0);

fn random_store(lines: usize, n: usize, seed: u64) -> SampleStore {
    let store = SampleStore::new(lines, 4096);
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..n {
        for line in 0..lines {
            store.append(line, rng.random_range(-1.5f32..1.5));
        }
    }
    store
}

fn window(store: &SampleStore, offset: usize, range: usize, stride: f64) -> RenderWindow {
    RenderWindow {
        offset,
        range,
        stride,
        viewport: VIEWPORT,
        lines: (0..store.line_count())
            .map(|line| LineWindow { enabled: true, size: store.size_of(line), y_min: -1.0, y_max: 1.0 })
            .collect(),
    }
}

fn full(store: &SampleStore, seq: u64, w: RenderWindow) -> Frame {
    let mut frame = Frame::new(store.line_count(), 1000);
    let front = Frame::new(store.line_count(), 1000);
    GeometryBuilder::build(store, &RenderRequest { seq, mode: UpdateMode::FullRebuild, window: w }, &front, &mut frame);
    frame
}

#[test]
fn incremental_append_matches_full_rebuild() {
    let store = random_store(2, 600, 11);
    let range = 150;
    let mut front = full(&store, 1, window(&store, 0, range, 1.0));
    let mut back = Frame::new(2, 1000);

    for step in 1..=300u64 {
        let offset = step as usize;
        let request = RenderRequest {
            seq: step + 1,
            mode: UpdateMode::IncrementalAppend { base_seq: step },
            window: window(&store, offset, range, 1.0),
        };
        let info = GeometryBuilder::build(&store, &request, &front, &mut back);
        assert_eq!(info.mode, UpdateMode::IncrementalAppend { base_seq: step });
        assert!(info.complete);

        let expected = full(&store, step + 1, window(&store, offset, range, 1.0));
        for line in 0..2 {
            assert_eq!(back.lines[line].vertices(), expected.lines[line].vertices(), "line {line} at offset {offset}");
        }
        std::mem::swap(&mut front, &mut back);
    }
}

#[test]
fn incremental_request_on_stale_base_is_rebuilt() {
    let store = random_store(1, 300, 3);
    let front = full(&store, 5, window(&store, 10, 100, 1.0));
    let mut back = Frame::new(1, 1000);

    // Base seq mismatch.
    let request = RenderRequest {
        seq: 7,
        mode: UpdateMode::IncrementalAppend { base_seq: 6 },
        window: window(&store, 11, 100, 1.0),
    };
    let info = GeometryBuilder::build(&store, &request, &front, &mut back);
    assert_eq!(info.mode, UpdateMode::FullRebuild);

    // Offset jumped by more than one sample.
    let request = RenderRequest {
        seq: 6,
        mode: UpdateMode::IncrementalAppend { base_seq: 5 },
        window: window(&store, 13, 100, 1.0),
    };
    let info = GeometryBuilder::build(&store, &request, &front, &mut back);
    assert_eq!(info.mode, UpdateMode::FullRebuild);
    let expected = full(&store, 6, window(&store, 13, 100, 1.0));
    assert_eq!(back.lines[0].vertices(), expected.lines[0].vertices());
}

#[test]
fn rebuild_spans_viewport_and_counts_segments() {
    let store = random_store(1, 250, 1);
    let frame = full(&store, 1, window(&store, 50, 200, 1.0));
    let line = &frame.lines[0];
    assert_eq!(line.segment_count(), 199);
    assert_eq!(line.vertices().len(), 398);
    assert_eq!(line.vertices()[0].x, 0.0);
    assert_eq!(line.vertices()[397].x, VIEWPORT.width);
    for (a, b) in line.segments() {
        assert!(a.x < b.x);
        assert!((0.0..=VIEWPORT.height).contains(&a.y));
    }
}

#[test]
fn partially_filled_window_stops_at_size() {
    let store = random_store(1, 40, 2);
    let frame = full(&store, 1, window(&store, 30, 200, 1.0));
    assert_eq!(frame.lines[0].segment_count(), 9);
    let frame = full(&store, 1, window(&store, 40, 200, 1.0));
    assert_eq!(frame.lines[0].segment_count(), 0);
}

#[test]
fn wide_window_is_stride_sampled() {
    let store = random_store(1, 3000, 5);
    let frame = full(&store, 1, window(&store, 0, 3000, 3.0));
    let line = &frame.lines[0];
    assert_eq!(line.segment_count(), 999);
    assert!(line.segments().all(|(a, b)| a.x < b.x));
}

#[test]
fn missing_samples_leave_line_empty_and_frame_incomplete() {
    let store = random_store(2, 50, 9);
    let mut w = window(&store, 0, 100, 1.0);
    // Claims more samples than the store holds.
    w.lines[1].size = 100;
    let front = Frame::new(2, 1000);
    let mut back = Frame::new(2, 1000);
    let info = GeometryBuilder::build(&store, &RenderRequest { seq: 1, mode: UpdateMode::FullRebuild, window: w }, &front, &mut back);
    assert!(!info.complete);
    assert_eq!(back.lines[0].segment_count(), 49);
    assert!(back.lines[1].is_empty());
    assert_eq!(info.total_segments, 49);
}

#[test]
fn decide_prefers_incremental_only_for_single_step_advance() {
    let store = random_store(1, 500, 4);
    let a = window(&store, 10, 100, 1.0);
    let b = window(&store, 11, 100, 1.0);
    assert_eq!(UpdateMode::decide(None, &b), UpdateMode::FullRebuild);
    assert_eq!(UpdateMode::decide(Some((3, &a)), &b), UpdateMode::IncrementalAppend { base_seq: 3 });

    let jumped = window(&store, 12, 100, 1.0);
    assert_eq!(UpdateMode::decide(Some((3, &a)), &jumped), UpdateMode::FullRebuild);

    let mut rescaled = b.clone();
    rescaled.lines[0].y_max = 2.0;
    assert_eq!(UpdateMode::decide(Some((3, &a)), &rescaled), UpdateMode::FullRebuild);

    let mut resized = b.clone();
    resized.viewport = ViewportSize::new(400.0, 400.0);
    assert_eq!(UpdateMode::decide(Some((3, &a)), &resized), UpdateMode::FullRebuild);

    let strided = window(&store, 11, 100, 1.5);
    assert_eq!(UpdateMode::decide(Some((3, &a)), &strided), UpdateMode::FullRebuild);
}
