// File: crates/stripchart-core/tests/double_buffer.rs
// Purpose: Concurrent stress test: readers of the front frame never observe a frame that
// mixes two passes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use stripchart_core::{DoubleBuffer, Vertex};

const POINTS: usize = 64;
const PASSES: u64 = 5_000;

#[test]
fn readers_never_see_torn_frames() {
    let buffers = Arc::new(DoubleBuffer::new(2, POINTS));
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let buffers = Arc::clone(&buffers);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut last_seq = 0;
                let mut reads = 0u64;
                loop {
                    let seq = buffers.read_front(|frame| {
                        let tag = frame.seq as f32;
                        for line in &frame.lines {
                            if frame.seq == 0 {
                                assert!(line.is_empty());
                                continue;
                            }
                            assert_eq!(line.point_count(), POINTS);
                            assert!(line.vertices().iter().all(|v| v.x == tag && v.y == tag), "torn frame {}", frame.seq);
                        }
                        frame.seq
                    });
                    assert!(seq >= last_seq, "front went backwards: {seq} after {last_seq}");
                    last_seq = seq;
                    reads += 1;
                    if done.load(Ordering::Acquire) {
                        break;
                    }
                }
                reads
            })
        })
        .collect();

    for seq in 1..=PASSES {
        let swapped = buffers.publish(|_front, back| {
            back.seq = seq;
            let tag = seq as f32;
            for line in back.lines.iter_mut() {
                line.clear();
                for _ in 0..POINTS {
                    line.push_point(Vertex::new(tag, tag));
                }
            }
            true
        });
        assert!(swapped);
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        let reads = reader.join().expect("reader panicked");
        assert!(reads > 0);
    }
    assert_eq!(buffers.front_seq(), PASSES);
}

#[test]
fn declined_publish_keeps_front() {
    let buffers = DoubleBuffer::new(1, 8);
    let before = buffers.front_index();
    let swapped = buffers.publish(|_, back| {
        back.seq = 99;
        false
    });
    assert!(!swapped);
    assert_eq!(buffers.front_index(), before);
    assert_eq!(buffers.front_seq(), 0);
}

#[test]
fn reader_does_not_wait_for_pass_in_progress() {
    let buffers = DoubleBuffer::new(1, 8);
    buffers.publish(|_, back| {
        back.seq = 1;
        true
    });

    thread::scope(|scope| {
        buffers.publish(|_front, back| {
            back.seq = 2;
            let (tx, rx) = crossbeam::channel::bounded(1);
            let buffers = &buffers;
            scope.spawn(move || {
                let _ = tx.send(buffers.front_seq());
            });
            // The pass is still running while the reader looks at the front.
            let seen = rx.recv_timeout(Duration::from_secs(5)).expect("reader blocked on the writer");
            assert_eq!(seen, 1);
            true
        });
    });
    assert_eq!(buffers.front_seq(), 2);
}
