use std::sync::{Arc, Mutex};

use super::*;

#[derive(Default)]
struct Log {
    begun: Vec<SinkConfig>,
    frames: usize,
    ends: usize,
}

struct SharedSink(Arc<Mutex<Log>>);

impl FrameSink for SharedSink {
    fn begin(&mut self, cfg: SinkConfig) -> BoothResult<()> {
        self.0.lock().unwrap().begun.push(cfg);
        Ok(())
    }

    fn push_frame(&mut self, _frame: &PixelBuffer) -> BoothResult<()> {
        self.0.lock().unwrap().frames += 1;
        Ok(())
    }

    fn end(&mut self) -> BoothResult<()> {
        self.0.lock().unwrap().ends += 1;
        Ok(())
    }
}

fn recorder() -> (VideoRecorder, Arc<Mutex<Log>>) {
    let log = Arc::new(Mutex::new(Log::default()));
    let rec = VideoRecorder::new("out.mp4", Box::new(SharedSink(log.clone())));
    (rec, log)
}

fn frame(w: u32, h: u32) -> PixelBuffer {
    PixelBuffer::filled(w, h, &[1, 2, 3]).unwrap()
}

#[test]
fn opens_lazily_with_first_frame_size() {
    let (mut rec, log) = recorder();
    assert!(!rec.is_open());
    assert!(log.lock().unwrap().begun.is_empty());

    rec.write(&frame(6, 4)).unwrap();
    rec.write(&frame(6, 4)).unwrap();
    assert!(rec.is_open());
    assert_eq!(rec.frame_size(), Some((6, 4)));
    assert_eq!(rec.frames_written(), 2);

    let log = log.lock().unwrap();
    assert_eq!(
        log.begun,
        vec![SinkConfig {
            width: 6,
            height: 4,
            fps: RECORD_FPS
        }]
    );
    assert_eq!(log.frames, 2);
}

#[test]
fn size_mismatch_is_rejected() {
    let (mut rec, log) = recorder();
    rec.write(&frame(6, 4)).unwrap();
    let err = rec.write(&frame(4, 6)).unwrap_err();
    assert!(matches!(err, BoothError::Validation(_)));
    assert_eq!(log.lock().unwrap().frames, 1);
}

#[test]
fn close_is_idempotent() {
    let (mut rec, log) = recorder();
    rec.write(&frame(2, 2)).unwrap();
    rec.close().unwrap();
    rec.close().unwrap();
    drop(rec);
    assert_eq!(log.lock().unwrap().ends, 1);
}

#[test]
fn closing_unopened_recorder_skips_the_sink() {
    let (mut rec, log) = recorder();
    rec.close().unwrap();
    assert_eq!(log.lock().unwrap().ends, 0);
    assert!(rec.write(&frame(2, 2)).is_err());
}

#[test]
fn in_memory_sink_keeps_frames() {
    let mut sink = InMemorySink::new();
    sink.begin(SinkConfig {
        width: 1,
        height: 1,
        fps: 30,
    })
    .unwrap();
    sink.push_frame(&frame(1, 1)).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.frames().len(), 1);
    assert!(sink.is_ended());
    assert_eq!(sink.config().map(|c| c.fps), Some(30));
}
