// moviedim-core/tests/detector_tests.rs
//
// Integration tests for the aspect ratio detector, driven through scripted
// video sources so no ffmpeg installation is needed.

use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use log::Level;
use moviedim_core::config::MAX_SAMPLE_FRAMES;
use moviedim_core::processing::{DetectionOutcome, FallbackReason};
use moviedim_core::{
    AspectRatioDetector, CoreError, CoreResult, DEFAULT_RATIO, DetectionOptions, LumaFrame,
    MemorySink, SourceOpener, VideoSource,
};
use tempfile::TempDir;

// ---- Scripted source ----

#[derive(Clone, Default)]
struct Script {
    frame_count: Option<u64>,
    /// Frames returned by index.
    indexed: HashMap<u64, LumaFrame>,
    /// Returned for any index not in `indexed`; `None` makes it an empty read.
    any_index: Option<LumaFrame>,
    /// Frames returned one after another in sequential mode.
    sequential: Vec<LumaFrame>,
    /// Index whose read returns an error.
    failing_index: Option<u64>,
}

#[derive(Default)]
struct Probe {
    opened: AtomicUsize,
    released: AtomicUsize,
    indexed_reads: Mutex<Vec<u64>>,
    sequential_reads: AtomicUsize,
}

struct ScriptedSource {
    script: Script,
    cursor: usize,
    probe: Arc<Probe>,
}

impl VideoSource for ScriptedSource {
    fn frame_count(&self) -> Option<u64> {
        self.script.frame_count
    }

    fn read_frame_at(&mut self, index: u64) -> CoreResult<Option<LumaFrame>> {
        self.probe.indexed_reads.lock().unwrap().push(index);
        if self.script.failing_index == Some(index) {
            return Err(CoreError::Decode(format!("corrupt frame {index}")));
        }
        Ok(self
            .script
            .indexed
            .get(&index)
            .or(self.script.any_index.as_ref())
            .cloned())
    }

    fn read_next_frame(&mut self) -> CoreResult<Option<LumaFrame>> {
        self.probe.sequential_reads.fetch_add(1, Ordering::SeqCst);
        let frame = self.script.sequential.get(self.cursor).cloned();
        self.cursor += 1;
        Ok(frame)
    }
}

impl Drop for ScriptedSource {
    fn drop(&mut self) {
        self.probe.released.fetch_add(1, Ordering::SeqCst);
    }
}

struct ScriptedOpener {
    script: Script,
    probe: Arc<Probe>,
    fail_open: bool,
}

impl ScriptedOpener {
    fn new(script: Script) -> (Self, Arc<Probe>) {
        let probe = Arc::new(Probe::default());
        (
            Self {
                script,
                probe: Arc::clone(&probe),
                fail_open: false,
            },
            probe,
        )
    }
}

impl SourceOpener for ScriptedOpener {
    type Source = ScriptedSource;

    fn open(&self, path: &Path, _sample_frames: usize) -> CoreResult<Self::Source> {
        if self.fail_open {
            return Err(CoreError::VideoInfo(format!(
                "No video stream found in {}",
                path.display()
            )));
        }
        self.probe.opened.fetch_add(1, Ordering::SeqCst);
        Ok(ScriptedSource {
            script: self.script.clone(),
            cursor: 0,
            probe: Arc::clone(&self.probe),
        })
    }
}

// ---- Helpers ----

fn dummy_video() -> Result<(TempDir, PathBuf), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("movie.mkv");
    File::create(&path)?;
    Ok((dir, path))
}

fn options(sample_frames: usize, black_threshold: u8) -> DetectionOptions {
    DetectionOptions {
        sample_frames,
        black_threshold,
    }
}

/// A frame with black bars above and below `visible_rows` of content.
fn letterboxed(width: u32, height: u32, visible_rows: u32) -> LumaFrame {
    let mut frame = LumaFrame::filled(width, height, 0);
    frame.fill_rect(0, (height - visible_rows) / 2, width, visible_rows, 180);
    frame
}

fn indexed_script(total: u64, frame: &LumaFrame) -> Script {
    Script {
        frame_count: Some(total),
        any_index: Some(frame.clone()),
        ..Default::default()
    }
}

// ---- Tests ----

#[test]
fn test_scope_letterbox_is_anamorphic() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = dummy_video()?;
    let (opener, _) = ScriptedOpener::new(indexed_script(100, &letterboxed(1920, 1080, 800)));
    let detector = AspectRatioDetector::new(opener, options(8, 16));

    let result = detector.calculate(&path);

    assert_eq!(result.aspect_ratio, 2.4);
    assert!(result.valid);
    assert_eq!(
        result.outcome,
        DetectionOutcome::Classified {
            band: "Anamorphic scope",
            width: 1920,
            height: 800,
        }
    );
    Ok(())
}

#[test]
fn test_uniform_frame_gives_frame_ratio() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = dummy_video()?;

    // 1920x1080 rounds to 1.78, inside the flat band
    let (opener, _) = ScriptedOpener::new(indexed_script(50, &LumaFrame::filled(1920, 1080, 100)));
    let result = AspectRatioDetector::new(opener, options(8, 16)).calculate(&path);
    assert_eq!(result.aspect_ratio, 1.78);
    assert!(result.valid);

    // 640x480 rounds to 1.33, outside every band
    let (opener, _) = ScriptedOpener::new(indexed_script(50, &LumaFrame::filled(640, 480, 100)));
    let result = AspectRatioDetector::new(opener, options(8, 16)).calculate(&path);
    assert_eq!(result.aspect_ratio, DEFAULT_RATIO);
    assert!(!result.valid);
    assert!(matches!(
        result.outcome,
        DetectionOutcome::Unclassified { measured, .. } if measured == 1.33
    ));
    Ok(())
}

#[test]
fn test_all_black_gives_default() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = dummy_video()?;
    let (opener, probe) = ScriptedOpener::new(indexed_script(100, &LumaFrame::filled(1920, 1080, 10)));
    let sink = Arc::new(MemorySink::new());
    let detector = AspectRatioDetector::new(opener, options(8, 16)).with_sink(sink.clone());

    let result = detector.calculate(&path);

    assert_eq!(result.aspect_ratio, DEFAULT_RATIO);
    assert!(!result.valid);
    assert_eq!(
        result.outcome,
        DetectionOutcome::Fallback {
            reason: FallbackReason::NoVisibleContent
        }
    );
    assert!(sink.contains(Level::Warn, "No visible (non-black) pixels"));
    assert!(sink.contains(Level::Debug, "No non-black pixels in frame index 0"));
    assert_eq!(probe.released.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_single_pixel_is_square_and_default() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = dummy_video()?;
    let mut frame = LumaFrame::filled(64, 48, 0);
    frame.fill_rect(10, 20, 1, 1, 255);
    let (opener, _) = ScriptedOpener::new(indexed_script(4, &frame));

    let result = AspectRatioDetector::new(opener, options(8, 16)).calculate(&path);

    assert_eq!(result.aspect_ratio, DEFAULT_RATIO);
    assert!(!result.valid);
    assert_eq!(
        result.outcome,
        DetectionOutcome::Unclassified {
            measured: 1.0,
            width: 1,
            height: 1,
        }
    );
    Ok(())
}

#[test]
fn test_indices_for_hundred_frames() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = dummy_video()?;
    let (opener, probe) = ScriptedOpener::new(indexed_script(100, &LumaFrame::filled(16, 9, 200)));
    let sink = Arc::new(MemorySink::new());
    AspectRatioDetector::new(opener, options(8, 16))
        .with_sink(sink.clone())
        .calculate(&path);

    let reads = probe.indexed_reads.lock().unwrap().clone();
    assert_eq!(reads.len(), 8);
    assert_eq!(reads[0], 0);
    assert!(reads.windows(2).all(|w| w[0] <= w[1]));
    assert!(reads.iter().all(|&i| i < 100));
    assert!(sink.contains(Level::Info, "Sampling frames by indices"));
    Ok(())
}

#[test]
fn test_union_across_frames() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = dummy_video()?;

    // A dark scene and a bright scene: only together do they span 2.39:1
    let mut left = LumaFrame::filled(1920, 1080, 0);
    left.fill_rect(0, 140, 900, 803, 120);
    let mut right = LumaFrame::filled(1920, 1080, 0);
    right.fill_rect(1000, 140, 920, 803, 120);

    let script = Script {
        frame_count: Some(2),
        indexed: HashMap::from([(0, left), (1, right)]),
        ..Default::default()
    };
    let (opener, _) = ScriptedOpener::new(script);
    let result = AspectRatioDetector::new(opener, options(8, 16)).calculate(&path);

    assert_eq!(result.aspect_ratio, 2.39);
    assert!(result.valid);
    Ok(())
}

#[test]
fn test_failed_indexed_reads_are_skipped() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = dummy_video()?;
    let frame = letterboxed(1920, 1080, 1040);
    let script = Script {
        frame_count: Some(4),
        // index 1 is missing (empty read), index 2 errors
        indexed: HashMap::from([(0, frame.clone()), (3, frame)]),
        failing_index: Some(2),
        ..Default::default()
    };
    let (opener, probe) = ScriptedOpener::new(script);
    let sink = Arc::new(MemorySink::new());
    let result = AspectRatioDetector::new(opener, options(8, 16))
        .with_sink(sink.clone())
        .calculate(&path);

    assert_eq!(*probe.indexed_reads.lock().unwrap(), vec![0, 1, 2, 3]);
    assert!(sink.contains(Level::Warn, "Frame read failed at index 1"));
    assert!(sink.contains(Level::Warn, "Frame read failed at index 2: "));
    // 1920x1040 -> 1.85
    assert_eq!(result.aspect_ratio, 1.85);
    assert!(result.valid);
    Ok(())
}

#[test]
fn test_sequential_mode_stops_at_eof() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = dummy_video()?;
    let script = Script {
        frame_count: None,
        sequential: vec![
            LumaFrame::filled(1920, 1080, 0),
            letterboxed(1920, 1080, 816),
            letterboxed(1920, 1080, 816),
        ],
        ..Default::default()
    };
    let (opener, probe) = ScriptedOpener::new(script);
    let sink = Arc::new(MemorySink::new());
    let result = AspectRatioDetector::new(opener, options(8, 16))
        .with_sink(sink.clone())
        .calculate(&path);

    // three frames, then the fourth read hits the end of the stream
    assert_eq!(probe.sequential_reads.load(Ordering::SeqCst), 4);
    assert!(probe.indexed_reads.lock().unwrap().is_empty());
    assert!(sink.contains(Level::Info, "using sequential sampling"));
    assert!(sink.contains(Level::Warn, "EOF reached"));
    // 1920 / 816 = 2.3529 -> 2.35
    assert_eq!(result.aspect_ratio, 2.35);
    assert!(result.valid);
    Ok(())
}

#[test]
fn test_sequential_black_frames_count_as_samples() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = dummy_video()?;
    let mut sequential = vec![LumaFrame::filled(320, 240, 0); 3];
    sequential.push(LumaFrame::filled(320, 240, 255));
    let script = Script {
        frame_count: Some(0),
        sequential,
        ..Default::default()
    };
    let (opener, probe) = ScriptedOpener::new(script);
    let result = AspectRatioDetector::new(opener, options(3, 16)).calculate(&path);

    // the bright fourth frame is beyond the sample budget
    assert_eq!(probe.sequential_reads.load(Ordering::SeqCst), 3);
    assert_eq!(
        result.outcome,
        DetectionOutcome::Fallback {
            reason: FallbackReason::NoVisibleContent
        }
    );
    Ok(())
}

#[test]
fn test_missing_file_is_default_without_opening() {
    let (opener, probe) = ScriptedOpener::new(Script::default());
    let sink = Arc::new(MemorySink::new());
    let detector = AspectRatioDetector::new(opener, options(8, 16)).with_sink(sink.clone());

    for path in ["/definitely/not/here.mkv", ""] {
        let result = detector.calculate(Path::new(path));
        assert_eq!(result.aspect_ratio, DEFAULT_RATIO);
        assert!(!result.valid);
        assert_eq!(
            result.outcome,
            DetectionOutcome::Fallback {
                reason: FallbackReason::FileNotFound
            }
        );
    }
    assert_eq!(probe.opened.load(Ordering::SeqCst), 0);
    assert!(sink.contains(Level::Error, "File does not exist"));
}

#[test]
fn test_open_failure_is_default() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = dummy_video()?;
    let (mut opener, _) = ScriptedOpener::new(Script::default());
    opener.fail_open = true;
    let sink = Arc::new(MemorySink::new());

    let result = AspectRatioDetector::new(opener, options(8, 16))
        .with_sink(sink.clone())
        .calculate(&path);

    assert_eq!(
        result.outcome,
        DetectionOutcome::Fallback {
            reason: FallbackReason::SourceUnavailable
        }
    );
    assert!(sink.contains(Level::Error, "Could not open video file"));
    Ok(())
}

#[test]
fn test_source_released_on_every_path() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = dummy_video()?;

    let scripts = [
        indexed_script(10, &letterboxed(1920, 1080, 800)),
        indexed_script(10, &LumaFrame::filled(1920, 1080, 0)),
        Script {
            frame_count: None,
            ..Default::default()
        },
        Script {
            frame_count: Some(3),
            failing_index: Some(0),
            ..Default::default()
        },
    ];

    for script in scripts {
        let (opener, probe) = ScriptedOpener::new(script);
        AspectRatioDetector::new(opener, options(8, 16)).calculate(&path);
        assert_eq!(probe.opened.load(Ordering::SeqCst), 1);
        assert_eq!(probe.released.load(Ordering::SeqCst), 1);
    }
    Ok(())
}

#[test]
fn test_per_call_options_override_defaults() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = dummy_video()?;

    // content at luminance 40: visible at threshold 16, black at threshold 50
    let mut frame = LumaFrame::filled(1920, 1080, 0);
    frame.fill_rect(0, 140, 1920, 800, 40);
    let (opener, probe) = ScriptedOpener::new(indexed_script(100, &frame));
    let detector = AspectRatioDetector::new(opener, options(8, 16));

    assert_eq!(detector.calculate(&path).aspect_ratio, 2.4);
    let result = detector.calculate_with(&path, &options(2, 50));
    assert_eq!(result.aspect_ratio, DEFAULT_RATIO);
    assert_eq!(probe.indexed_reads.lock().unwrap().len(), 8 + 2);
    Ok(())
}

#[test]
fn test_never_panics_across_parameters() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = dummy_video()?;

    let mut busy = LumaFrame::filled(7, 5, 0);
    busy.fill_rect(1, 1, 3, 2, 128);
    busy.fill_rect(6, 4, 1, 1, 255);

    let frames = [
        LumaFrame::filled(1, 1, 255),
        LumaFrame::filled(0, 0, 0),
        busy,
        letterboxed(192, 108, 80),
    ];

    for frame in &frames {
        for threshold in [0u8, 1, 16, 127, 254, 255] {
            for samples in [0usize, 1, 2, 8, 100] {
                for total in [None, Some(0), Some(1), Some(5), Some(1000)] {
                    let mut script = indexed_script(0, frame);
                    script.frame_count = total;
                    script.sequential = vec![frame.clone(); 3];

                    let (opener, _) = ScriptedOpener::new(script);
                    let result = AspectRatioDetector::new(opener, options(samples, threshold))
                        .calculate(&path);

                    assert!(result.aspect_ratio.is_finite());
                    assert_eq!(
                        result.aspect_ratio,
                        (result.aspect_ratio * 100.0).round() / 100.0
                    );
                    assert_eq!(result.valid, result.aspect_ratio != DEFAULT_RATIO);
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_unbounded_sample_request_is_capped() -> Result<(), Box<dyn Error>> {
    let (_dir, path) = dummy_video()?;

    // Container claims an absurd frame count; the caller asks for every frame
    let script = Script {
        frame_count: Some(u64::MAX / 2),
        any_index: Some(letterboxed(192, 108, 80)),
        ..Default::default()
    };
    let (opener, probe) = ScriptedOpener::new(script);
    let detector = AspectRatioDetector::new(opener, options(8, 16));

    let result = detector.calculate_with(&path, &options(usize::MAX, 16));

    assert_eq!(result.aspect_ratio, 2.4);
    assert!(result.valid);
    assert_eq!(probe.indexed_reads.lock().unwrap().len(), MAX_SAMPLE_FRAMES);
    Ok(())
}
