// ============================================================================
// moviedim-core/src/processing/detector.rs
// ============================================================================
//
// ASPECT RATIO DETECTION: Visible Region Measurement
//
// Samples a handful of frames, finds the region that is brighter than the
// black threshold in each, and measures the union of those regions. The
// measured ratio is then classified against the known cinematic bands.
//
// Every failure (missing file, unopenable source, unreadable frames, all-black
// samples) ends in the default ratio plus a log message. Nothing is returned
// as an error to the caller.

use std::path::Path;
use std::sync::Arc;

use log::Level;

use super::bounding_box::VisibleBoundingBox;
use super::classifier::{DEFAULT_RATIO, find_band, round_ratio};
use super::sampling::{SamplePlan, clamp_sample_frames, plan_samples};
use super::threshold::content_extent;
use super::{AspectRatioResult, DetectionOutcome, FallbackReason};
use crate::config::{CoreConfig, DEFAULT_BLACK_THRESHOLD, DEFAULT_SAMPLE_FRAMES};
use crate::error::CoreResult;
use crate::logging::{FacadeSink, LogSink};
use crate::media::{FfmpegSourceOpener, LumaFrame, SourceOpener, VideoSource};

/// Per-call detection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionOptions {
    /// Frames to sample, clamped to `1..=MAX_SAMPLE_FRAMES`.
    pub sample_frames: usize,
    /// Luminance at or below this value counts as black.
    pub black_threshold: u8,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            sample_frames: DEFAULT_SAMPLE_FRAMES,
            black_threshold: DEFAULT_BLACK_THRESHOLD,
        }
    }
}

/// Object-safe view of a detector, shared by the HTTP layer and the CLI.
pub trait AspectRatioEstimator: Send + Sync {
    /// Options used when the caller does not override them.
    fn default_options(&self) -> DetectionOptions;

    /// Estimates the visible aspect ratio of `path`. Never fails.
    fn estimate(&self, path: &Path, options: &DetectionOptions) -> AspectRatioResult;
}

/// Measures the visible aspect ratio of video files.
pub struct AspectRatioDetector<O: SourceOpener = FfmpegSourceOpener> {
    opener: O,
    options: DetectionOptions,
    sink: Arc<dyn LogSink>,
}

impl AspectRatioDetector<FfmpegSourceOpener> {
    /// Detector backed by ffmpeg/ffprobe with the configured defaults.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(
            FfmpegSourceOpener::new(),
            DetectionOptions {
                sample_frames: config.sample_frames,
                black_threshold: config.black_threshold,
            },
        )
    }
}

impl<O: SourceOpener> AspectRatioDetector<O> {
    pub fn new(opener: O, options: DetectionOptions) -> Self {
        Self {
            opener,
            options: DetectionOptions {
                sample_frames: clamp_sample_frames(options.sample_frames),
                ..options
            },
            sink: Arc::new(FacadeSink::default()),
        }
    }

    /// Replaces the log sink (defaults to the `log` facade).
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn sample_frames(&self) -> usize {
        self.options.sample_frames
    }

    pub fn black_threshold(&self) -> u8 {
        self.options.black_threshold
    }

    /// Estimates `path` with the detector's own options.
    pub fn calculate(&self, path: &Path) -> AspectRatioResult {
        self.calculate_with(path, &self.options)
    }

    /// Estimates `path` with explicit options.
    pub fn calculate_with(&self, path: &Path, options: &DetectionOptions) -> AspectRatioResult {
        match self.measure(path, options) {
            Ok(result) => result,
            Err(e) => {
                self.log(
                    Level::Error,
                    format!("Could not open video file {}: {}", path.display(), e),
                );
                AspectRatioResult::fallback(FallbackReason::SourceUnavailable)
            }
        }
    }

    fn log(&self, level: Level, message: impl AsRef<str>) {
        self.sink.log(level, message.as_ref());
    }

    fn measure(&self, path: &Path, options: &DetectionOptions) -> CoreResult<AspectRatioResult> {
        if path.as_os_str().is_empty() || !path.exists() {
            self.log(
                Level::Error,
                format!("File does not exist: {}", path.display()),
            );
            return Ok(AspectRatioResult::fallback(FallbackReason::FileNotFound));
        }

        let sample_frames = clamp_sample_frames(options.sample_frames);
        let threshold = options.black_threshold;

        // Per-frame read failures are skipped below; only opening is fatal.
        let mut source = self.opener.open(path, sample_frames)?;

        let mut bbox: Option<VisibleBoundingBox> = None;

        match plan_samples(source.frame_count(), sample_frames) {
            SamplePlan::Indexed(indices) => {
                self.log(
                    Level::Info,
                    format!("Sampling frames by indices: {:?}", indices),
                );
                for index in indices {
                    let frame = match source.read_frame_at(index) {
                        Ok(Some(frame)) => frame,
                        Ok(None) => {
                            self.log(
                                Level::Warn,
                                format!("Frame read failed at index {}", index),
                            );
                            continue;
                        }
                        Err(e) => {
                            self.log(
                                Level::Warn,
                                format!("Frame read failed at index {}: {}", index, e),
                            );
                            continue;
                        }
                    };

                    if !accumulate(&frame, threshold, &mut bbox) {
                        self.log(
                            Level::Debug,
                            format!("No non-black pixels in frame index {}", index),
                        );
                    }
                }
            }
            SamplePlan::Sequential(limit) => {
                self.log(
                    Level::Info,
                    "Frame count not available, using sequential sampling",
                );
                let mut taken = 0;
                while taken < limit {
                    let frame = match source.read_next_frame() {
                        Ok(Some(frame)) => frame,
                        Ok(None) => {
                            self.log(Level::Warn, "Sequential frame read failed or EOF reached");
                            break;
                        }
                        Err(e) => {
                            self.log(
                                Level::Warn,
                                format!("Sequential frame read failed or EOF reached: {}", e),
                            );
                            break;
                        }
                    };

                    if !accumulate(&frame, threshold, &mut bbox) {
                        self.log(
                            Level::Debug,
                            format!("No non-black pixels in sequential frame {}", taken),
                        );
                    }
                    taken += 1;
                }
            }
        }

        drop(source);

        let Some(bbox) = bbox.filter(VisibleBoundingBox::has_content) else {
            self.log(
                Level::Warn,
                format!(
                    "No visible (non-black) pixels detected in sampled frames for {}",
                    path.display()
                ),
            );
            return Ok(AspectRatioResult::fallback(FallbackReason::NoVisibleContent));
        };

        let (width, height) = bbox.visible_dimensions();
        if width <= 0 || height <= 0 {
            self.log(
                Level::Error,
                format!(
                    "Computed invalid visible dimensions ({}x{}) for {}",
                    width,
                    height,
                    path.display()
                ),
            );
            return Ok(AspectRatioResult::fallback(
                FallbackReason::DegenerateGeometry,
            ));
        }

        let ratio = round_ratio(width as f64 / height as f64);
        self.log(
            Level::Info,
            format!(
                "Computed visible dims {}x{} -> aspect_ratio={}",
                width, height, ratio
            ),
        );

        let outcome = match find_band(ratio) {
            Some(band) => {
                self.log(
                    Level::Info,
                    format!("Aspect ratio {} within valid ranges ({})", ratio, band.name),
                );
                DetectionOutcome::Classified {
                    band: band.name,
                    width,
                    height,
                }
            }
            None => {
                self.log(
                    Level::Warn,
                    format!(
                        "Aspect ratio {} not in valid ranges, returning default {}",
                        ratio, DEFAULT_RATIO
                    ),
                );
                DetectionOutcome::Unclassified {
                    measured: ratio,
                    width,
                    height,
                }
            }
        };

        Ok(AspectRatioResult::from_outcome(ratio, outcome))
    }
}

impl<O: SourceOpener> AspectRatioEstimator for AspectRatioDetector<O> {
    fn default_options(&self) -> DetectionOptions {
        self.options
    }

    fn estimate(&self, path: &Path, options: &DetectionOptions) -> AspectRatioResult {
        self.calculate_with(path, options)
    }
}

/// Adds the frame's content to the box. Returns false for an all-black frame.
fn accumulate(
    frame: &LumaFrame,
    threshold: u8,
    bbox: &mut Option<VisibleBoundingBox>,
) -> bool {
    // Frame size is taken from the first decoded frame, not the container.
    let bbox =
        bbox.get_or_insert_with(|| VisibleBoundingBox::empty(frame.width(), frame.height()));

    match content_extent(frame, threshold) {
        Some(rect) => {
            bbox.include(rect);
            true
        }
        None => false,
    }
}
