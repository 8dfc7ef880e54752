// ============================================================================
// moviedim-core/src/processing/mod.rs
// ============================================================================
//
// PROCESSING: Visible Aspect Ratio Estimation
//
// KEY COMPONENTS:
// - sampling: which frames to read
// - threshold: content extent of a single luminance frame
// - bounding_box: union of content extents across frames
// - classifier: rounding and cinematic ratio bands
// - detector: the end-to-end estimator

use serde::Serialize;

pub mod bounding_box;
pub mod classifier;
pub mod detector;
pub mod sampling;
pub mod threshold;

pub use bounding_box::VisibleBoundingBox;
pub use classifier::{DEFAULT_RATIO, RATIO_BANDS, RatioBand, classify, find_band, round_ratio};
pub use detector::{AspectRatioDetector, AspectRatioEstimator, DetectionOptions};
pub use sampling::{SamplePlan, clamp_sample_frames, plan_samples};
pub use threshold::{PixelRect, content_extent};

/// Why the detector fell back to [`DEFAULT_RATIO`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The path is empty or does not exist.
    FileNotFound,
    /// The file could not be opened or probed as a video.
    SourceUnavailable,
    /// No sampled frame had a pixel above the black threshold.
    NoVisibleContent,
    /// The accumulated box had a non-positive width or height.
    DegenerateGeometry,
}

/// How the reported ratio was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectionOutcome {
    /// The measured ratio falls in a known band and is reported as is.
    Classified {
        band: &'static str,
        width: i64,
        height: i64,
    },
    /// The measured ratio fits no band; the default is reported instead.
    Unclassified { measured: f64, width: i64, height: i64 },
    /// Nothing could be measured.
    Fallback { reason: FallbackReason },
}

/// Result of one estimation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectRatioResult {
    /// Rounded ratio, or [`DEFAULT_RATIO`].
    pub aspect_ratio: f64,
    /// `aspect_ratio != DEFAULT_RATIO`. A measured 1.76 is therefore invalid
    /// too.
    pub valid: bool,
    pub outcome: DetectionOutcome,
}

impl AspectRatioResult {
    pub fn fallback(reason: FallbackReason) -> Self {
        Self::with_ratio(DEFAULT_RATIO, DetectionOutcome::Fallback { reason })
    }

    /// Result for a measured (rounded) ratio and its classification.
    pub fn from_outcome(measured: f64, outcome: DetectionOutcome) -> Self {
        let aspect_ratio = match &outcome {
            DetectionOutcome::Classified { .. } => measured,
            _ => DEFAULT_RATIO,
        };
        Self::with_ratio(aspect_ratio, outcome)
    }

    fn with_ratio(aspect_ratio: f64, outcome: DetectionOutcome) -> Self {
        Self {
            aspect_ratio,
            valid: aspect_ratio != DEFAULT_RATIO,
            outcome,
        }
    }
}
