//! Frame sampling plans.

use crate::config::MAX_SAMPLE_FRAMES;

/// Which frames the detector reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SamplePlan {
    /// Seek to each index in order.
    Indexed(Vec<u64>),
    /// Frame count is unknown: read up to this many frames from the start.
    Sequential(usize),
}

/// Clamps a requested sample count to `1..=MAX_SAMPLE_FRAMES`.
pub fn clamp_sample_frames(sample_frames: usize) -> usize {
    sample_frames.clamp(1, MAX_SAMPLE_FRAMES)
}

/// Builds the sampling plan for a video with `total_frames` frames.
///
/// When every frame fits in the sample count all of them are read. Otherwise
/// the indices are spread with a fixed integer step starting at frame 0, so
/// the last part of a video may not be sampled. `sample_frames` is clamped to
/// `1..=MAX_SAMPLE_FRAMES`.
pub fn plan_samples(total_frames: Option<u64>, sample_frames: usize) -> SamplePlan {
    let sample_frames = clamp_sample_frames(sample_frames);

    let total = match total_frames {
        Some(total) if total > 0 => total,
        _ => return SamplePlan::Sequential(sample_frames),
    };

    let wanted = sample_frames as u64;
    if total <= wanted {
        return SamplePlan::Indexed((0..total).collect());
    }

    let step = (total / wanted).max(1);
    SamplePlan::Indexed(
        (0..wanted)
            .map(|i| i.saturating_mul(step).min(total - 1))
            .collect(),
    )
}
