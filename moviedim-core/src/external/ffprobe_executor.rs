//! FFprobe integration for video metadata.
//!
//! The detector only needs two facts from the container: how many frames the
//! video claims to have and at what rate, so a frame index can be turned into
//! a seek position. Both are untrusted; callers treat a missing or zero count
//! as "read sequentially".
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;

/// Metadata of the first video stream of a file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VideoProbe {
    /// Width reported by the container (informational only)
    pub width: Option<u32>,
    /// Height reported by the container (informational only)
    pub height: Option<u32>,
    /// Frames per second, from `r_frame_rate` or `avg_frame_rate`
    pub frame_rate: Option<f64>,
    /// Total frames, from `nb_frames` or estimated as duration x frame rate
    pub frame_count: Option<u64>,
    /// Duration in seconds (stream duration, else container duration)
    pub duration_secs: Option<f64>,
}

/// Probes `input_path` and describes its first video stream.
pub fn probe_video(input_path: &Path) -> CoreResult<VideoProbe> {
    log::debug!(
        "Running ffprobe (via crate) for video metadata on: {}",
        input_path.display()
    );
    match ffprobe(input_path) {
        Ok(metadata) => {
            let video_stream = metadata
                .streams
                .iter()
                .find(|s| s.codec_type.as_deref() == Some("video"))
                .ok_or_else(|| {
                    CoreError::VideoInfo(format!(
                        "No video stream found in {}",
                        input_path.display()
                    ))
                })?;

            let frame_rate = parse_frame_rate(&video_stream.r_frame_rate)
                .or_else(|| parse_frame_rate(&video_stream.avg_frame_rate));

            let duration_secs = video_stream
                .duration
                .as_deref()
                .and_then(|d| d.parse::<f64>().ok())
                .or_else(|| {
                    metadata
                        .format
                        .duration
                        .as_deref()
                        .and_then(|d| d.parse::<f64>().ok())
                });

            let frame_count = estimate_frame_count(
                video_stream.nb_frames.as_deref(),
                duration_secs,
                frame_rate,
            );

            Ok(VideoProbe {
                width: video_stream.width.and_then(|w| u32::try_from(w).ok()),
                height: video_stream.height.and_then(|h| u32::try_from(h).ok()),
                frame_rate,
                frame_count,
                duration_secs,
            })
        }
        Err(err) => {
            log::error!(
                "ffprobe failed for video metadata on {}: {:?}",
                input_path.display(),
                err
            );
            Err(map_ffprobe_error(err, "video metadata"))
        }
    }
}

/// Parses an ffprobe rational such as `24000/1001` or a plain number.
/// Zero, negative and non-finite rates yield `None`.
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    let value = match rate.split_once('/') {
        Some((num, den)) => {
            let num = num.trim().parse::<f64>().ok()?;
            let den = den.trim().parse::<f64>().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.trim().parse::<f64>().ok()?,
    };

    (value.is_finite() && value > 0.0).then_some(value)
}

/// Frame count from `nb_frames`, falling back to `floor(duration * fps)`.
pub fn estimate_frame_count(
    nb_frames: Option<&str>,
    duration_secs: Option<f64>,
    frame_rate: Option<f64>,
) -> Option<u64> {
    if let Some(count) = nb_frames
        .and_then(|n| n.trim().parse::<u64>().ok())
        .filter(|&n| n > 0)
    {
        return Some(count);
    }

    match (duration_secs, frame_rate) {
        (Some(duration), Some(fps)) if duration.is_finite() && duration > 0.0 => {
            let estimate = (duration * fps).floor();
            (estimate >= 1.0).then_some(estimate as u64)
        }
        _ => None,
    }
}

fn map_ffprobe_error(err: FfProbeError, context: &str) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error(format!("ffprobe ({context})"), io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error(format!("ffprobe ({context})"), output.status, stderr)
        }
        FfProbeError::Deserialize(err) => {
            CoreError::FfprobeParse(format!("{context} output deserialization: {err}"))
        }
        #[allow(unreachable_patterns)]
        _ => CoreError::FfprobeParse(format!(
            "Unknown ffprobe error during {context}: {err:?}"
        )),
    }
}
