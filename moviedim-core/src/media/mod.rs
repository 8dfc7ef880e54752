// ============================================================================
// moviedim-core/src/media/mod.rs
// ============================================================================
//
// MEDIA: Video Source Abstraction
//
// This module defines how the detector reads frames. A `SourceOpener` opens a
// `VideoSource` for one analysis; the source reports its (untrusted) frame
// count and hands out luminance frames either by index or sequentially from
// the start.
//
// KEY COMPONENTS:
// - VideoSource / SourceOpener: traits the detector is generic over
// - LumaFrame: decoded single-channel frame
// - FfmpegSourceOpener / FfmpegVideoSource: implementation backed by
//   ffprobe (metadata) and ffmpeg-sidecar (decoding)
//
// A source owns every decoder process it starts and releases it when dropped,
// so callers get scoped acquisition simply by letting the source go out of
// scope, whichever way they leave.

use std::path::Path;

use crate::error::CoreResult;

pub mod ffmpeg_source;
pub mod frame;

pub use ffmpeg_source::{FfmpegSourceOpener, FfmpegVideoSource};
pub use frame::{LumaFrame, rgb_to_luma};

/// An opened, decodable video resource.
pub trait VideoSource {
    /// Total frame count as reported by the container. `None` or `Some(0)`
    /// means the count is unknown and frames must be read sequentially.
    fn frame_count(&self) -> Option<u64>;

    /// Seeks to `index` and decodes one frame. `Ok(None)` is an empty read.
    fn read_frame_at(&mut self, index: u64) -> CoreResult<Option<LumaFrame>>;

    /// Decodes the next frame from the start of the video. `Ok(None)` marks
    /// the end of the stream.
    fn read_next_frame(&mut self) -> CoreResult<Option<LumaFrame>>;
}

/// Opens video sources for analysis.
pub trait SourceOpener: Send + Sync {
    type Source: VideoSource;

    /// Opens `path` for a sampling session of at most `sample_frames` frames.
    fn open(&self, path: &Path, sample_frames: usize) -> CoreResult<Self::Source>;
}
