//! Video source backed by ffprobe and ffmpeg-sidecar.
//!
//! Metadata comes from a single ffprobe call at open time. Indexed reads spawn
//! one short ffmpeg process per frame (`-ss <t> -i <file> -frames:v 1`) and
//! read the frame back as raw `rgb24`. Sequential reads share one ffmpeg
//! process that decodes from the start and is killed when the source drops.

use std::path::{Path, PathBuf};

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::OutputVideoFrame;

use super::{LumaFrame, SourceOpener, VideoSource};
use crate::error::{CoreError, CoreResult, command_start_error};
use crate::external::ffprobe_executor::{VideoProbe, probe_video};

/// Opens [`FfmpegVideoSource`]s. Requires `ffmpeg` and `ffprobe` on PATH.
#[derive(Debug, Clone, Default)]
pub struct FfmpegSourceOpener;

impl FfmpegSourceOpener {
    pub fn new() -> Self {
        Self
    }
}

impl SourceOpener for FfmpegSourceOpener {
    type Source = FfmpegVideoSource;

    fn open(&self, path: &Path, sample_frames: usize) -> CoreResult<Self::Source> {
        let probe = probe_video(path)?;
        log::debug!(
            "Opened {} (frames: {:?}, fps: {:?}, {}x{})",
            path.display(),
            probe.frame_count,
            probe.frame_rate,
            probe.width.unwrap_or(0),
            probe.height.unwrap_or(0)
        );
        Ok(FfmpegVideoSource {
            path: path.to_path_buf(),
            probe,
            sequential_limit: sample_frames.max(1),
            sequential: None,
        })
    }
}

/// Decoding session for a single video file.
pub struct FfmpegVideoSource {
    path: PathBuf,
    probe: VideoProbe,
    sequential_limit: usize,
    sequential: Option<SequentialDecoder>,
}

impl FfmpegVideoSource {
    fn input_arg(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

impl VideoSource for FfmpegVideoSource {
    fn frame_count(&self) -> Option<u64> {
        // Seeking by index is only possible with a usable frame rate.
        self.probe.frame_rate.and(self.probe.frame_count)
    }

    fn read_frame_at(&mut self, index: u64) -> CoreResult<Option<LumaFrame>> {
        let fps = self.probe.frame_rate.ok_or_else(|| {
            CoreError::VideoInfo(format!(
                "No frame rate for {}; cannot seek by frame index",
                self.path.display()
            ))
        })?;
        let position = index as f64 / fps;

        let mut cmd = FfmpegCommand::new();
        cmd.hide_banner();
        cmd.arg("-ss");
        cmd.arg(format!("{position:.6}"));
        cmd.input(self.input_arg());
        cmd.args(["-an", "-sn", "-dn"]);
        cmd.frames(1);
        cmd.rawvideo();

        log::trace!(
            "Decoding frame {} at {:.3}s from {}",
            index,
            position,
            self.path.display()
        );

        let mut child = cmd
            .spawn()
            .map_err(|e| command_start_error("ffmpeg", e))?;

        let mut frames = None;
        let result = next_frame(&mut child, &mut frames);
        drop(frames);
        release(&mut child);
        result
    }

    fn read_next_frame(&mut self) -> CoreResult<Option<LumaFrame>> {
        if self.sequential.is_none() {
            self.sequential = Some(SequentialDecoder::spawn(
                &self.input_arg(),
                self.sequential_limit,
            )?);
        }

        match self.sequential.as_mut() {
            Some(decoder) => next_frame(&mut decoder.child, &mut decoder.frames),
            None => Ok(None),
        }
    }
}

type FrameIter = Box<dyn Iterator<Item = OutputVideoFrame>>;

/// A running ffmpeg process decoding from the start of the file.
struct SequentialDecoder {
    child: FfmpegChild,
    frames: Option<FrameIter>,
}

impl SequentialDecoder {
    fn spawn(input: &str, limit: usize) -> CoreResult<Self> {
        let mut cmd = FfmpegCommand::new();
        cmd.hide_banner();
        cmd.input(input);
        cmd.args(["-an", "-sn", "-dn"]);
        cmd.frames(u32::try_from(limit).unwrap_or(u32::MAX));
        cmd.rawvideo();

        log::trace!("Starting sequential decode of {} ({} frames)", input, limit);

        let child = cmd
            .spawn()
            .map_err(|e| command_start_error("ffmpeg", e))?;
        Ok(Self {
            child,
            frames: None,
        })
    }
}

impl Drop for SequentialDecoder {
    fn drop(&mut self) {
        self.frames = None;
        release(&mut self.child);
    }
}

/// Stops an ffmpeg process (if still running) and reaps it.
fn release(child: &mut FfmpegChild) {
    // Fails harmlessly when the process already exited.
    if let Err(e) = child.kill() {
        log::trace!("ffmpeg kill on release: {}", e);
    }
    if let Err(e) = child.wait() {
        log::trace!("ffmpeg wait on release: {}", e);
    }
}

/// Pulls the next raw frame from `child`, creating the frame iterator on first
/// use and keeping it in `frames` for later calls.
fn next_frame(
    child: &mut FfmpegChild,
    frames: &mut Option<FrameIter>,
) -> CoreResult<Option<LumaFrame>> {
    if frames.is_none() {
        let events = child.iter().map_err(|e| {
            CoreError::Decode(format!("ffmpeg event stream unavailable: {e}"))
        })?;
        *frames = Some(Box::new(events.filter_frames()));
    }

    let Some(frame) = frames.as_mut().and_then(|it| it.next()) else {
        return Ok(None);
    };

    if frame.pix_fmt != "rgb24" {
        return Err(CoreError::Decode(format!(
            "Unexpected pixel format '{}' from ffmpeg",
            frame.pix_fmt
        )));
    }

    LumaFrame::from_rgb24(frame.width, frame.height, &frame.data).map(Some)
}
