//! Configuration structures and constants for the moviedim-core library.
//!
//! This module provides the settings that drive detection (sample count and
//! black threshold), path mapping (the local mount root) and the Plex catalog
//! client (base URL, token and request timeout).

mod builder;

use std::path::PathBuf;
use std::time::Duration;

pub use builder::CoreConfigBuilder;

use crate::error::{CoreError, CoreResult};

// Default constants

/// Default number of frames sampled across a video.
pub const DEFAULT_SAMPLE_FRAMES: usize = 8;

/// Upper bound on frames sampled per analysis. Each indexed sample costs one
/// ffmpeg seek-and-decode process.
pub const MAX_SAMPLE_FRAMES: usize = 1000;

/// Default luminance threshold (0-255). Pixels at or below it count as black.
pub const DEFAULT_BLACK_THRESHOLD: u8 = 16;

/// Default root under which video files are mounted locally.
pub const DEFAULT_VIDEO_ROOT: &str = "/video";

/// Default timeout for Plex metadata requests, in seconds.
pub const DEFAULT_PLEX_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure for the moviedim-core library.
///
/// Typically created by the consumer of the library (moviedim-cli) from
/// command-line flags and environment variables, then shared read-only.
///
/// # Examples
///
/// ```rust
/// use moviedim_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .video_root(PathBuf::from("/mnt/media"))
///     .sample_frames(12)
///     .black_threshold(20)
///     .plex_base_url("http://plex.local:32400")
///     .plex_token("secret")
///     .build();
///
/// assert_eq!(config.sample_frames, 12);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Local directory where the media library is mounted
    pub video_root: PathBuf,

    /// Number of frames to sample per analysis (1 to [`MAX_SAMPLE_FRAMES`])
    pub sample_frames: usize,

    /// Luminance threshold separating black pixels from content
    pub black_threshold: u8,

    /// Plex server base URL, e.g. `http://plex:32400`
    pub plex_base_url: Option<String>,

    /// Plex authentication token
    pub plex_token: Option<String>,

    /// Timeout applied to every Plex request
    pub plex_timeout: Duration,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            video_root: PathBuf::from(DEFAULT_VIDEO_ROOT),
            sample_frames: DEFAULT_SAMPLE_FRAMES,
            black_threshold: DEFAULT_BLACK_THRESHOLD,
            plex_base_url: None,
            plex_token: None,
            plex_timeout: Duration::from_secs(DEFAULT_PLEX_TIMEOUT_SECS),
        }
    }
}

impl CoreConfig {
    /// Checks that the configuration is usable.
    pub fn validate(&self) -> CoreResult<()> {
        if self.sample_frames == 0 {
            return Err(CoreError::Config(
                "sample_frames must be at least 1".to_string(),
            ));
        }
        if self.sample_frames > MAX_SAMPLE_FRAMES {
            return Err(CoreError::Config(format!(
                "sample_frames must be at most {}, got {}",
                MAX_SAMPLE_FRAMES, self.sample_frames
            )));
        }
        if self.video_root.as_os_str().is_empty() {
            return Err(CoreError::Config("video_root must not be empty".to_string()));
        }
        if self.plex_timeout.is_zero() {
            return Err(CoreError::Config(
                "plex_timeout must be greater than zero".to_string(),
            ));
        }
        if let Some(url) = &self.plex_base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CoreError::Config(format!(
                    "Invalid Plex base URL '{}': must start with http:// or https://",
                    url
                )));
            }
        }
        Ok(())
    }
}
