// ============================================================================
// moviedim-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// This module implements the builder pattern for the CoreConfig structure,
// providing a fluent API for creating CoreConfig instances. Every field has a
// default, so a bare `CoreConfigBuilder::new().build()` is a working config.

// ---- Standard library imports ----
use std::path::PathBuf;
use std::time::Duration;

// ---- Internal crate imports ----
use super::CoreConfig;

/// Builder for creating CoreConfig instances.
#[derive(Debug, Clone)]
pub struct CoreConfigBuilder {
    video_root: PathBuf,
    sample_frames: usize,
    black_threshold: u8,
    plex_base_url: Option<String>,
    plex_token: Option<String>,
    plex_timeout: Duration,
}

impl Default for CoreConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreConfigBuilder {
    /// Creates a new CoreConfigBuilder with default values.
    pub fn new() -> Self {
        Self {
            video_root: PathBuf::from(super::DEFAULT_VIDEO_ROOT),
            sample_frames: super::DEFAULT_SAMPLE_FRAMES,
            black_threshold: super::DEFAULT_BLACK_THRESHOLD,
            plex_base_url: None,
            plex_token: None,
            plex_timeout: Duration::from_secs(super::DEFAULT_PLEX_TIMEOUT_SECS),
        }
    }

    /// Sets the local mount root for video files.
    pub fn video_root(mut self, video_root: PathBuf) -> Self {
        self.video_root = video_root;
        self
    }

    /// Sets the number of frames to sample.
    pub fn sample_frames(mut self, sample_frames: usize) -> Self {
        self.sample_frames = sample_frames;
        self
    }

    /// Sets the black luminance threshold.
    pub fn black_threshold(mut self, black_threshold: u8) -> Self {
        self.black_threshold = black_threshold;
        self
    }

    /// Sets the Plex base URL. Empty strings are treated as unset.
    pub fn plex_base_url(mut self, url: &str) -> Self {
        self.plex_base_url = non_empty(url);
        self
    }

    /// Sets the Plex token. Empty strings are treated as unset.
    pub fn plex_token(mut self, token: &str) -> Self {
        self.plex_token = non_empty(token);
        self
    }

    /// Sets the Plex request timeout.
    pub fn plex_timeout(mut self, timeout: Duration) -> Self {
        self.plex_timeout = timeout;
        self
    }

    /// Builds the CoreConfig.
    pub fn build(self) -> CoreConfig {
        CoreConfig {
            video_root: self.video_root,
            sample_frames: self.sample_frames,
            black_threshold: self.black_threshold,
            plex_base_url: self.plex_base_url,
            plex_token: self.plex_token,
            plex_timeout: self.plex_timeout,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
