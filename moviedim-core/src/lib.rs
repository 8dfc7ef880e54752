//! Core library for measuring the visible aspect ratio of video files.
//!
//! The detector samples a few frames, finds the region brighter than a black
//! threshold in each (everything else is letterbox or pillarbox), and
//! classifies the width/height ratio of that region against the common
//! cinematic ratios. The crate also maps Plex catalog paths onto a local mount
//! and looks those paths up through the Plex API.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use moviedim_core::{AspectRatioDetector, CoreConfig, PathResolver};
//!
//! let config = CoreConfig::default();
//! config.validate().unwrap();
//!
//! let resolver = PathResolver::new(&config.video_root);
//! let path = resolver.map_catalog_path(r"Y:\Movies\Heat (1995)\Heat.mkv");
//!
//! let detector = AspectRatioDetector::from_config(&config);
//! let result = detector.calculate(&path);
//! println!("{} (valid: {})", result.aspect_ratio, result.valid);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod external;
pub mod logging;
pub mod media;
pub mod paths;
pub mod processing;

// Re-exports for public API
pub use catalog::{CatalogCredentials, CatalogLookup, PlexClient};
pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use logging::{FacadeSink, LogSink, MemorySink};
pub use media::{FfmpegSourceOpener, LumaFrame, SourceOpener, VideoSource};
pub use paths::PathResolver;
pub use processing::{
    AspectRatioDetector, AspectRatioEstimator, AspectRatioResult, DEFAULT_RATIO,
    DetectionOptions, DetectionOutcome, FallbackReason,
};
