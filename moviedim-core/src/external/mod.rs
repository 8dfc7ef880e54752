// ============================================================================
// moviedim-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// The detector never links against a video library. Metadata comes from the
// ffprobe binary (through the `ffprobe` crate) and frames are decoded by the
// ffmpeg binary (through `ffmpeg-sidecar`, see media::ffmpeg_source). This
// module holds the metadata side and the PATH checks the CLI runs at startup.

use std::io;
use std::process::{Command, Stdio};

use crate::error::{CoreError, CoreResult};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Video stream metadata via ffprobe
pub mod ffprobe_executor;

pub use ffprobe_executor::{VideoProbe, probe_video};

/// External binaries the ffmpeg-backed source needs.
pub const REQUIRED_TOOLS: [&str; 2] = ["ffmpeg", "ffprobe"];

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that `cmd_name` can be started by running it with `-version`.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!(
                "Failed to start dependency check command '{}': {}",
                cmd_name,
                e
            );
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}

/// Names of the [`REQUIRED_TOOLS`] that cannot be started.
pub fn missing_tools() -> Vec<&'static str> {
    REQUIRED_TOOLS
        .iter()
        .copied()
        .filter(|tool| check_dependency(tool).is_err())
        .collect()
}
