// ============================================================================
// moviedim-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Core Library
//
// This module defines the error type shared by every fallible operation in
// moviedim-core. Most errors never reach library consumers: the detector turns
// them into the default aspect ratio, and the catalog client turns them into
// "no path". They still travel as typed errors internally so every failure can
// be logged with its cause.
//
// KEY COMPONENTS:
// - CoreError: thiserror enum covering I/O, external tools, decoding, config
// - CoreResult: Result alias used throughout the crate
// - Helper constructors for external command failures

use std::process::ExitStatus;

use thiserror::Error;

/// Errors produced inside moviedim-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("'{command}' exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Required dependency '{0}' was not found on PATH")]
    DependencyNotFound(String),

    #[error("Failed to parse ffprobe output: {0}")]
    FfprobeParse(String),

    #[error("Video information error: {0}")]
    VideoInfo(String),

    #[error("Frame decoding error: {0}")]
    Decode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Catalog lookup failed: {0}")]
    Catalog(String),
}

/// Result type for moviedim-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a [`CoreError::CommandStart`] for a process that could not be spawned.
pub fn command_start_error(command: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(command.into(), err)
}

/// Builds a [`CoreError::CommandFailed`] for a process that ran but failed.
pub fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        command: command.into(),
        status,
        stderr: stderr.into(),
    }
}
