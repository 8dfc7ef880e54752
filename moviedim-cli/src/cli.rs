// moviedim-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use moviedim_core::config::{
    DEFAULT_BLACK_THRESHOLD, DEFAULT_PLEX_TIMEOUT_SECS, DEFAULT_SAMPLE_FRAMES, DEFAULT_VIDEO_ROOT,
    MAX_SAMPLE_FRAMES,
};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "moviedim: visible aspect ratio detection",
    long_about = "Measures the visible aspect ratio of video files by detecting \
                  letterbox and pillarbox bars, and serves the result over HTTP."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by every subcommand. Each can also come from the
/// environment, which is how the container deployment configures them.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Local directory where the media library is mounted
    #[arg(
        long,
        global = true,
        env = "VIDEO_ROOT",
        value_name = "DIR",
        default_value = DEFAULT_VIDEO_ROOT
    )]
    pub video_root: PathBuf,

    /// Plex server base URL (e.g. http://plex:32400)
    #[arg(long, global = true, env = "PLEX_BASE_URL", value_name = "URL")]
    pub plex_base_url: Option<String>,

    /// Plex authentication token
    #[arg(
        long,
        global = true,
        env = "PLEX_TOKEN",
        value_name = "TOKEN",
        hide_env_values = true
    )]
    pub plex_token: Option<String>,

    /// Timeout for Plex requests, in seconds
    #[arg(
        long,
        global = true,
        env = "MOVIEDIM_PLEX_TIMEOUT",
        value_name = "SECONDS",
        default_value_t = DEFAULT_PLEX_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub plex_timeout: u64,

    /// Number of frames sampled per video (1-1000)
    #[arg(
        long,
        global = true,
        env = "MOVIEDIM_SAMPLE_FRAMES",
        value_name = "N",
        default_value_t = DEFAULT_SAMPLE_FRAMES,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new()
            .range(1..=MAX_SAMPLE_FRAMES as u64)
    )]
    pub sample_frames: usize,

    /// Luminance (0-255) at or below which a pixel counts as black
    #[arg(
        long,
        global = true,
        env = "MOVIEDIM_BLACK_THRESHOLD",
        value_name = "T",
        default_value_t = DEFAULT_BLACK_THRESHOLD
    )]
    pub black_threshold: u8,

    /// Enable debug logging (RUST_LOG takes precedence when set)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Runs the HTTP service
    Serve(ServeArgs),
    /// Measures the visible aspect ratio of one file
    Detect(DetectArgs),
    /// Looks up a Plex rating key and maps its file onto the video root
    Resolve(ResolveArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, value_name = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, short, value_name = "PORT", default_value_t = 8080)]
    pub port: u16,
}

#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Video file to analyse
    #[arg(required = true, value_name = "PATH")]
    pub path: PathBuf,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Plex ratingKey of the item
    #[arg(required = true, value_name = "RATING_KEY")]
    pub rating_key: String,
}
