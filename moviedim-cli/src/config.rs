// moviedim-cli/src/config.rs
//
// Turns the global command-line arguments into a validated core configuration.

use std::time::Duration;

use moviedim_core::{CoreConfig, CoreConfigBuilder, CoreResult};

use crate::cli::GlobalArgs;

/// Builds and validates the [`CoreConfig`] described by `args`.
pub fn core_config(args: &GlobalArgs) -> CoreResult<CoreConfig> {
    let mut builder = CoreConfigBuilder::new()
        .video_root(args.video_root.clone())
        .sample_frames(args.sample_frames)
        .black_threshold(args.black_threshold)
        .plex_timeout(Duration::from_secs(args.plex_timeout));

    if let Some(url) = &args.plex_base_url {
        builder = builder.plex_base_url(url);
    }
    if let Some(token) = &args.plex_token {
        builder = builder.plex_token(token);
    }

    let config = builder.build();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn flags_reach_core_config() {
        let cli = parse(&[
            "moviedim",
            "--video-root",
            "/mnt/media",
            "--plex-base-url",
            "http://plex:32400",
            "--plex-token",
            "abc",
            "--plex-timeout",
            "3",
            "--sample-frames",
            "12",
            "--black-threshold",
            "24",
            "resolve",
            "42",
        ]);

        let config = core_config(&cli.global).unwrap();
        assert_eq!(config.video_root, PathBuf::from("/mnt/media"));
        assert_eq!(config.plex_base_url.as_deref(), Some("http://plex:32400"));
        assert_eq!(config.plex_token.as_deref(), Some("abc"));
        assert_eq!(config.plex_timeout, Duration::from_secs(3));
        assert_eq!(config.sample_frames, 12);
        assert_eq!(config.black_threshold, 24);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cli = parse(&["moviedim", "--plex-base-url", "plex:32400", "detect", "a.mkv"]);
        assert!(core_config(&cli.global).is_err());
    }
}
