// moviedim-cli/src/commands/serve.rs
//
// Starts the HTTP service.

use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use moviedim_core::CoreConfig;
use moviedim_core::external::missing_tools;

use crate::cli::ServeArgs;
use crate::server::{AppState, run_server};

pub fn run_serve(config: &CoreConfig, args: &ServeArgs) -> anyhow::Result<()> {
    let host: IpAddr = args
        .host
        .parse()
        .with_context(|| format!("Invalid --host '{}'", args.host))?;
    let addr = SocketAddr::new(host, args.port);

    let missing = missing_tools();
    if missing.is_empty() {
        log::info!("External dependency check passed.");
    } else {
        log::warn!(
            "Missing external tools: {}. Every detection will return the default ratio.",
            missing.join(", ")
        );
    }

    log::info!(
        "Video root: {}, {} samples, black threshold {}",
        config.video_root.display(),
        config.sample_frames,
        config.black_threshold
    );
    if config.plex_base_url.is_none() || config.plex_token.is_none() {
        log::info!("Plex not configured; rating_key requests must carry plex_base_url and plex_token");
    }

    let state = AppState::from_config(config)?;
    super::runtime()?.block_on(run_server(addr, state))
}
