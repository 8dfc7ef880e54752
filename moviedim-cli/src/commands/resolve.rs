// moviedim-cli/src/commands/resolve.rs
//
// Looks up a Plex rating key and prints where the file lives locally.

use anyhow::anyhow;
use moviedim_core::{CatalogCredentials, CatalogLookup, CoreConfig, PathResolver, PlexClient};

use crate::cli::ResolveArgs;

pub fn run_resolve(config: &CoreConfig, args: &ResolveArgs) -> anyhow::Result<()> {
    let credentials = CatalogCredentials::from_config(config);
    if !credentials.is_complete() {
        return Err(anyhow!(
            "Plex base URL and token are required (--plex-base-url/PLEX_BASE_URL, --plex-token/PLEX_TOKEN)"
        ));
    }

    let client = PlexClient::new(config.plex_timeout)?;
    let runtime = super::runtime()?;
    let catalog_path = runtime
        .block_on(client.file_path(&args.rating_key, &credentials))
        .ok_or_else(|| anyhow!("could not determine file path from plex"))?;

    let local_path = PathResolver::new(&config.video_root).map_catalog_path(&catalog_path);
    println!("Plex path:  {}", catalog_path);
    println!("Local path: {}", local_path.display());
    if !local_path.exists() {
        log::warn!("{} does not exist locally", local_path.display());
    }
    Ok(())
}
