//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// `detect`: one-shot analysis of a local file.
pub mod detect;

/// `resolve`: Plex lookup plus path mapping.
pub mod resolve;

/// `serve`: the HTTP service.
pub mod serve;

/// Runtime for the async commands.
pub(crate) fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}
