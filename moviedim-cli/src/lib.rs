// moviedim-cli/src/lib.rs
//
// Library portion of the moviedim CLI.
// Contains argument definitions, command logic and the HTTP service.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod server;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, DetectArgs, GlobalArgs, ResolveArgs, ServeArgs};
pub use commands::detect::run_detect;
pub use commands::resolve::run_resolve;
pub use commands::serve::run_serve;
pub use server::{AppState, router, run_server};
