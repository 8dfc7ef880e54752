// ============================================================================
// moviedim-core/src/catalog/mod.rs
// ============================================================================
//
// CATALOG: Media Server Lookups
//
// Resolves an opaque catalog identifier (a Plex `ratingKey`) to the file path
// the media server has on record. Lookups either produce a path or nothing;
// the cause of a failed lookup is logged, never returned.
//
// KEY COMPONENTS:
// - CatalogCredentials: base URL and token, with per-request overrides
// - CatalogLookup: async trait so callers can swap in a fake catalog
// - PlexClient: reqwest-based implementation

use async_trait::async_trait;

use crate::config::CoreConfig;

pub mod plex;

pub use plex::{PlexClient, extract_file_path};

/// Where and how to reach the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogCredentials {
    pub base_url: Option<String>,
    pub token: Option<String>,
}

impl CatalogCredentials {
    pub fn new(base_url: Option<String>, token: Option<String>) -> Self {
        Self {
            base_url: non_blank(base_url),
            token: non_blank(token),
        }
    }

    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(config.plex_base_url.clone(), config.plex_token.clone())
    }

    /// Replaces each field with its override when the override is non-blank.
    pub fn with_overrides(&self, base_url: Option<&str>, token: Option<&str>) -> Self {
        Self {
            base_url: non_blank(base_url.map(str::to_string)).or_else(|| self.base_url.clone()),
            token: non_blank(token.map(str::to_string)).or_else(|| self.token.clone()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.base_url.is_some() && self.token.is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Looks up the on-disk path of a catalog item.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// The path the catalog reports for `rating_key`, or `None` on any
    /// failure (missing credentials, network, status, payload).
    async fn file_path(
        &self,
        rating_key: &str,
        credentials: &CatalogCredentials,
    ) -> Option<String>;
}
