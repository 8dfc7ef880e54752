//! Plex metadata client.
//!
//! Issues `GET {base}/library/metadata/{ratingKey}?includeParts=1` with the
//! `X-Plex-Token` header and reads
//! `MediaContainer.Metadata[0].Media[0].Part[0].file` from the JSON reply.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{CatalogCredentials, CatalogLookup};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Deserialize)]
pub struct PlexMetadataResponse {
    #[serde(rename = "MediaContainer", default)]
    pub media_container: Option<MediaContainer>,
}

#[derive(Debug, Deserialize)]
pub struct MediaContainer {
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<Metadata>,
}

#[derive(Debug, Deserialize)]
pub struct Metadata {
    #[serde(rename = "Media", default)]
    pub media: Vec<Media>,
}

#[derive(Debug, Deserialize)]
pub struct Media {
    #[serde(rename = "Part", default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub file: Option<String>,
}

/// First part's file path, if present and non-empty.
pub fn extract_file_path(response: &PlexMetadataResponse) -> Option<&str> {
    response
        .media_container
        .as_ref()?
        .metadata
        .first()?
        .media
        .first()?
        .parts
        .first()?
        .file
        .as_deref()
        .filter(|file| !file.is_empty())
}

/// Plex catalog client with a request timeout.
#[derive(Debug, Clone)]
pub struct PlexClient {
    http: reqwest::Client,
}

impl PlexClient {
    pub fn new(timeout: Duration) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Catalog(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// Metadata URL for `rating_key` under `base_url`.
    pub fn metadata_url(base_url: &str, rating_key: &str) -> String {
        format!(
            "{}/library/metadata/{}?includeParts=1",
            base_url.trim_end_matches('/'),
            rating_key
        )
    }

    /// Fetches the file path, reporting why it could not be found.
    pub async fn fetch_file_path(
        &self,
        rating_key: &str,
        credentials: &CatalogCredentials,
    ) -> CoreResult<String> {
        let (Some(base_url), Some(token)) = (&credentials.base_url, &credentials.token) else {
            return Err(CoreError::Catalog(
                "Plex base URL or token not configured".to_string(),
            ));
        };

        let rating_key = rating_key.trim();
        if rating_key.is_empty() || rating_key.contains(['/', '?', '#']) {
            return Err(CoreError::Catalog(format!(
                "Invalid ratingKey '{rating_key}'"
            )));
        }

        let url = Self::metadata_url(base_url, rating_key);
        log::debug!("Querying Plex metadata: {}", url);

        let response = self
            .http
            .get(&url)
            .header("X-Plex-Token", token)
            .header("Accept", "application/json")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CoreError::Catalog(format!("Error querying Plex API: {e}")))?;

        let body: PlexMetadataResponse = response
            .json()
            .await
            .map_err(|e| CoreError::Catalog(format!("Invalid Plex response: {e}")))?;

        extract_file_path(&body)
            .map(str::to_string)
            .ok_or_else(|| {
                CoreError::Catalog(format!(
                    "No file path in Plex response for ratingKey={rating_key}"
                ))
            })
    }
}

#[async_trait]
impl CatalogLookup for PlexClient {
    async fn file_path(
        &self,
        rating_key: &str,
        credentials: &CatalogCredentials,
    ) -> Option<String> {
        match self.fetch_file_path(rating_key, credentials).await {
            Ok(path) => {
                log::info!("Retrieved file path from Plex: {}", path);
                Some(path)
            }
            Err(e) => {
                log::error!("{}", e);
                None
            }
        }
    }
}
