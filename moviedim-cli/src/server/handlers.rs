//! Request handlers.

use std::path::PathBuf;

use axum::{Json, extract::State};
use moviedim_core::config::MAX_SAMPLE_FRAMES;
use moviedim_core::{AspectRatioResult, DetectionOptions};
use serde::{Deserialize, Serialize};

use super::AppState;
use super::error::{ApiError, ApiJson};

pub const MISSING_INPUT: &str = "file_path or rating_key required";
pub const UNRESOLVED_RATING_KEY: &str = "could not determine file path from plex";

/// Plex rating keys arrive as strings or as bare numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RatingKey {
    Text(String),
    Number(u64),
}

impl RatingKey {
    fn into_string(self) -> String {
        match self {
            RatingKey::Text(text) => text,
            RatingKey::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub rating_key: Option<RatingKey>,
    #[serde(default)]
    pub plex_base_url: Option<String>,
    #[serde(default)]
    pub plex_token: Option<String>,
    #[serde(default)]
    pub sample_frames: Option<usize>,
    #[serde(default)]
    pub black_threshold: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub aspect_ratio: f64,
    pub valid: bool,
}

#[derive(Debug, Deserialize)]
pub struct LegacyRequest {
    #[serde(default)]
    pub file_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LegacyResponse {
    pub aspect_ratio: f64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// `POST /calculate`
pub async fn calculate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CalculateRequest>,
) -> Result<Json<CalculateResponse>, ApiError> {
    if let Some(requested) = request.sample_frames.filter(|&n| n > MAX_SAMPLE_FRAMES) {
        return Err(ApiError::BadRequest(format!(
            "sample_frames must be at most {MAX_SAMPLE_FRAMES}, got {requested}"
        )));
    }

    let file_path = non_empty(request.file_path);
    let rating_key = request
        .rating_key
        .map(RatingKey::into_string)
        .and_then(|key| non_empty(Some(key)));

    let path = match (file_path, rating_key) {
        (Some(file_path), _) => state.resolver.resolve_request_path(&file_path),
        (None, Some(rating_key)) => {
            let credentials = state.credentials.with_overrides(
                request.plex_base_url.as_deref(),
                request.plex_token.as_deref(),
            );
            let catalog_path = state
                .catalog
                .file_path(&rating_key, &credentials)
                .await
                .ok_or_else(|| ApiError::Internal(UNRESOLVED_RATING_KEY.to_string()))?;
            let mapped = state.resolver.map_catalog_path(&catalog_path);
            log::info!(
                "ratingKey {} -> {} -> {}",
                rating_key,
                catalog_path,
                mapped.display()
            );
            mapped
        }
        (None, None) => return Err(ApiError::BadRequest(MISSING_INPUT.to_string())),
    };

    let defaults = state.estimator.default_options();
    let options = DetectionOptions {
        sample_frames: request.sample_frames.unwrap_or(defaults.sample_frames),
        black_threshold: request.black_threshold.unwrap_or(defaults.black_threshold),
    };

    let result = estimate(&state, path, options).await?;
    Ok(Json(CalculateResponse {
        aspect_ratio: result.aspect_ratio,
        valid: result.valid,
    }))
}

/// `POST /aspect-ratio`, the legacy single-field endpoint.
pub async fn legacy_aspect_ratio(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LegacyRequest>,
) -> Result<Json<LegacyResponse>, ApiError> {
    let file_path = match request.file_path {
        None => {
            return Err(ApiError::BadRequest(
                "Invalid or missing 'file_path' in JSON payload.".to_string(),
            ));
        }
        Some(path) if path.trim().is_empty() => {
            return Err(ApiError::BadRequest("No file path given.".to_string()));
        }
        Some(path) => path,
    };

    let path = state.resolver.resolve_request_path(&file_path);
    let options = state.estimator.default_options();
    let result = estimate(&state, path, options).await?;
    Ok(Json(LegacyResponse {
        aspect_ratio: result.aspect_ratio,
    }))
}

/// Runs the blocking detector off the async runtime.
async fn estimate(
    state: &AppState,
    path: PathBuf,
    options: DetectionOptions,
) -> Result<AspectRatioResult, ApiError> {
    let estimator = state.estimator.clone();
    tokio::task::spawn_blocking(move || estimator.estimate(&path, &options))
        .await
        .map_err(|e| ApiError::Internal(format!("Detection task failed: {e}")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
