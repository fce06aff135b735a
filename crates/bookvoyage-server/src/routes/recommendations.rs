//! Recommendation and reading-list export routes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use bookvoyage_core::config::EXPORT_FILE_NAME;
use bookvoyage_resolve::{
    build_recommendations, export_csv, Era, FilterSpec, Length, RecommendationRecord,
    Recommendations,
};
use serde::Deserialize;
use tracing::{info, warn};

use super::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations", post(recommend))
        .route("/recommendations/export", post(export))
}

/// Filter constraints plus optional presets.
///
/// `result_count` falls back to the configured default when omitted. A
/// preset overrides the matching explicit range.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendRequest {
    #[serde(flatten)]
    pub filter: FilterSpec,
    pub result_count: Option<usize>,
    pub era: Option<Era>,
    pub length: Option<Length>,
}

impl RecommendRequest {
    pub fn into_spec(self, state: &AppState) -> FilterSpec {
        let mut spec = self.filter;
        spec.result_count = self
            .result_count
            .unwrap_or(state.config.default_result_count);
        if let Some(era) = self.era {
            spec = spec.with_era(era, &state.bounds);
        }
        if let Some(length) = self.length {
            spec = spec.with_length(length, &state.bounds);
        }
        spec
    }
}

/// POST /api/recommendations — filter, rank and decorate.
async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecommendRequest>,
) -> ApiResult<Json<Recommendations>> {
    let spec = req.into_spec(&state);
    let mut rng = state.rng();
    let recs = build_recommendations(&state.catalog, state.reviews(), &spec, &mut rng)?;
    Ok(Json(recs))
}

#[derive(Debug, Deserialize)]
struct ExportRequest {
    records: Vec<RecommendationRecord>,
}

/// POST /api/recommendations/export — the shown records as a CSV download.
///
/// A copy is also written to the exports directory.
async fn export(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExportRequest>,
) -> impl IntoResponse {
    let body = export_csv(&req.records);

    let saved = state.config.data_paths.exports.join(EXPORT_FILE_NAME);
    match std::fs::write(&saved, &body) {
        Ok(()) => info!("Exported {} records to {}", req.records.len(), saved.display()),
        Err(e) => warn!("Could not save export copy to {}: {}", saved.display(), e),
    }

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        body,
    )
}
