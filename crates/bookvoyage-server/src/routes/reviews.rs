//! Per-work review sampling and the standalone redaction endpoint.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use bookvoyage_core::Error;
use bookvoyage_protocol::{find_profanity, is_spoiler, redact_profanity};
use bookvoyage_resolve::{select_reviews, ReviewExcerpt};
use serde::Deserialize;

use super::error::ApiResult;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/works/{id}/reviews", get(work_reviews))
        .route("/redact", post(redact))
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ReviewQuery {
    exclude_spoilers: bool,
    filter_profanity: bool,
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self {
            exclude_spoilers: true,
            filter_profanity: true,
        }
    }
}

/// GET /api/works/{id}/reviews — up to two sampled review excerpts.
async fn work_reviews(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(query): Query<ReviewQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    if state.catalog.get(id).is_none() {
        return Err(Error::NotFound(format!("work {id}")).into());
    }
    let Some(reviews) = state.reviews() else {
        return Err(Error::MissingData("reviews table is not loaded".into()).into());
    };

    let mut rng = state.rng();
    let selection = select_reviews(Some(reviews), id, query.exclude_spoilers, &mut rng);
    let excerpts: Vec<serde_json::Value> = selection
        .reviews
        .iter()
        .map(|r| {
            let excerpt = ReviewExcerpt::from_review(r, query.filter_profanity);
            serde_json::json!({
                "caption": excerpt.caption(),
                "excerpt": excerpt,
            })
        })
        .collect();

    Ok(Json(serde_json::json!({
        "work_id": id,
        "shown": excerpts.len(),
        "available": selection.available,
        "reviews": excerpts,
    })))
}

#[derive(Debug, Deserialize)]
struct TextInput {
    text: Option<String>,
}

/// POST /api/redact — mask profanity and flag spoilers in arbitrary text.
async fn redact(Json(input): Json<TextInput>) -> Json<serde_json::Value> {
    let text = input.text.as_deref();
    let matches = text.map(find_profanity).unwrap_or_default();
    Json(serde_json::json!({
        "text": redact_profanity(text),
        "matches": matches,
        "spoiler": is_spoiler(text),
    }))
}
