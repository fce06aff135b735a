//! Catalog overview routes: headline stats and filter choices.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use bookvoyage_store::{CatalogBounds, CatalogStats};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/genres", get(get_genres))
        .route("/authors", get(get_authors))
        .route("/bounds", get(get_bounds))
}

/// GET /api/stats — headline figures.
async fn get_stats(State(state): State<Arc<AppState>>) -> Json<CatalogStats> {
    Json(state.catalog.stats(state.reviews()))
}

/// GET /api/genres — sorted genre universe.
async fn get_genres(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let genres = state.genre_cache.get_or_extract(&state.catalog);
    Json(serde_json::json!({
        "genres": *genres,
        "count": genres.len(),
    }))
}

/// GET /api/authors — sorted distinct authors.
async fn get_authors(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let authors = state.catalog.authors();
    Json(serde_json::json!({
        "authors": authors,
        "count": authors.len(),
    }))
}

/// GET /api/bounds — year and page slider bounds.
async fn get_bounds(State(state): State<Arc<AppState>>) -> Json<CatalogBounds> {
    Json(state.bounds)
}
