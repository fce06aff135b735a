//! Shared application state.

use bookvoyage_core::BookVoyageConfig;
use bookvoyage_resolve::GenreCache;
use bookvoyage_store::{load_catalog, load_reviews, Catalog, CatalogBounds, ReviewTable};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Read-only tables and caches shared by all route handlers.
pub struct AppState {
    pub config: BookVoyageConfig,
    pub catalog: Catalog,
    /// Absent when the reviews file is not installed.
    pub reviews: Option<ReviewTable>,
    pub genre_cache: GenreCache,
    /// Slider bounds, computed once at load.
    pub bounds: CatalogBounds,
}

impl AppState {
    pub fn new(config: BookVoyageConfig, catalog: Catalog, reviews: Option<ReviewTable>) -> Self {
        let bounds = catalog.bounds();
        Self {
            config,
            catalog,
            reviews,
            genre_cache: GenreCache::default(),
            bounds,
        }
    }

    /// Load both tables from the configured data directory.
    pub fn load(config: BookVoyageConfig) -> bookvoyage_core::Result<Self> {
        let catalog = load_catalog(&config.data_paths.works_file)?;
        let reviews = load_reviews(&config.data_paths.reviews_file)?;
        info!(
            works = catalog.len(),
            reviews = reviews.as_ref().map_or(0, ReviewTable::len),
            "tables loaded"
        );
        Ok(Self::new(config, catalog, reviews))
    }

    pub fn reviews(&self) -> Option<&ReviewTable> {
        self.reviews.as_ref()
    }

    /// Fresh entropy-seeded generator for one request.
    pub fn rng(&self) -> StdRng {
        StdRng::from_entropy()
    }
}
