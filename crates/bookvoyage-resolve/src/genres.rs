//! Genre universe extraction with a content-keyed cache.
//!
//! The catalog is large and static within a session, so extracted genre
//! lists are memoized by a digest of the genre column itself.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use bookvoyage_store::Catalog;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Sorted, distinct genre tags across the catalog.
///
/// Each row's genre text is split on commas and trimmed; empty tokens are
/// dropped. Malformed rows just contribute nothing.
pub fn extract_genres(catalog: &Catalog) -> Vec<String> {
    catalog
        .works()
        .iter()
        .flat_map(|w| w.genres_text().split(','))
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// SHA-256 of the genre column, length-prefixed per row.
pub fn genre_digest(catalog: &Catalog) -> String {
    let mut hasher = Sha256::new();
    for work in catalog.works() {
        let text = work.genres_text();
        hasher.update((text.len() as u64).to_le_bytes());
        hasher.update(text.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Thread-safe memo of extracted genre lists keyed by column digest.
pub struct GenreCache {
    inner: Mutex<CacheInner>,
}

struct CacheInner {
    entries: HashMap<String, Arc<Vec<String>>>,
    order: Vec<String>,
    max_size: usize,
}

impl GenreCache {
    /// Create a cache holding at most `max_size` catalogs.
    pub fn new(max_size: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(max_size),
                order: Vec::with_capacity(max_size),
                max_size: max_size.max(1),
            }),
        }
    }

    /// Cached genres for this catalog's content, extracting on a miss.
    pub fn get_or_extract(&self, catalog: &Catalog) -> Arc<Vec<String>> {
        let key = genre_digest(catalog);
        let mut inner = self.inner.lock();

        if let Some(hit) = inner.entries.get(&key) {
            return Arc::clone(hit);
        }

        let genres = Arc::new(extract_genres(catalog));
        debug!(genres = genres.len(), "genre cache miss");

        while inner.entries.len() >= inner.max_size && !inner.order.is_empty() {
            let oldest = inner.order.remove(0);
            inner.entries.remove(&oldest);
        }
        inner.order.push(key.clone());
        inner.entries.insert(key, Arc::clone(&genres));
        genres
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GenreCache {
    fn default() -> Self {
        Self::new(8)
    }
}
