//! In-memory works and reviews tables.
//!
//! Both tables are loaded once and then only read. Lookups by work
//! identifier go through prebuilt indexes; iteration always follows the
//! original row order.

use std::collections::{BTreeSet, HashMap};

use bookvoyage_core::{Error, Result};
use tracing::debug;

use crate::types::{CatalogBounds, CatalogStats, Review, Work};

/// The works table, indexed by identifier.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    works: Vec<Work>,
    by_id: HashMap<i64, usize>,
}

impl Catalog {
    /// Build a catalog. Fails if two rows share an identifier.
    pub fn new(works: Vec<Work>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(works.len());
        for (idx, work) in works.iter().enumerate() {
            if by_id.insert(work.id, idx).is_some() {
                return Err(Error::InvalidData(format!(
                    "duplicate work identifier {}",
                    work.id
                )));
            }
        }
        debug!(works = works.len(), "catalog indexed");
        Ok(Self { works, by_id })
    }

    /// All works in catalog order.
    pub fn works(&self) -> &[Work] {
        &self.works
    }

    pub fn get(&self, id: i64) -> Option<&Work> {
        self.by_id.get(&id).map(|&idx| &self.works[idx])
    }

    pub fn len(&self) -> usize {
        self.works.len()
    }

    pub fn is_empty(&self) -> bool {
        self.works.is_empty()
    }

    /// Sorted, distinct author names. Absent authors are skipped.
    pub fn authors(&self) -> Vec<&str> {
        self.works
            .iter()
            .filter_map(|w| w.author.as_deref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Year and page bounds, falling back to fixed spans when a column has
    /// no values at all.
    pub fn bounds(&self) -> CatalogBounds {
        let years = || self.works.iter().filter_map(|w| w.publication_year);
        let earliest_year = years().min().unwrap_or(CatalogBounds::FALLBACK_YEARS.0);
        let year_floor = years()
            .filter(|&y| y > 0)
            .min()
            .unwrap_or(CatalogBounds::FALLBACK_YEARS.0);
        let year_ceiling = years()
            .max()
            .unwrap_or(CatalogBounds::FALLBACK_YEARS.1)
            .max(year_floor);

        let pages = || self.works.iter().filter_map(|w| w.num_pages);
        let min_pages = pages().min().unwrap_or(CatalogBounds::FALLBACK_PAGES.0);
        let max_pages = pages().max().unwrap_or(CatalogBounds::FALLBACK_PAGES.1);

        CatalogBounds {
            earliest_year,
            year_floor,
            year_ceiling,
            min_pages,
            max_pages,
        }
    }

    /// Headline figures. Reviews may be absent, in which case the review
    /// total is zero.
    pub fn stats(&self, reviews: Option<&ReviewTable>) -> CatalogStats {
        let rated: Vec<f64> = self
            .works
            .iter()
            .filter_map(|w| w.avg_rating)
            .filter(|r| r.is_finite())
            .collect();
        let mean_rating = if rated.is_empty() {
            None
        } else {
            Some(rated.iter().sum::<f64>() / rated.len() as f64)
        };

        CatalogStats {
            total_books: self.works.len(),
            total_reviews: reviews.map(ReviewTable::len).unwrap_or(0),
            mean_rating,
            unique_authors: self.authors().len(),
        }
    }
}

/// The reviews table, indexed by work identifier.
#[derive(Debug, Clone, Default)]
pub struct ReviewTable {
    reviews: Vec<Review>,
    by_work: HashMap<i64, Vec<usize>>,
}

impl ReviewTable {
    pub fn new(reviews: Vec<Review>) -> Self {
        let mut by_work: HashMap<i64, Vec<usize>> = HashMap::new();
        for (idx, review) in reviews.iter().enumerate() {
            by_work.entry(review.work_id).or_default().push(idx);
        }
        debug!(reviews = reviews.len(), works = by_work.len(), "reviews indexed");
        Self { reviews, by_work }
    }

    /// Reviews of one work, in table order.
    pub fn for_work(&self, work_id: i64) -> impl Iterator<Item = &Review> + '_ {
        self.by_work
            .get(&work_id)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.reviews[idx])
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work(id: i64, author: &str, year: Option<i32>, pages: Option<u32>) -> Work {
        Work {
            author: Some(author.into()),
            publication_year: year,
            num_pages: pages,
            avg_rating: Some(4.0),
            ..Work::new(id)
        }
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let err = Catalog::new(vec![Work::new(1), Work::new(1)]).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::new(vec![Work::new(10), Work::new(3)]).unwrap();
        assert_eq!(catalog.get(3).map(|w| w.id), Some(3));
        assert!(catalog.get(4).is_none());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_bounds_floor_ignores_bce_years() {
        let catalog = Catalog::new(vec![
            work(1, "Homer", Some(-750), Some(500)),
            work(2, "Austen", Some(1813), Some(279)),
            work(3, "Herbert", Some(1965), None),
            work(4, "Anon", None, Some(1200)),
        ])
        .unwrap();
        let bounds = catalog.bounds();
        assert_eq!(bounds.default_years(), (1813, 1965));
        assert_eq!(bounds.earliest_year, -750);
        assert_eq!(bounds.default_pages(), (279, 1200));
    }

    #[test]
    fn test_bounds_fallbacks_on_empty_columns() {
        let catalog = Catalog::new(vec![Work::new(1)]).unwrap();
        let bounds = catalog.bounds();
        assert_eq!(bounds.default_years(), CatalogBounds::FALLBACK_YEARS);
        assert_eq!(bounds.default_pages(), CatalogBounds::FALLBACK_PAGES);
    }

    #[test]
    fn test_stats_and_authors() {
        let mut unrated = work(3, "Austen", None, None);
        unrated.avg_rating = None;
        let catalog = Catalog::new(vec![
            work(1, "Herbert", None, None),
            work(2, "Austen", None, None),
            unrated,
        ])
        .unwrap();
        assert_eq!(catalog.authors(), vec!["Austen", "Herbert"]);

        let reviews = ReviewTable::new(vec![Review {
            work_id: 1,
            rating: 5,
            review_text: None,
            n_votes: None,
        }]);
        let stats = catalog.stats(Some(&reviews));
        assert_eq!(stats.total_books, 3);
        assert_eq!(stats.total_reviews, 1);
        assert_eq!(stats.unique_authors, 2);
        assert_eq!(stats.mean_rating, Some(4.0));

        assert_eq!(catalog.stats(None).total_reviews, 0);
    }

    #[test]
    fn test_reviews_for_work_keep_table_order() {
        let review = |work_id, text: &str| Review {
            work_id,
            rating: 4,
            review_text: Some(text.into()),
            n_votes: None,
        };
        let table = ReviewTable::new(vec![
            review(1, "first"),
            review(2, "other"),
            review(1, "second"),
        ]);
        let texts: Vec<_> = table
            .for_work(1)
            .map(|r| r.review_text.as_deref().unwrap())
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(table.for_work(99).count(), 0);
    }
}
