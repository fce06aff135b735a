//! Filter engine — conjunctive row predicates, stable ranking, surprise
//! sampling.
//!
//! Predicates run in a fixed order over the read-only catalog. A pass
//! either succeeds as a whole or fails with `FilterEvaluation`; partially
//! filtered sets are never returned.

use std::cmp::Ordering;

use bookvoyage_core::{Error, Result};
use bookvoyage_store::{Catalog, CatalogBounds, Work};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::types::{FilterOutcome, FilterSpec};

/// Apply `spec` to `catalog`.
///
/// Returns the ranked candidate set (rating desc, rating count desc, ties
/// in catalog order), or a uniform random sample of
/// `min(result_count, matches)` works when `spec.surprise` is set.
pub fn filter<'a, R: Rng + ?Sized>(
    catalog: &'a Catalog,
    spec: &FilterSpec,
    rng: &mut R,
) -> Result<FilterOutcome<'a>> {
    spec.validate()?;
    let predicates = Predicates::compile(spec, catalog.bounds());

    let mut candidates = Vec::new();
    for work in catalog.works() {
        if predicates.accepts(work)? {
            candidates.push(work);
        }
    }

    // `sort_by` is stable: equal keys keep catalog order.
    candidates.sort_by(|a, b| rank(a, b));
    let total_matches = candidates.len();

    let sampled = spec.surprise && !candidates.is_empty();
    if sampled {
        let amount = spec.result_count.min(total_matches);
        candidates = candidates.choose_multiple(rng, amount).copied().collect();
    }

    debug!(total_matches, sampled, "filter pass complete");
    Ok(FilterOutcome {
        works: candidates,
        total_matches,
        sampled,
    })
}

fn rank(a: &Work, b: &Work) -> Ordering {
    let rating = |w: &Work| w.avg_rating.unwrap_or(f64::NEG_INFINITY);
    rating(b)
        .total_cmp(&rating(a))
        .then_with(|| b.ratings_count_or_zero().cmp(&a.ratings_count_or_zero()))
}

/// A spec resolved against one catalog, with search text pre-lowered.
struct Predicates<'s> {
    genres: &'s [String],
    authors: &'s [String],
    title_search: Option<String>,
    min_rating: f64,
    years: (i32, i32),
    /// True when the year range is the catalog's full default span.
    default_years: bool,
    year_floor: i32,
    pages: (u32, u32),
    min_ratings_count: u64,
    include_keyword: Option<String>,
    exclude_keyword: Option<String>,
    only_with_reviews: bool,
}

impl<'s> Predicates<'s> {
    fn compile(spec: &'s FilterSpec, bounds: CatalogBounds) -> Self {
        let years = spec.year_range.unwrap_or_else(|| bounds.default_years());
        Self {
            genres: &spec.genres,
            authors: &spec.authors,
            title_search: spec.title_search().map(str::to_lowercase),
            min_rating: spec.min_rating,
            years,
            default_years: years == bounds.default_years(),
            year_floor: bounds.year_floor,
            pages: spec.page_range.unwrap_or_else(|| bounds.default_pages()),
            min_ratings_count: spec.min_ratings_count,
            include_keyword: spec.include_keyword().map(str::to_lowercase),
            exclude_keyword: spec.exclude_keyword().map(str::to_lowercase),
            only_with_reviews: spec.only_with_reviews,
        }
    }

    fn accepts(&self, work: &Work) -> Result<bool> {
        Ok(self.genre_matches(work)
            && self.author_matches(work)
            && self.title_matches(work)
            && self.rating_passes(work)?
            && self.year_passes(work)
            && self.pages_pass(work)
            && work.ratings_count_or_zero() >= self.min_ratings_count
            && self.includes_keyword(work)
            && !self.excludes_keyword(work)
            && (!self.only_with_reviews || work.text_reviews_count.unwrap_or(0) > 0))
    }

    /// Raw-text substring match, not token-exact: a tag that is a substring
    /// of another tag matches both.
    fn genre_matches(&self, work: &Work) -> bool {
        if self.genres.is_empty() {
            return true;
        }
        let text = work.genres_text();
        self.genres.iter().any(|g| text.contains(g.as_str()))
    }

    fn author_matches(&self, work: &Work) -> bool {
        if self.authors.is_empty() {
            return true;
        }
        work.author
            .as_ref()
            .is_some_and(|a| self.authors.contains(a))
    }

    fn title_matches(&self, work: &Work) -> bool {
        match &self.title_search {
            Some(needle) => contains_lower(work.title.as_deref(), needle),
            None => true,
        }
    }

    /// Absent ratings fail. A non-finite rating cannot be compared and
    /// aborts the pass.
    fn rating_passes(&self, work: &Work) -> Result<bool> {
        match work.avg_rating {
            Some(r) if !r.is_finite() => Err(Error::FilterEvaluation(format!(
                "work {} has a non-comparable average rating",
                work.id
            ))),
            Some(r) => Ok(r >= self.min_rating),
            None => Ok(false),
        }
    }

    /// Absent years pass. Under the full default span, years below the
    /// positive-year floor (BCE works) also pass.
    fn year_passes(&self, work: &Work) -> bool {
        match work.publication_year {
            None => true,
            Some(y) => {
                (self.years.0..=self.years.1).contains(&y)
                    || (self.default_years && y < self.year_floor)
            }
        }
    }

    fn pages_pass(&self, work: &Work) -> bool {
        match work.num_pages {
            None => true,
            Some(p) => (self.pages.0..=self.pages.1).contains(&p),
        }
    }

    fn includes_keyword(&self, work: &Work) -> bool {
        match &self.include_keyword {
            Some(k) => mentions(work, k),
            None => true,
        }
    }

    fn excludes_keyword(&self, work: &Work) -> bool {
        match &self.exclude_keyword {
            Some(k) => mentions(work, k),
            None => false,
        }
    }
}

/// Keyword appears in the title or the description.
fn mentions(work: &Work, needle: &str) -> bool {
    contains_lower(work.title.as_deref(), needle)
        || contains_lower(work.description.as_deref(), needle)
}

/// Case-insensitive substring test. `needle` is already lowercase.
fn contains_lower(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}
