//! Assemble display-ready recommendation records from a filter pass.

use std::collections::HashSet;

use bookvoyage_core::Result;
use bookvoyage_store::{Catalog, ReviewTable, Work};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::filter::filter;
use crate::reviews::{select_reviews, truncate_chars, ReviewExcerpt, ELLIPSIS};
use crate::types::FilterSpec;

/// Similar works listed per record.
pub const MAX_SIMILAR: usize = 5;
/// Characters of description kept in a record.
pub const DESCRIPTION_CHARS: usize = 300;
pub const NO_DESCRIPTION: &str = "No description available";

/// A catalog work referenced from another work's similar list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarWork {
    pub id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
}

impl From<&Work> for SimilarWork {
    fn from(work: &Work) -> Self {
        Self {
            id: work.id,
            title: work.title.clone(),
            author: work.author.clone(),
            year: work.publication_year,
        }
    }
}

/// One recommended work with everything needed to show it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub work_id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub genres: Option<String>,
    pub avg_rating: Option<f64>,
    pub ratings_count: Option<u64>,
    pub publication_year: Option<i32>,
    pub num_pages: Option<u32>,
    pub image_url: Option<String>,
    /// First 300 characters of the description.
    pub description: Option<String>,
    pub description_truncated: bool,
    pub reviews: Vec<ReviewExcerpt>,
    /// Eligible reviews before sampling.
    pub reviews_available: usize,
    pub similar: Vec<SimilarWork>,
}

impl RecommendationRecord {
    /// Description for display, with an ellipsis when it was cut.
    pub fn description_display(&self) -> String {
        match &self.description {
            Some(text) if self.description_truncated => format!("{text}{ELLIPSIS}"),
            Some(text) => text.clone(),
            None => NO_DESCRIPTION.to_string(),
        }
    }
}

/// Output of one recommendation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Filtered set size before truncation.
    pub total_matches: usize,
    pub sampled: bool,
    pub reviews_loaded: bool,
    pub records: Vec<RecommendationRecord>,
}

/// Works named in `work`'s similar list, in catalog order, at most `limit`.
///
/// Tokens that are not plain digit strings are ignored.
pub fn similar_works<'a>(catalog: &'a Catalog, work: &Work, limit: usize) -> Vec<&'a Work> {
    let wanted: HashSet<i64> = work
        .similar_books
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|t| t.parse().ok())
        .collect();

    if wanted.is_empty() {
        return Vec::new();
    }

    catalog
        .works()
        .iter()
        .filter(|w| wanted.contains(&w.id))
        .take(limit)
        .collect()
}

/// Filter, truncate to the requested count, and decorate each work with
/// sampled reviews and similar works.
pub fn build_recommendations<R: Rng + ?Sized>(
    catalog: &Catalog,
    reviews: Option<&ReviewTable>,
    spec: &FilterSpec,
    rng: &mut R,
) -> Result<Recommendations> {
    let outcome = filter(catalog, spec, rng)?;

    let records = outcome
        .top(spec.result_count)
        .iter()
        .map(|work| {
            let selection = select_reviews(reviews, work.id, spec.exclude_spoilers, &mut *rng);
            let (description, description_truncated) = match work.description.as_deref() {
                Some(text) => {
                    let (head, cut) = truncate_chars(text, DESCRIPTION_CHARS);
                    (Some(head.to_string()), cut)
                }
                None => (None, false),
            };

            RecommendationRecord {
                work_id: work.id,
                title: work.title.clone(),
                author: work.author.clone(),
                genres: work.genres.clone(),
                avg_rating: work.avg_rating,
                ratings_count: work.ratings_count,
                publication_year: work.publication_year,
                num_pages: work.num_pages,
                image_url: work.image_url.clone(),
                description,
                description_truncated,
                reviews: selection
                    .reviews
                    .iter()
                    .map(|r| ReviewExcerpt::from_review(r, spec.filter_profanity))
                    .collect(),
                reviews_available: selection.available,
                similar: similar_works(catalog, work, MAX_SIMILAR)
                    .into_iter()
                    .map(SimilarWork::from)
                    .collect(),
            }
        })
        .collect::<Vec<_>>();

    info!(
        total_matches = outcome.total_matches,
        shown = records.len(),
        sampled = outcome.sampled,
        "built recommendations"
    );

    Ok(Recommendations {
        total_matches: outcome.total_matches,
        sampled: outcome.sampled,
        reviews_loaded: reviews.is_some(),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookvoyage_core::Error;
    use bookvoyage_store::Review;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn work(id: i64, title: &str, rating: f64, count: u64) -> Work {
        Work {
            title: Some(title.to_string()),
            author: Some("Author".to_string()),
            avg_rating: Some(rating),
            ratings_count: Some(count),
            ..Work::new(id)
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn test_similar_in_catalog_order_capped() {
        let mut works: Vec<Work> = (1..=8).map(|i| work(i, &format!("B{i}"), 4.0, 200)).collect();
        works[0].similar_books = Some("8, 7,6 ,x1, ,5,4,3,2,-9".to_string());
        let catalog = Catalog::new(works).unwrap();
        let subject = catalog.get(1).unwrap();

        let ids: Vec<i64> = similar_works(&catalog, subject, MAX_SIMILAR)
            .iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_similar_ignores_unknown_and_junk() {
        let mut subject = work(1, "A", 4.0, 200);
        subject.similar_books = Some("nan".to_string());
        let catalog = Catalog::new(vec![subject.clone(), work(2, "B", 4.0, 200)]).unwrap();
        assert!(similar_works(&catalog, &subject, MAX_SIMILAR).is_empty());

        subject.similar_books = Some("404, 2".to_string());
        let found = similar_works(&catalog, &subject, MAX_SIMILAR);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);

        subject.similar_books = None;
        assert!(similar_works(&catalog, &subject, MAX_SIMILAR).is_empty());
    }

    #[test]
    fn test_build_truncates_and_counts() {
        let works = (1..=7)
            .map(|i| work(i, &format!("Book {i}"), 3.5 + i as f64 * 0.1, 500))
            .collect();
        let catalog = Catalog::new(works).unwrap();
        let spec = FilterSpec {
            result_count: 3,
            ..Default::default()
        };

        let recs = build_recommendations(&catalog, None, &spec, &mut rng()).unwrap();
        assert_eq!(recs.total_matches, 7);
        assert!(!recs.reviews_loaded);
        let ids: Vec<i64> = recs.records.iter().map(|r| r.work_id).collect();
        assert_eq!(ids, vec![7, 6, 5]);
        assert!(recs.records.iter().all(|r| r.reviews.is_empty()));
    }

    #[test]
    fn test_build_decorates_records() {
        let mut dune = work(1, "Dune", 4.2, 1000);
        dune.description = Some("d".repeat(310));
        dune.similar_books = Some("2".to_string());
        let mut messiah = work(2, "Dune Messiah", 3.9, 400);
        messiah.publication_year = Some(1969);
        let catalog = Catalog::new(vec![dune, messiah]).unwrap();
        let reviews = ReviewTable::new(vec![
            Review {
                work_id: 1,
                rating: 5,
                review_text: Some("What the hell, a classic.".to_string()),
                n_votes: Some(3),
            },
            Review {
                work_id: 1,
                rating: 1,
                review_text: Some("(view spoiler)[Paul wins]".to_string()),
                n_votes: None,
            },
        ]);
        let spec = FilterSpec {
            result_count: 1,
            ..Default::default()
        };

        let recs = build_recommendations(&catalog, Some(&reviews), &spec, &mut rng()).unwrap();
        assert!(recs.reviews_loaded);
        let record = &recs.records[0];
        assert_eq!(record.work_id, 1);
        assert!(record.description_truncated);
        assert_eq!(record.description.as_deref().map(|d| d.len()), Some(300));
        assert!(record.description_display().ends_with("..."));
        assert_eq!(record.reviews_available, 1);
        assert_eq!(record.reviews[0].text, "What the ****, a classic.");
        assert_eq!(record.reviews[0].caption(), "Rating: 5/5 | 3 helpful votes");
        assert_eq!(
            record.similar,
            vec![SimilarWork {
                id: 2,
                title: Some("Dune Messiah".to_string()),
                author: Some("Author".to_string()),
                year: Some(1969),
            }]
        );
    }

    #[test]
    fn test_zero_matches_is_ok() {
        let catalog = Catalog::new(vec![work(1, "Meh", 2.0, 10)]).unwrap();
        let recs =
            build_recommendations(&catalog, None, &FilterSpec::default(), &mut rng()).unwrap();
        assert_eq!(recs.total_matches, 0);
        assert!(recs.records.is_empty());
    }

    #[test]
    fn test_filter_error_propagates() {
        let catalog = Catalog::new(vec![work(1, "Dune", 4.2, 1000)]).unwrap();
        let spec = FilterSpec {
            result_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            build_recommendations(&catalog, None, &spec, &mut rng()),
            Err(Error::FilterEvaluation(_))
        ));
    }

    #[test]
    fn test_missing_description_display() {
        let catalog = Catalog::new(vec![work(1, "Dune", 4.2, 1000)]).unwrap();
        let recs =
            build_recommendations(&catalog, None, &FilterSpec::default(), &mut rng()).unwrap();
        assert_eq!(recs.records[0].description, None);
        assert_eq!(recs.records[0].description_display(), NO_DESCRIPTION);
    }
}
