//! Row types for the works and reviews tables.

use serde::{Deserialize, Serialize};

/// One catalog entry (a book).
///
/// Every column other than the identifier may be absent in the source
/// table. Absent numerics stay `None`; they are never read as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Comma-delimited genre tags, kept as raw text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_reviews_count: Option<u64>,
    /// Original publication year. Negative for BCE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Comma-delimited identifiers of similar works. May contain junk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar_books: Option<String>,
}

impl Work {
    /// A work with only its identifier set.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: None,
            author: None,
            genres: None,
            avg_rating: None,
            ratings_count: None,
            text_reviews_count: None,
            publication_year: None,
            num_pages: None,
            description: None,
            image_url: None,
            similar_books: None,
        }
    }

    /// Genre text with absent treated as empty.
    pub fn genres_text(&self) -> &str {
        self.genres.as_deref().unwrap_or("")
    }

    /// Rating count with absent treated as zero.
    pub fn ratings_count_or_zero(&self) -> u64 {
        self.ratings_count.unwrap_or(0)
    }
}

/// One reader review tied to a work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub work_id: i64,
    /// Star rating, 1 to 5.
    pub rating: u8,
    /// Review body. A review without a body is still a valid review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_votes: Option<u64>,
}

/// Year and page-count bounds observed in a catalog.
///
/// These are the default spans a fresh filter uses when the caller does
/// not narrow the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogBounds {
    /// Smallest publication year of any sign.
    pub earliest_year: i32,
    /// Smallest strictly positive publication year.
    pub year_floor: i32,
    /// Largest publication year.
    pub year_ceiling: i32,
    pub min_pages: u32,
    pub max_pages: u32,
}

impl CatalogBounds {
    pub const FALLBACK_YEARS: (i32, i32) = (-500, 2023);
    pub const FALLBACK_PAGES: (u32, u32) = (1, 2000);

    /// The full default year span.
    pub fn default_years(&self) -> (i32, i32) {
        (self.year_floor, self.year_ceiling)
    }

    /// The full default page span.
    pub fn default_pages(&self) -> (u32, u32) {
        (self.min_pages, self.max_pages)
    }
}

/// Summary figures shown above the recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_books: usize,
    pub total_reviews: usize,
    /// Mean of the average ratings of rated works; `None` if none are rated.
    pub mean_rating: Option<f64>,
    pub unique_authors: usize,
}
