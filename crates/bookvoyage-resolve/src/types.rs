//! Filter specification and engine output types.

use bookvoyage_core::config::{DEFAULT_RESULT_COUNT, MAX_RESULT_COUNT};
use bookvoyage_core::{Error, Result};
use bookvoyage_store::{CatalogBounds, Work};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_RATING: f64 = 3.5;
pub const DEFAULT_MIN_RATINGS_COUNT: u64 = 100;
pub const RATING_SCALE: (f64, f64) = (1.0, 5.0);

/// User constraints for one filter evaluation.
///
/// Built fresh from user input each time and never mutated once handed to
/// the engine. Empty strings in the optional text fields mean "not
/// supplied". Absent year or page ranges mean the catalog's full span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub genres: Vec<String>,
    pub authors: Vec<String>,
    pub title_search: Option<String>,
    pub min_rating: f64,
    /// Inclusive publication year range. Bounds may be negative (BCE).
    pub year_range: Option<(i32, i32)>,
    /// Inclusive page-count range.
    pub page_range: Option<(u32, u32)>,
    pub min_ratings_count: u64,
    pub include_keyword: Option<String>,
    pub exclude_keyword: Option<String>,
    /// Keep only works with at least one text review.
    pub only_with_reviews: bool,
    pub exclude_spoilers: bool,
    pub filter_profanity: bool,
    pub result_count: usize,
    /// Replace the ranking with a uniform random sample.
    pub surprise: bool,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            genres: Vec::new(),
            authors: Vec::new(),
            title_search: None,
            min_rating: DEFAULT_MIN_RATING,
            year_range: None,
            page_range: None,
            min_ratings_count: DEFAULT_MIN_RATINGS_COUNT,
            include_keyword: None,
            exclude_keyword: None,
            only_with_reviews: false,
            exclude_spoilers: true,
            filter_profanity: true,
            result_count: DEFAULT_RESULT_COUNT,
            surprise: false,
        }
    }
}

impl FilterSpec {
    /// Reject specs the engine cannot evaluate.
    pub fn validate(&self) -> Result<()> {
        let (lo, hi) = RATING_SCALE;
        if !self.min_rating.is_finite() || !(lo..=hi).contains(&self.min_rating) {
            return Err(Error::FilterEvaluation(format!(
                "minimum rating must be between {lo} and {hi}, got {}",
                self.min_rating
            )));
        }
        if let Some((start, end)) = self.year_range {
            if start > end {
                return Err(Error::FilterEvaluation(format!(
                    "year range is inverted: {start} > {end}"
                )));
            }
        }
        if let Some((start, end)) = self.page_range {
            if start > end {
                return Err(Error::FilterEvaluation(format!(
                    "page range is inverted: {start} > {end}"
                )));
            }
        }
        if !(1..=MAX_RESULT_COUNT).contains(&self.result_count) {
            return Err(Error::FilterEvaluation(format!(
                "result count must be between 1 and {MAX_RESULT_COUNT}, got {}",
                self.result_count
            )));
        }
        Ok(())
    }

    pub fn title_search(&self) -> Option<&str> {
        supplied(&self.title_search)
    }

    pub fn include_keyword(&self) -> Option<&str> {
        supplied(&self.include_keyword)
    }

    pub fn exclude_keyword(&self) -> Option<&str> {
        supplied(&self.exclude_keyword)
    }

    /// Narrow the year range to a named era.
    pub fn with_era(mut self, era: Era, bounds: &CatalogBounds) -> Self {
        self.year_range = Some(era.range(bounds));
        self
    }

    /// Narrow the page range to a named length.
    pub fn with_length(mut self, length: Length, bounds: &CatalogBounds) -> Self {
        self.page_range = Some(length.range(bounds));
        self
    }
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Publication-era presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Era {
    /// Before 500.
    Ancient,
    /// 500 to 1500.
    Classical,
    /// 1500 onward.
    Modern,
    NineteenthCentury,
    TwentiethCentury,
    TwentyFirstCentury,
}

impl Era {
    /// Concrete year range. Open ends take the catalog bounds but never
    /// invert the range.
    pub fn range(&self, bounds: &CatalogBounds) -> (i32, i32) {
        match self {
            Self::Ancient => (bounds.earliest_year.min(500), 500),
            Self::Classical => (500, 1500),
            Self::Modern => (1500, bounds.year_ceiling.max(1500)),
            Self::NineteenthCentury => (1800, 1899),
            Self::TwentiethCentury => (1900, 1999),
            Self::TwentyFirstCentury => (2000, bounds.year_ceiling.max(2000)),
        }
    }
}

/// Book-length presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Length {
    /// Under 250 pages.
    Short,
    /// 400 pages and up.
    Long,
}

impl Length {
    pub fn range(&self, bounds: &CatalogBounds) -> (u32, u32) {
        match self {
            Self::Short => (bounds.min_pages.min(250), 250),
            Self::Long => (400, bounds.max_pages.max(400)),
        }
    }
}

/// Result of one filter pass.
#[derive(Debug, Clone)]
pub struct FilterOutcome<'a> {
    /// Ranked candidates, or a random sample in surprise mode.
    pub works: Vec<&'a Work>,
    /// Size of the full filtered set before sampling or truncation.
    pub total_matches: usize,
    pub sampled: bool,
}

impl<'a> FilterOutcome<'a> {
    /// The first `count` works of the active ordering.
    pub fn top(&self, count: usize) -> &[&'a Work] {
        &self.works[..count.min(self.works.len())]
    }
}
