//! Typed loading of the works and reviews tables.
//!
//! Column names follow the Goodreads export. Only identifier columns are
//! strict: rows whose identifier cannot be read are skipped and counted.
//! Unreadable optional cells load as absent.

use std::path::Path;

use bookvoyage_core::{Error, Result};
use tracing::{info, warn};

use crate::catalog::{Catalog, ReviewTable};
use crate::csv::{self, CsvRow, CsvTable};
use crate::types::{Review, Work};

pub const WORK_REQUIRED_COLUMNS: &[&str] = &["work_id"];
pub const REVIEW_REQUIRED_COLUMNS: &[&str] = &["work_id", "rating", "review_text"];

/// Load the works table from a CSV file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.is_file() {
        return Err(Error::MissingData(format!(
            "works table not found at {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    let catalog = parse_catalog(&content)?;
    info!("Loaded {} works from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Load the reviews table if the file exists.
///
/// A missing file is `Ok(None)`: reviews are optional. A file that exists
/// but lacks required columns is an error.
pub fn load_reviews(path: &Path) -> Result<Option<ReviewTable>> {
    if !path.is_file() {
        info!("No reviews table at {}, continuing without reviews", path.display());
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let table = parse_reviews(&content)?;
    info!("Loaded {} reviews from {}", table.len(), path.display());
    Ok(Some(table))
}

/// Parse works from CSV text.
pub fn parse_catalog(content: &str) -> Result<Catalog> {
    let table = csv::parse(content)?;
    table.require_columns("works", WORK_REQUIRED_COLUMNS)?;
    let cols = WorkColumns::locate(&table);

    let mut works = Vec::with_capacity(table.rows.len());
    let mut skipped = 0usize;
    for row in &table.rows {
        match cols.read(row) {
            Some(work) => works.push(work),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!("Skipped {} works rows without a readable work_id", skipped);
    }

    Catalog::new(works)
}

/// Parse reviews from CSV text.
pub fn parse_reviews(content: &str) -> Result<ReviewTable> {
    let table = csv::parse(content)?;
    table.require_columns("reviews", REVIEW_REQUIRED_COLUMNS)?;

    let work_id = table.column("work_id");
    let rating = table.column("rating");
    let text = table.column("review_text");
    let votes = table.column("n_votes");

    let mut reviews = Vec::with_capacity(table.rows.len());
    let mut skipped = 0usize;
    for row in &table.rows {
        let parsed = parse_int(row.cell(work_id)).zip(
            parse_int(row.cell(rating))
                .and_then(|r| u8::try_from(r).ok())
                .filter(|r| (1..=5).contains(r)),
        );
        match parsed {
            Some((work_id, rating)) => reviews.push(Review {
                work_id,
                rating,
                review_text: row.cell(text).map(str::to_string),
                n_votes: parse_int(row.cell(votes)).and_then(|v| u64::try_from(v).ok()),
            }),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!("Skipped {} reviews rows without a readable work_id or rating", skipped);
    }

    Ok(ReviewTable::new(reviews))
}

struct WorkColumns {
    id: Option<usize>,
    title: Option<usize>,
    author: Option<usize>,
    genres: Option<usize>,
    avg_rating: Option<usize>,
    ratings_count: Option<usize>,
    text_reviews_count: Option<usize>,
    year: Option<usize>,
    pages: Option<usize>,
    description: Option<usize>,
    image_url: Option<usize>,
    similar_books: Option<usize>,
}

impl WorkColumns {
    fn locate(table: &CsvTable) -> Self {
        Self {
            id: table.column("work_id"),
            title: table.column("original_title"),
            author: table.column("author"),
            genres: table.column("genres"),
            avg_rating: table.column("avg_rating"),
            ratings_count: table.column("ratings_count"),
            text_reviews_count: table.column("text_reviews_count"),
            year: table.column("original_publication_year"),
            pages: table.column("num_pages"),
            description: table.column("description"),
            image_url: table.column("image_url"),
            similar_books: table.column("similar_books"),
        }
    }

    fn read(&self, row: &CsvRow) -> Option<Work> {
        let text = |col| row.cell(col).map(str::to_string);
        let count = |col| parse_int(row.cell(col)).and_then(|v| u64::try_from(v).ok());

        Some(Work {
            id: parse_int(row.cell(self.id))?,
            title: text(self.title),
            author: text(self.author),
            genres: text(self.genres),
            avg_rating: parse_float(row.cell(self.avg_rating)),
            ratings_count: count(self.ratings_count),
            text_reviews_count: count(self.text_reviews_count),
            publication_year: parse_int(row.cell(self.year)).and_then(|v| i32::try_from(v).ok()),
            num_pages: parse_int(row.cell(self.pages)).and_then(|v| u32::try_from(v).ok()),
            description: text(self.description),
            image_url: text(self.image_url),
            similar_books: text(self.similar_books),
        })
    }
}

/// Finite float, or `None` for empty, `nan` and junk.
fn parse_float(cell: Option<&str>) -> Option<f64> {
    cell.and_then(|c| c.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Integer, also accepting float-formatted whole numbers such as `1965.0`.
fn parse_int(cell: Option<&str>) -> Option<i64> {
    let cell = cell?.trim();
    if let Ok(v) = cell.parse::<i64>() {
        return Some(v);
    }
    parse_float(Some(cell))
        .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
        .map(|v| v as i64)
}
