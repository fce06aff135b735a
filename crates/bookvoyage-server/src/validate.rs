//! Data directory validation.
//!
//! Loads both tables the way the server does and reports what it found,
//! without starting anything.

use std::path::Path;

use bookvoyage_core::DataPaths;
use bookvoyage_resolve::extract_genres;
use bookvoyage_store::{load_catalog, load_reviews, CatalogBounds};

/// Result of validating a data directory.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub works_valid: bool,
    pub works: usize,
    pub reviews: Option<usize>,
    pub genres: usize,
    pub authors: usize,
    pub bounds: Option<CatalogBounds>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_ready(&self) -> bool {
        self.works_valid && self.errors.is_empty()
    }
}

/// Check that `data_dir` holds a loadable works table and, if present, a
/// loadable reviews table.
pub fn validate(data_dir: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    let paths = match DataPaths::new(data_dir) {
        Ok(p) => p,
        Err(e) => {
            report
                .errors
                .push(format!("Cannot use data directory {}: {}", data_dir.display(), e));
            return report;
        }
    };

    match load_catalog(&paths.works_file) {
        Ok(catalog) => {
            report.works_valid = true;
            report.works = catalog.len();
            report.genres = extract_genres(&catalog).len();
            report.authors = catalog.authors().len();
            report.bounds = Some(catalog.bounds());
            if catalog.is_empty() {
                report.warnings.push("Works table has no rows".to_string());
            }
        }
        Err(e) => report.errors.push(e.to_string()),
    }

    match load_reviews(&paths.reviews_file) {
        Ok(Some(reviews)) => report.reviews = Some(reviews.len()),
        Ok(None) => report.warnings.push(format!(
            "Reviews table not found at {}; recommendations will have no reviews",
            paths.reviews_file.display()
        )),
        Err(e) => report.errors.push(e.to_string()),
    }

    report
}

pub fn print_report(report: &ValidationReport) {
    println!("=== BookVoyage Data Report ===");
    println!();
    println!("Works table valid:  {}", if report.works_valid { "YES" } else { "NO" });
    println!("Works:              {}", report.works);
    match report.reviews {
        Some(n) => println!("Reviews:            {}", n),
        None => println!("Reviews:            not loaded"),
    }
    println!("Genres:             {}", report.genres);
    println!("Authors:            {}", report.authors);
    if let Some(b) = &report.bounds {
        println!("Years:              {} to {}", b.year_floor, b.year_ceiling);
        println!("Pages:              {} to {}", b.min_pages, b.max_pages);
    }

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for w in &report.warnings {
            println!("  - {}", w);
        }
    }

    if !report.errors.is_empty() {
        println!();
        println!("Errors:");
        for e in &report.errors {
            println!("  - {}", e);
        }
    }

    println!();
    if report.is_ready() {
        println!("Status: READY FOR USE");
    } else {
        println!("Status: NOT READY");
    }
}
