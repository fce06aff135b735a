//! Reviews-table downsampling for small deployments.
//!
//! Draws a fixed-seed uniform sample of review rows so the same source
//! always yields the same sample file.

use std::path::Path;

use bookvoyage_core::Result;
use bookvoyage_store::csv::{self, write_record};
use bookvoyage_store::loader::REVIEW_REQUIRED_COLUMNS;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

pub const DEFAULT_SAMPLE_SIZE: usize = 5000;
pub const SAMPLE_SEED: u64 = 42;

/// Outcome of one sampling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleReport {
    pub source_rows: usize,
    pub sampled_rows: usize,
}

/// Sample `n` rows of CSV text. Asking for more rows than exist keeps all
/// of them, shuffled.
pub fn sample_rows(content: &str, n: usize, seed: u64) -> Result<(String, SampleReport)> {
    let table = csv::parse(content)?;
    table.require_columns("reviews", REVIEW_REQUIRED_COLUMNS)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let picked: Vec<_> = table
        .rows
        .choose_multiple(&mut rng, n.min(table.rows.len()))
        .collect();

    let mut out = String::new();
    write_record(&mut out, &table.headers);
    for row in &picked {
        write_record(&mut out, &row.fields);
    }

    let report = SampleReport {
        source_rows: table.rows.len(),
        sampled_rows: picked.len(),
    };
    Ok((out, report))
}

/// Sample the reviews file at `source` into `target`.
pub fn sample_reviews_file(source: &Path, target: &Path, n: usize) -> Result<SampleReport> {
    info!("Loading reviews from {}", source.display());
    let content = std::fs::read_to_string(source)?;
    let (out, report) = sample_rows(&content, n, SAMPLE_SEED)?;
    std::fs::write(target, out)?;
    info!(
        "Sampled {} of {} rows into {}",
        report.sampled_rows,
        report.source_rows,
        target.display()
    );
    Ok(report)
}
