//! BookVoyage Store — works/reviews tables, CSV loading, catalog statistics.

pub mod catalog;
pub mod csv;
pub mod loader;
pub mod types;

pub use catalog::{Catalog, ReviewTable};
pub use loader::{load_catalog, load_reviews, parse_catalog, parse_reviews};
pub use types::*;
