//! Recommendation core: genre extraction, filtering, review selection,
//! record assembly and export.
//!
//! Everything here is synchronous and reads the tables without mutating
//! them. Randomness is always supplied by the caller.

pub mod export;
pub mod filter;
pub mod genres;
pub mod recommend;
pub mod reviews;
pub mod types;

pub use export::{export_csv, EXPORT_COLUMNS};
pub use filter::filter;
pub use genres::{extract_genres, GenreCache};
pub use recommend::{
    build_recommendations, similar_works, RecommendationRecord, Recommendations, SimilarWork,
};
pub use reviews::{select_reviews, ReviewExcerpt, ReviewSelection};
pub use types::*;
