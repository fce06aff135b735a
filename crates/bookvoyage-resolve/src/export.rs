//! Reading-list CSV export.

use bookvoyage_store::csv::write_record;

use crate::recommend::{RecommendationRecord, NO_DESCRIPTION};

pub const EXPORT_COLUMNS: [&str; 7] = [
    "Title",
    "Author",
    "Genres",
    "Avg Rating",
    "Year",
    "Pages",
    "Description",
];

/// Render records as a CSV document with a header row.
///
/// Absent values become empty cells. Descriptions are the stored 300
/// character prefix, without an ellipsis.
pub fn export_csv(records: &[RecommendationRecord]) -> Vec<u8> {
    let mut out = String::new();
    write_record(&mut out, &EXPORT_COLUMNS);

    for record in records {
        let row = [
            record.title.clone().unwrap_or_default(),
            record.author.clone().unwrap_or_default(),
            record.genres.clone().unwrap_or_default(),
            record.avg_rating.map(|r| format!("{r:?}")).unwrap_or_default(),
            record
                .publication_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
            record.num_pages.map(|p| p.to_string()).unwrap_or_default(),
            record
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        ];
        write_record(&mut out, &row);
    }

    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookvoyage_store::csv::parse;

    fn record(title: &str) -> RecommendationRecord {
        RecommendationRecord {
            work_id: 1,
            title: Some(title.to_string()),
            author: Some("Frank Herbert".to_string()),
            genres: Some("fiction, science-fiction".to_string()),
            avg_rating: Some(4.0),
            ratings_count: Some(1000),
            publication_year: Some(1965),
            num_pages: Some(412),
            image_url: None,
            description: Some("Spice \"must\" flow".to_string()),
            description_truncated: false,
            reviews: Vec::new(),
            reviews_available: 0,
            similar: Vec::new(),
        }
    }

    #[test]
    fn test_header_and_quoting() {
        let text = String::from_utf8(export_csv(&[record("Dune")])).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Title,Author,Genres,Avg Rating,Year,Pages,Description")
        );
        assert_eq!(
            lines.next(),
            Some("Dune,Frank Herbert,\"fiction, science-fiction\",4.0,1965,412,\"Spice \"\"must\"\" flow\"")
        );
    }

    #[test]
    fn test_absent_values_are_empty_cells() {
        let mut sparse = record("Untitled");
        sparse.author = None;
        sparse.genres = None;
        sparse.avg_rating = None;
        sparse.publication_year = Some(-700);
        sparse.num_pages = None;
        sparse.description = None;

        let table = parse(std::str::from_utf8(&export_csv(&[sparse])).unwrap()).unwrap();
        assert_eq!(
            table.rows[0].fields,
            vec!["Untitled", "", "", "", "-700", "", NO_DESCRIPTION]
        );
    }

    #[test]
    fn test_empty_list_has_header_only() {
        let text = String::from_utf8(export_csv(&[])).unwrap();
        assert_eq!(text, "Title,Author,Genres,Avg Rating,Year,Pages,Description\n");
    }
}
