//! Spoiler detection for review bodies.

/// Marker Goodreads puts in front of a hidden spoiler block.
pub const SPOILER_MARKER: &str = "(view spoiler)[";
/// Phrase reviewers use to flag spoilers by hand.
pub const SPOILER_PHRASE: &str = "spoiler alert";

/// Whether a review body contains a spoiler marker or phrase, in any case.
///
/// An absent body never counts as a spoiler.
pub fn is_spoiler(text: Option<&str>) -> bool {
    match text {
        Some(body) => {
            let lower = body.to_lowercase();
            lower.contains(SPOILER_MARKER) || lower.contains(SPOILER_PHRASE)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_is_spoiler() {
        assert!(is_spoiler(Some("contains (view spoiler)[the ending]")));
        assert!(is_spoiler(Some("(VIEW SPOILER)[shouting]")));
    }

    #[test]
    fn test_phrase_any_case() {
        assert!(is_spoiler(Some("Spoiler Alert: everyone lives")));
        assert!(is_spoiler(Some("great book. SPOILER ALERT")));
    }

    #[test]
    fn test_clean_review_is_kept() {
        assert!(!is_spoiler(Some("No spoilers here, just vibes.")));
        assert!(!is_spoiler(Some("view spoiler without the bracket")));
        assert!(!is_spoiler(Some("")));
    }

    #[test]
    fn test_absent_body_is_not_spoiler() {
        assert!(!is_spoiler(None));
    }
}
