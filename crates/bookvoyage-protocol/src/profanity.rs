//! Whole-word profanity masking.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Fixed denylist. Not user-configurable.
pub const DENYLIST: &[&str] = &[
    "fuck", "shit", "ass", "bitch", "crap", "damn", "hell", "bastard",
];

pub const MASK_CHAR: char = '*';

// Compiled once from the denylist, case-insensitive, whole words only.
static PROFANITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", DENYLIST.join("|")))
        .expect("denylist pattern is valid")
});

/// A denylisted word found in text, with byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfanityMatch {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Locate every whole-word denylist occurrence.
pub fn find_profanity(text: &str) -> Vec<ProfanityMatch> {
    PROFANITY_RE
        .find_iter(text)
        .map(|m| ProfanityMatch {
            start: m.start(),
            end: m.end(),
            text: m.as_str().to_string(),
        })
        .collect()
}

/// Mask denylisted words with a run of `*` of the same character length.
///
/// Everything outside a match is copied unchanged. Absent text becomes "".
pub fn redact_profanity<'a>(text: impl Into<Option<&'a str>>) -> String {
    let Some(text) = text.into() else {
        return String::new();
    };

    PROFANITY_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            MASK_CHAR.to_string().repeat(caps[0].chars().count())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_preserves_surroundings() {
        assert_eq!(redact_profanity("This is hell on earth"), "This is **** on earth");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(redact_profanity("DAMN it, Crap!"), "**** it, ****!");
    }

    #[test]
    fn test_whole_words_only() {
        let text = "A classic hello from Hellsing, a passing assassin in Scunthorpe.";
        assert_eq!(redact_profanity(text), text);
    }

    #[test]
    fn test_punctuation_is_a_boundary() {
        assert_eq!(redact_profanity("(shit)"), "(****)");
        assert_eq!(redact_profanity("bastard's plan"), "*******'s plan");
    }

    #[test]
    fn test_absent_text_is_empty() {
        assert_eq!(redact_profanity(None::<&str>), "");
    }

    #[test]
    fn test_length_preserved_and_spans_masked() {
        let samples = [
            "what the hell, what the HELL",
            "ass ass ass",
            "nothing to see",
            "multi\nline damn\ntext",
            "",
        ];
        for text in samples {
            let masked = redact_profanity(text);
            assert_eq!(masked.chars().count(), text.chars().count(), "{text:?}");
            for m in find_profanity(text) {
                assert!(masked[m.start..m.end].chars().all(|c| c == MASK_CHAR));
            }
        }
    }

    #[test]
    fn test_find_reports_offsets() {
        let found = find_profanity("oh hell no");
        assert_eq!(
            found,
            vec![ProfanityMatch {
                start: 3,
                end: 7,
                text: "hell".into()
            }]
        );
    }
}
