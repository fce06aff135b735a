//! Review selection and excerpt formatting.

use bookvoyage_protocol::{is_spoiler, redact_profanity};
use bookvoyage_store::{Review, ReviewTable};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Reviews shown per work.
pub const MAX_REVIEWS_SHOWN: usize = 2;
/// Characters of review text kept in an excerpt.
pub const EXCERPT_CHARS: usize = 400;
pub const NO_REVIEW_TEXT: &str = "No review text available.";
pub const ELLIPSIS: &str = "...";

/// Sampled reviews for one work.
#[derive(Debug, Clone, Default)]
pub struct ReviewSelection<'a> {
    pub reviews: Vec<&'a Review>,
    /// Eligible reviews before sampling.
    pub available: usize,
}

/// Pick up to two reviews of `work_id` uniformly at random.
///
/// With `exclude_spoilers`, spoiler reviews are removed before sampling.
/// No review table at all yields an empty selection.
pub fn select_reviews<'a, R: Rng + ?Sized>(
    reviews: Option<&'a ReviewTable>,
    work_id: i64,
    exclude_spoilers: bool,
    rng: &mut R,
) -> ReviewSelection<'a> {
    let Some(table) = reviews else {
        return ReviewSelection::default();
    };

    let eligible: Vec<&Review> = table
        .for_work(work_id)
        .filter(|r| !exclude_spoilers || !is_spoiler(r.review_text.as_deref()))
        .collect();

    let amount = MAX_REVIEWS_SHOWN.min(eligible.len());
    ReviewSelection {
        reviews: eligible.choose_multiple(rng, amount).copied().collect(),
        available: eligible.len(),
    }
}

/// A review ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewExcerpt {
    pub text: String,
    pub rating: u8,
    /// Positive helpful-vote count; `None` when zero or unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helpful_votes: Option<u64>,
    pub truncated: bool,
}

impl ReviewExcerpt {
    /// Redact (when asked), then truncate to 400 characters and flatten
    /// newlines.
    pub fn from_review(review: &Review, mask_profanity: bool) -> Self {
        let (text, truncated) = match review.review_text.as_deref() {
            None => (NO_REVIEW_TEXT.to_string(), false),
            Some(body) => {
                let clean = if mask_profanity {
                    redact_profanity(body)
                } else {
                    body.to_string()
                };
                let (head, truncated) = truncate_chars(&clean, EXCERPT_CHARS);
                let mut text = head.replace('\n', " ");
                if truncated {
                    text.push_str(ELLIPSIS);
                }
                (text, truncated)
            }
        };

        Self {
            text,
            rating: review.rating,
            helpful_votes: review.n_votes.filter(|&n| n > 0),
            truncated,
        }
    }

    /// Rating line, with the vote count only when there is one.
    pub fn caption(&self) -> String {
        match self.helpful_votes {
            Some(n) => format!("Rating: {}/5 | {} helpful votes", self.rating, n),
            None => format!("Rating: {}/5", self.rating),
        }
    }
}

/// First `max` characters of `text`, and whether anything was cut.
pub(crate) fn truncate_chars(text: &str, max: usize) -> (&str, bool) {
    match text.char_indices().nth(max) {
        Some((idx, _)) => (&text[..idx], true),
        None => (text, false),
    }
}
