//! Redaction protocol — spoiler detection and profanity masking.
//!
//! Both transforms are stateless. Spoiler detection decides whether a
//! review may be shown at all; profanity masking rewrites text without
//! changing its length, so later truncation lines up with the original.

pub mod profanity;
pub mod spoiler;

pub use profanity::{find_profanity, redact_profanity, ProfanityMatch, DENYLIST, MASK_CHAR};
pub use spoiler::{is_spoiler, SPOILER_MARKER, SPOILER_PHRASE};
