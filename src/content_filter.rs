//! # Feature: Content Filter
//!
//! Blocks requests for explicit content before any intent matching runs.
//! Matching is case-insensitive substring search against a fixed deny-list.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release with explicit-content keyword list

/// Explicit-content keywords that short-circuit the pipeline.
/// Matched case-insensitively using substring matching.
const PROHIBITED_KEYWORDS: &[&str] = &[
    "porn", "porno", "pornography", "xxx", "nsfw",
    "nude", "nudes", "naked",
    "sex video", "sex tape", "sexual video",
    "erotic", "erotica",
    "adult video", "adult movie", "adult film",
    "explicit video", "explicit content",
    "hentai", "x-rated", "x rated",
];

/// The fixed reply for filtered requests.
pub const DECLINE_REPLY: &str =
    "I can't help with that kind of content. Let's keep things family-friendly!";

/// Check whether the text asks for explicit content.
pub fn contains_prohibited(text: &str) -> bool {
    let lowercase_text = text.to_lowercase();
    PROHIBITED_KEYWORDS
        .iter()
        .any(|&keyword| lowercase_text.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_passes() {
        assert!(!contains_prohibited("tell me a joke"));
        assert!(!contains_prohibited("play video of cute cats"));
        assert!(!contains_prohibited("remind me to call mom at 9am"));
    }

    #[test]
    fn test_prohibited_keywords_trigger() {
        assert!(contains_prohibited("show me porn"), "plain keyword should trigger");
        assert!(contains_prohibited("play a sex video"), "phrase keyword should trigger");
        assert!(contains_prohibited("find NSFW pictures"), "matching is case-insensitive");
    }

    #[test]
    fn test_filter_wins_over_media_intents() {
        // "video" alone is a legitimate intent trigger; the filter must catch
        // the prohibited phrase before routing ever sees it.
        let utterance = "play adult video for me";
        assert!(contains_prohibited(utterance));
    }
}
