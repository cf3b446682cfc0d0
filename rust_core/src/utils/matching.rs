//! Text helpers for team-name comparison.
//!
//! Normalization treats `-`, `/` and `_` as word breaks instead of stripping
//! them with the rest of the punctuation, so "Blue-Devils" and "Blue Devils"
//! compare equal and hyphenated spreads split off from team names.

/// Normalize a string for comparison.
///
/// Lowercases, drops punctuation, treats `-`, `/` and `_` as word breaks,
/// then trims and collapses runs of whitespace to a single space.
/// "St. John's (NY)" -> "st johns ny", "Blue-Devils" -> "blue devils".
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                Some(c)
            } else if matches!(c, '-' | '/' | '_') {
                Some(' ')
            } else {
                None
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if normalized `text` contains normalized `phrase` as whole words
/// (not a substring of another word).
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    let text_words: Vec<&str> = text.split_whitespace().collect();
    let phrase_words: Vec<&str> = phrase.split_whitespace().collect();

    if phrase_words.is_empty() || phrase_words.len() > text_words.len() {
        return false;
    }

    text_words
        .windows(phrase_words.len())
        .any(|window| window == phrase_words.as_slice())
}

/// Length in characters, which is what thresholds are expressed in.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_case_and_punctuation() {
        assert_eq!(normalize("Duke Blue Devils"), "duke blue devils");
        assert_eq!(normalize("St. John's (NY)"), "st johns ny");
        assert_eq!(normalize("Texas A&M"), "texas am");
        assert_eq!(normalize("L.A. Lakers"), "la lakers");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize("  Golden   State\tWarriors \n"), "golden state warriors");
        assert_eq!(normalize("Miami-Dade/FL"), "miami dade fl");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("..."), "");
    }

    #[test]
    fn test_normalize_keeps_digits_and_accents() {
        assert_eq!(normalize("Philadelphia 76ers"), "philadelphia 76ers");
        assert_eq!(normalize("San José State"), "san josé state");
    }

    #[test]
    fn test_contains_phrase_word_aligned() {
        assert!(contains_phrase("pittsburgh steelers", "steelers"));
        assert!(contains_phrase("new york giants ml", "new york giants"));
        assert!(!contains_phrase("tennessee titans", "ne"));
        assert!(!contains_phrase("steelers", "pittsburgh steelers"));
        assert!(!contains_phrase("anything", ""));
    }

    #[test]
    fn test_char_len_counts_chars() {
        assert_eq!(char_len("josé"), 4);
    }
}
