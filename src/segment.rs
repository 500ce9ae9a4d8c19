//! Text segmentation.
//!
//! Splits raw document text into the ordered paragraph units everything else
//! operates on. One paragraph per non-blank line, trimmed, original order kept.

/// Split document text into ordered, trimmed, non-empty paragraphs.
///
/// Pure function: empty input yields an empty vec, and re-running on the same
/// input always produces the same output.
pub fn segment(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_basic() {
        let text = "All data must be encrypted.\nShare passwords by email.";
        let paragraphs = segment(text);
        assert_eq!(
            paragraphs,
            vec!["All data must be encrypted.", "Share passwords by email."]
        );
    }

    #[test]
    fn test_segment_empty_input() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_segment_blank_lines_discarded() {
        let text = "first\n\n   \n\t\nsecond\n";
        assert_eq!(segment(text), vec!["first", "second"]);
    }

    #[test]
    fn test_segment_trims_whitespace() {
        let text = "  padded left\npadded right   \n\t both \t";
        assert_eq!(segment(text), vec!["padded left", "padded right", "both"]);
    }

    #[test]
    fn test_segment_preserves_order() {
        let text = "c\na\nb";
        assert_eq!(segment(text), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_segment_idempotent() {
        let text = "one\n\ntwo\nthree\n";
        assert_eq!(segment(text), segment(text));
    }

    #[test]
    fn test_segment_whitespace_only_input() {
        assert!(segment("\n\n   \n").is_empty());
    }
}
