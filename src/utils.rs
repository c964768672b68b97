/// Collapse runs of whitespace (including newlines) into single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string to at most `max_chars` characters, appending "..." when shortened
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    // Count characters rather than bytes so multi-byte titles never split mid-codepoint
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  Senior   Engineer \n", "Senior Engineer")]
    #[case("\t\n", "")]
    #[case("Backend", "Backend")]
    fn test_collapse_whitespace(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(collapse_whitespace(input), expected);
    }

    #[rstest]
    #[case("short", 50, "short")]
    #[case("abcdef", 3, "abc...")]
    #[case("日本語テスト", 2, "日本...")]
    #[case("exact", 5, "exact")]
    fn test_truncate_with_ellipsis(
        #[case] input: &str,
        #[case] max: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(truncate_with_ellipsis(input, max), expected);
    }
}
