// Case-insensitive string helpers shared by filtering and ranking
use regex::RegexBuilder;

/// Case-insensitive substring test
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Byte span of the first case-insensitive occurrence of `needle` in
/// `haystack`. Offsets refer to the original `haystack`, even when
/// lower-casing would change byte lengths.
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
        .ok()?
        .find(haystack)
        .map(|m| (m.start(), m.end()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Q4 Roadmap review", "roadmap"));
        assert!(contains_ignore_case("api", "API"));
        assert!(!contains_ignore_case("budget", "hiring"));
    }

    #[test]
    fn test_find_ignore_case() {
        assert_eq!(find_ignore_case("The API is ready", "api"), Some((4, 7)));
        assert_eq!(find_ignore_case("cost: $5 (approx)", "(approx)"), Some((9, 17)));
        assert_eq!(find_ignore_case("nothing here", "api"), None);
        assert_eq!(find_ignore_case("anything", ""), None);
    }

    #[test]
    fn test_find_keeps_original_offsets() {
        // 'İ' lower-cases to two chars; offsets must still index the original
        let text = "İstanbul roadmap";
        let (start, end) = find_ignore_case(text, "roadmap").unwrap();
        assert_eq!(&text[start..end], "roadmap");
    }
}
