use crate::types::KeywordSet;

/// Returns the keywords that occur in `text`, in keyword-set order.
///
/// Matching is case-insensitive substring containment on lower-cased copies.
/// Keywords are tested independently, so overlapping keywords (e.g. "cat"
/// and "category") are each reported when present. Empty text, an empty set,
/// or a stray empty keyword all yield no matches.
pub fn find_matches<'k>(text: &str, keywords: &'k KeywordSet) -> Vec<&'k str> {
    if text.is_empty() || keywords.is_empty() {
        return Vec::new();
    }

    let lowered = text.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| !keyword.is_empty() && lowered.contains(&keyword.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(entries: &[&str]) -> KeywordSet {
        KeywordSet::new(entries.iter().copied())
    }

    #[test]
    fn test_case_insensitive() {
        let set = keywords(&["urgent", "sale"]);
        let text = "Urgent SALE today";
        let matched = find_matches(text, &set);
        assert_eq!(matched, vec!["urgent", "sale"]);

        // Upper-casing the text does not change which keywords match
        let upper = text.to_uppercase();
        assert_eq!(find_matches(&upper, &set), matched);
    }

    #[test]
    fn test_empty_inputs() {
        let set = keywords(&["urgent"]);
        assert!(find_matches("", &set).is_empty());
        assert!(find_matches("some text", &KeywordSet::default()).is_empty());
    }

    #[test]
    fn test_overlapping_keywords_each_reported() {
        let set = keywords(&["cat", "category"]);
        assert_eq!(
            find_matches("new category added", &set),
            vec!["cat", "category"]
        );
    }

    #[test]
    fn test_no_match() {
        let set = keywords(&["urgent"]);
        assert!(find_matches("nothing interesting here", &set).is_empty());
    }

    #[test]
    fn test_substring_inside_word() {
        let set = keywords(&["sale"]);
        assert_eq!(find_matches("wholesaler news", &set), vec!["sale"]);
    }

    #[test]
    fn test_result_follows_keyword_order() {
        let set = keywords(&["zebra", "alpha"]);
        assert_eq!(
            find_matches("alpha then zebra", &set),
            vec!["zebra", "alpha"]
        );
    }
}
