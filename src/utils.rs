//! Utility functions for the ranking engine

use chrono::{DateTime, Utc};

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Normalize a category filter: `None`, `""` and `"all"` mean unrestricted
pub fn normalize_category(category: Option<&str>) -> Option<String> {
    match category {
        Some(c) if !c.is_empty() && c != "all" => Some(c.to_string()),
        _ => None,
    }
}

/// Length of comment content after trimming, in characters
pub fn trimmed_char_count(content: &str) -> usize {
    content.trim().chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category(None), None);
        assert_eq!(normalize_category(Some("")), None);
        assert_eq!(normalize_category(Some("all")), None);
        assert_eq!(
            normalize_category(Some("infrastructure")),
            Some("infrastructure".to_string())
        );
    }

    #[test]
    fn test_trimmed_char_count() {
        assert_eq!(trimmed_char_count("   "), 0);
        assert_eq!(trimmed_char_count("  hi  "), 2);
        assert_eq!(trimmed_char_count("héllo"), 5);
    }
}
