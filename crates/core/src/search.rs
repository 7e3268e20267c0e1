//! Record filtering and listing helpers.
//!
//! This module lives in `core` (zero internal deps) so the filter
//! semantics can be unit-tested without a database and reused by any
//! future CLI or worker tooling.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of records per listing page.
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// Maximum number of records per listing page.
pub const MAX_PAGE_LIMIT: i64 = 500;

/// Clamp a user-provided limit into `[1, max]`, falling back to the default.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Record filter
// ---------------------------------------------------------------------------

/// Optional criteria for narrowing a record listing.
///
/// All provided criteria combine with logical AND; an empty filter
/// matches every record. Applying the filter to a collection never
/// reorders it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordFilter {
    /// Inclusive lower age bound.
    pub min_age: Option<i32>,
    /// Inclusive upper age bound.
    pub max_age: Option<i32>,
    /// Case-insensitive name substring.
    pub name: Option<String>,
}

impl RecordFilter {
    /// Whether no criteria were provided.
    pub fn is_empty(&self) -> bool {
        self.min_age.is_none() && self.max_age.is_none() && self.name.is_none()
    }

    /// Whether a record with this name and age satisfies every provided
    /// criterion.
    pub fn matches(&self, name: &str, age: i32) -> bool {
        if let Some(min) = self.min_age {
            if age < min {
                return false;
            }
        }
        if let Some(max) = self.max_age {
            if age > max {
                return false;
            }
        }
        if let Some(needle) = &self.name {
            if !name.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(min_age: Option<i32>, max_age: Option<i32>, name: Option<&str>) -> RecordFilter {
        RecordFilter {
            min_age,
            max_age,
            name: name.map(String::from),
        }
    }

    // -- clamp tests --

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None, 100, 500), 100);
        assert_eq!(clamp_limit(Some(50), 100, 500), 50);
        assert_eq!(clamp_limit(Some(9999), 100, 500), 500);
        assert_eq!(clamp_limit(Some(0), 100, 500), 1);
        assert_eq!(clamp_limit(Some(-3), 100, 500), 1);
    }

    #[test]
    fn test_clamp_offset() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(25)), 25);
        assert_eq!(clamp_offset(Some(-1)), 0);
    }

    // -- matches tests --

    #[test]
    fn test_empty_filter_matches_everything() {
        let f = RecordFilter::default();
        assert!(f.is_empty());
        assert!(f.matches("anyone", 0));
        assert!(f.matches("", 120));
    }

    #[test]
    fn test_age_window_combines_bounds() {
        let f = filter(Some(10), Some(30), None);
        let matching: Vec<i32> = [5, 20, 40]
            .into_iter()
            .filter(|&age| f.matches("x", age))
            .collect();
        assert_eq!(matching, vec![20]);
    }

    #[test]
    fn test_age_bounds_are_inclusive() {
        let f = filter(Some(10), Some(30), None);
        assert!(f.matches("x", 10));
        assert!(f.matches("x", 30));
        assert!(!f.matches("x", 9));
        assert!(!f.matches("x", 31));
    }

    #[test]
    fn test_name_substring_is_case_insensitive() {
        let f = filter(None, None, Some("Al"));
        assert!(f.matches("Alice", 30));
        assert!(!f.matches("bob", 30));

        let f = filter(None, None, Some("ALICE"));
        assert!(f.matches("alice", 30));
    }

    #[test]
    fn test_all_criteria_and_combine() {
        let f = filter(Some(18), Some(65), Some("ann"));
        assert!(f.matches("Annette", 30));
        assert!(!f.matches("Annette", 70)); // name ok, age out
        assert!(!f.matches("Bob", 30)); // age ok, name out
    }

    #[test]
    fn test_filtering_preserves_order() {
        let records = vec![("Gerald", 25), ("Al", 30), ("Bob", 28), ("alison", 22)];
        let f = filter(None, None, Some("al"));
        let kept: Vec<&str> = records
            .iter()
            .filter(|(name, age)| f.matches(name, *age))
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(kept, vec!["Gerald", "Al", "alison"]);
    }
}
