//! Cache-key composition.
//!
//! Keys start with a namespace prefix so a whole namespace can be dropped
//! with one prefix scan. Everything after the prefix is derived from
//! canonical serializations, so key order of the inputs never matters.

use crate::models::filter::FilterSet;

pub const COURSES_PREFIX: &str = "courses:";
pub const META_KEY: &str = "meta";
pub const ASK_PREFIX: &str = "ask:";
pub const COMPARE_PREFIX: &str = "compare:";

/// Every namespace invalidated on catalog mutation.
pub const ALL_NAMESPACES: [&str; 4] = [COURSES_PREFIX, META_KEY, ASK_PREFIX, COMPARE_PREFIX];

#[must_use]
pub fn courses_key(filter: &FilterSet, page: u64, page_size: u64) -> String {
    format!(
        "{COURSES_PREFIX}{}:p{page}:s{page_size}",
        filter.canonical_json()
    )
}

#[must_use]
pub fn ask_key(question: &str) -> String {
    format!("{ASK_PREFIX}{}", question.trim().to_lowercase())
}

/// Ids are sorted so that "9,7" and "7,9" share an entry.
#[must_use]
pub fn compare_key(ids: &[i32]) -> String {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    let joined = sorted
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("{COMPARE_PREFIX}{joined}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::filter::Level;

    #[test]
    fn courses_key_is_deterministic() {
        let a = FilterSet {
            department: Some("CS".to_string()),
            level: Some(Level::Ug),
            ..Default::default()
        };
        let b = FilterSet {
            level: Some(Level::Ug),
            department: Some("CS".to_string()),
            ..Default::default()
        };
        assert_eq!(courses_key(&a, 1, 10), courses_key(&b, 1, 10));
        assert!(courses_key(&a, 1, 10).starts_with(COURSES_PREFIX));
    }

    #[test]
    fn compare_key_sorts_ids() {
        assert_eq!(compare_key(&[9, 7]), compare_key(&[7, 9]));
        assert_eq!(compare_key(&[7, 9]), "compare:7,9");
    }

    #[test]
    fn ask_key_normalizes_question() {
        assert_eq!(ask_key("  Show CS Courses "), ask_key("show cs courses"));
    }
}
