//! Free-text question parsing.
//!
//! Maps a natural-language question onto a [`FilterSet`] through a fixed,
//! ordered sequence of pattern rules. Parsing never fails: unmatched text
//! simply produces fewer dimensions. Identical input always yields an
//! identical result.
//!
//! Enum lookups (level, delivery mode, department) pick the *first* matching
//! entry in table-definition order; table order is the tie-break when a
//! question mentions several synonyms.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::filter::{DeliveryMode, FilterSet, Level};
use crate::parser::amount;

const LEVEL_TABLE: &[(&str, Level)] = &[
    ("ug", Level::Ug),
    ("undergrad", Level::Ug),
    ("undergraduate", Level::Ug),
    ("bachelor", Level::Ug),
    ("pg", Level::Pg),
    ("postgrad", Level::Pg),
    ("postgraduate", Level::Pg),
    ("masters", Level::Pg),
    ("master", Level::Pg),
];

const DELIVERY_TABLE: &[(&str, DeliveryMode)] = &[
    ("online", DeliveryMode::Online),
    ("offline", DeliveryMode::Offline),
    ("on campus", DeliveryMode::Offline),
    ("on-campus", DeliveryMode::Offline),
    ("hybrid", DeliveryMode::Hybrid),
    ("blended", DeliveryMode::Hybrid),
];

/// Closed department vocabulary. Unrecognized names never populate the
/// department dimension.
const DEPARTMENT_TABLE: &[(&str, &str)] = &[
    ("cs", "CS"),
    ("computer", "CS"),
    ("computing", "CS"),
    ("ai", "CS"),
    ("math", "Math"),
    ("mathematics", "Math"),
    ("statistics", "Math"),
    ("economics", "Economics"),
    ("business", "Business"),
    ("management", "Business"),
    ("finance", "Business"),
    ("accounting", "Business"),
    ("psychology", "Psychology"),
    ("cognitive", "Psychology"),
    ("biology", "Biology"),
    ("chemistry", "Chemistry"),
    ("physics", "Physics"),
    ("philosophy", "Philosophy"),
    ("humanities", "Humanities"),
    ("sociology", "Sociology"),
    ("anthropology", "Anthropology"),
    ("political science", "Political Science"),
    ("politics", "Political Science"),
];

/// Parse a question into a filter set. Deterministic, no side effects.
#[must_use]
pub fn parse_question(question: &str) -> FilterSet {
    let lowered = question.to_lowercase();
    let text = lowered.trim();

    let mut out = FilterSet::default();

    if let Some(fee) = extract_max_fee(text) {
        out.max_fee = i32::try_from(fee).ok();
    }

    let (min_rating, max_rating) = extract_rating_bounds(text);
    out.min_rating = min_rating;
    out.max_rating = max_rating;

    out.level = first_match(level_regexes(), text);
    out.delivery_mode = first_match(delivery_regexes(), text);
    out.department = first_match(department_regexes(), text).map(str::to_string);

    let (min_credits, max_credits) = extract_credit_bounds(text);
    out.min_credits = min_credits;
    out.max_credits = max_credits;

    let (min_weeks, max_weeks) = extract_duration_bounds(text);
    out.min_duration_weeks = min_weeks;
    out.max_duration_weeks = max_weeks;

    out.year = extract_year(text);

    // Fallback substring search, only when the closed vocabulary gave us
    // nothing to filter the department on.
    if out.department.is_none() {
        out.q = extract_topic(text);
    }

    out
}

fn get_regex(re: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    re.get_or_init(|| Regex::new(pattern).expect("Invalid regex pattern defined in code"))
}

/// Compile a synonym table into whole-word regexes once. Word boundaries
/// keep e.g. "ai" from matching inside unrelated words.
fn word_regexes<T: Copy>(table: &[(&str, T)]) -> Vec<(Regex, T)> {
    table
        .iter()
        .map(|&(synonym, value)| {
            let pattern = format!(r"\b{synonym}\b");
            (
                Regex::new(&pattern).expect("Invalid regex pattern defined in code"),
                value,
            )
        })
        .collect()
}

fn level_regexes() -> &'static [(Regex, Level)] {
    static RES: OnceLock<Vec<(Regex, Level)>> = OnceLock::new();
    RES.get_or_init(|| word_regexes(LEVEL_TABLE))
}

fn delivery_regexes() -> &'static [(Regex, DeliveryMode)] {
    static RES: OnceLock<Vec<(Regex, DeliveryMode)>> = OnceLock::new();
    RES.get_or_init(|| word_regexes(DELIVERY_TABLE))
}

fn department_regexes() -> &'static [(Regex, &'static str)] {
    static RES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RES.get_or_init(|| word_regexes(DEPARTMENT_TABLE))
}

fn first_match<T: Copy>(regexes: &[(Regex, T)], text: &str) -> Option<T> {
    regexes
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|&(_, value)| value)
}

/// A number right after the cue that belongs to a different dimension.
fn trailing_dimension_noun(rest: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    get_regex(&RE, r"^\s*(?:weeks?|credits?|stars?|rating|rated)\b").is_match(rest)
}

fn leading_rating_context(before: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    get_regex(&RE, r"(?:rating|rated)\s*$").is_match(before)
}

/// Fee cap: "under 50k", "below 1.5 lakh", "less than 40000". Without a cue
/// phrase, a bare number is accepted only when the text talks about money.
fn extract_max_fee(text: &str) -> Option<i64> {
    static CUE_RE: OnceLock<Regex> = OnceLock::new();
    static MONEY_WORD_RE: OnceLock<Regex> = OnceLock::new();

    let cue_re = get_regex(
        &CUE_RE,
        r"(?:under|below|less than|<=|<)\s*(\d[\d,]*(?:\.\d+)?)\s*(lakh|lac|k|thousand)?\b",
    );

    for caps in cue_re.captures_iter(text) {
        let whole = caps.get(0)?;
        let raw = caps.get(1)?.as_str().replace(',', "");
        let num = raw.parse::<f64>().ok()?;

        if let Some(unit) = caps.get(2) {
            // An explicit money unit is unambiguous.
            return Some(amount::scale(num, Some(unit.as_str())));
        }
        // A unit-less number may be a bound on another dimension
        // ("under 12 weeks", "rating less than 4"); skip those candidates.
        if trailing_dimension_noun(&text[whole.end()..])
            || leading_rating_context(&text[..whole.start()])
        {
            continue;
        }
        return Some(amount::scale(num, None));
    }

    let money_word_re = get_regex(&MONEY_WORD_RE, r"\b(?:fees?|tuition|cost|price)\b");
    if money_word_re.is_match(text) {
        return amount::parse_bare_amount(text);
    }
    None
}

/// Rating bounds. Both bounds may come out of a single question. A bare
/// number adjacent to rating/rated with no comparator counts as a minimum
/// ("rating 4" means 4 and above); this default-above tie-break matches the
/// catalog's historical behavior.
fn extract_rating_bounds(text: &str) -> (Option<f32>, Option<f32>) {
    static MAX_AFTER: OnceLock<Regex> = OnceLock::new();
    static MAX_BEFORE: OnceLock<Regex> = OnceLock::new();
    static MIN_AFTER: OnceLock<Regex> = OnceLock::new();
    static MIN_BEFORE: OnceLock<Regex> = OnceLock::new();
    static MIN_PLUS: OnceLock<Regex> = OnceLock::new();

    let max_patterns = [
        get_regex(
            &MAX_AFTER,
            r"(?:rating|rated)\s*(?:<=|under|below|less than)\s*(\d(?:\.\d)?)",
        ),
        get_regex(
            &MAX_BEFORE,
            r"(?:<=|under|below|less than)\s*(\d(?:\.\d)?)\s*(?:rating|rated)",
        ),
    ];
    let min_patterns = [
        get_regex(
            &MIN_AFTER,
            r"(?:rating|rated)\s*(?:>=|at least|above)?\s*(\d(?:\.\d)?)",
        ),
        get_regex(
            &MIN_BEFORE,
            r"(?:>=|at least|above)\s*(\d(?:\.\d)?)\s*\+?\s*(?:rating|rated)",
        ),
        get_regex(&MIN_PLUS, r"(\d(?:\.\d)?)\s*\+\s*(?:rating|rated)"),
    ];

    let max_rating = first_capture_f32(&max_patterns, text);
    let min_rating = first_capture_f32(&min_patterns, text);

    (min_rating, max_rating)
}

fn first_capture_f32(patterns: &[&Regex], text: &str) -> Option<f32> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    })
}

fn first_capture_i32(patterns: &[&Regex], text: &str) -> Option<i32> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    })
}

fn extract_credit_bounds(text: &str) -> (Option<i32>, Option<i32>) {
    static MIN_A: OnceLock<Regex> = OnceLock::new();
    static MIN_B: OnceLock<Regex> = OnceLock::new();
    static MAX_A: OnceLock<Regex> = OnceLock::new();
    static MAX_B: OnceLock<Regex> = OnceLock::new();

    let min = first_capture_i32(
        &[
            get_regex(&MIN_A, r"(?:at least|min|>=)\s*(\d+)\s*credits?\b"),
            get_regex(&MIN_B, r"credits?\s*(?:>=|at least|min)\s*(\d+)"),
        ],
        text,
    );
    let max = first_capture_i32(
        &[
            get_regex(&MAX_A, r"(?:under|less than|<=)\s*(\d+)\s*credits?\b"),
            get_regex(&MAX_B, r"credits?\s*(?:<=|under|less than)\s*(\d+)"),
        ],
        text,
    );
    (min, max)
}

fn extract_duration_bounds(text: &str) -> (Option<i32>, Option<i32>) {
    static MIN_A: OnceLock<Regex> = OnceLock::new();
    static MIN_B: OnceLock<Regex> = OnceLock::new();
    static MAX_A: OnceLock<Regex> = OnceLock::new();
    static MAX_B: OnceLock<Regex> = OnceLock::new();

    let min = first_capture_i32(
        &[
            get_regex(&MIN_A, r"(?:at least|min|>=)\s*(\d+)\s*weeks?\b"),
            get_regex(&MIN_B, r"weeks?\s*(?:>=|at least|min)\s*(\d+)"),
        ],
        text,
    );
    let max = first_capture_i32(
        &[
            get_regex(&MAX_A, r"(?:under|less than|<=)\s*(\d+)\s*weeks?\b"),
            get_regex(&MAX_B, r"weeks?\s*(?:<=|under|less than)\s*(\d+)"),
        ],
        text,
    );
    (min, max)
}

fn extract_year(text: &str) -> Option<i32> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = get_regex(&RE, r"(?:year|offered)\s*(?:in\s+)?(\d{4})\b");
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Trailing "about/on/for <topic>" clause, captured verbatim (trimmed) as a
/// name substring filter.
fn extract_topic(text: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = get_regex(&RE, r"(?:about|on|for)\s+([a-z][a-z ]{2,})$");
    let trimmed = text.trim_end_matches(['?', '.', '!']).trim_end();
    re.captures(trimmed)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cs_under_50k() {
        let f = parse_question("Show CS courses under 50k");
        assert_eq!(f.department.as_deref(), Some("CS"));
        assert_eq!(f.max_fee, Some(50_000));
        assert_eq!(f.level, None);
        assert_eq!(f.q, None);
    }

    #[test]
    fn rating_above_four() {
        let f = parse_question("rating above 4");
        assert_eq!(f.min_rating, Some(4.0));
        assert_eq!(f.max_rating, None);
        assert_eq!(f.max_fee, None);
    }

    #[test]
    fn pg_credits_and_duration() {
        let f = parse_question("PG courses, at least 4 credits, under 12 weeks");
        assert_eq!(f.level, Some(Level::Pg));
        assert_eq!(f.min_credits, Some(4));
        assert_eq!(f.max_duration_weeks, Some(12));
        assert_eq!(f.max_fee, None, "duration bound must not leak into fee");
    }

    #[test]
    fn parsing_is_idempotent() {
        let q = "online masters in economics rated 4.5+ under 1 lakh";
        assert_eq!(parse_question(q), parse_question(q));
    }

    #[test]
    fn combined_question() {
        let f = parse_question("online masters in economics rated 4.5+ under 1 lakh");
        assert_eq!(f.delivery_mode, Some(DeliveryMode::Online));
        assert_eq!(f.level, Some(Level::Pg));
        assert_eq!(f.department.as_deref(), Some("Economics"));
        assert_eq!(f.min_rating, Some(4.5));
        assert_eq!(f.max_fee, Some(100_000));
    }

    #[test]
    fn rating_less_than_is_a_maximum() {
        let f = parse_question("courses with rating less than 4");
        assert_eq!(f.max_rating, Some(4.0));
        assert_eq!(f.min_rating, None);
        assert_eq!(f.max_fee, None, "rating bound must not leak into fee");
    }

    #[test]
    fn both_rating_bounds_from_one_question() {
        let f = parse_question("rating above 3 but rated under 4.5");
        assert_eq!(f.min_rating, Some(3.0));
        assert_eq!(f.max_rating, Some(4.5));
    }

    #[test]
    fn bare_rating_number_defaults_to_minimum() {
        let f = parse_question("courses with rating 4");
        assert_eq!(f.min_rating, Some(4.0));
        assert_eq!(f.max_rating, None);
    }

    #[test]
    fn bare_fee_needs_money_context() {
        assert_eq!(parse_question("tuition 30000").max_fee, Some(30_000));
        assert_eq!(parse_question("fee of 1.5 lakh").max_fee, Some(150_000));
        assert_eq!(parse_question("30000 is a big number").max_fee, None);
    }

    #[test]
    fn whole_word_department_matching() {
        assert_eq!(parse_question("ai courses").department.as_deref(), Some("CS"));
        // "training" contains "ai" but must not match.
        let f = parse_question("training programs");
        assert_eq!(f.department, None);
        // "maths" is not a whole-word "math".
        assert_eq!(parse_question("maths adjacent").department, None);
    }

    #[test]
    fn first_table_entry_wins() {
        // "cs" precedes "business" in the table, and table order decides.
        let f = parse_question("cs for business people");
        assert_eq!(f.department.as_deref(), Some("CS"));
    }

    #[test]
    fn delivery_synonyms() {
        assert_eq!(
            parse_question("on-campus lectures").delivery_mode,
            Some(DeliveryMode::Offline)
        );
        assert_eq!(
            parse_question("blended learning").delivery_mode,
            Some(DeliveryMode::Hybrid)
        );
    }

    #[test]
    fn year_adjacent_to_offered() {
        assert_eq!(parse_question("courses offered in 2024").year, Some(2024));
        assert_eq!(parse_question("year 2023 catalog").year, Some(2023));
        assert_eq!(parse_question("room 1024").year, None);
    }

    #[test]
    fn topic_fallback_only_without_department() {
        let f = parse_question("courses about machine learning?");
        assert_eq!(f.department, None);
        assert_eq!(f.q.as_deref(), Some("machine learning"));

        let f = parse_question("CS courses about robotics");
        assert_eq!(f.department.as_deref(), Some("CS"));
        assert_eq!(f.q, None);
    }

    #[test]
    fn unmatched_text_yields_empty_set() {
        assert!(parse_question("hello there").is_empty());
    }
}
