//! Money amount parsing shared by the question parser.
//!
//! Accepts Indian-style shorthand: `50k`, `50,000`, `1.5 lakh`, `100000`.

use regex::Regex;
use std::sync::OnceLock;

/// Scale a raw number by its unit suffix. No unit means the number is
/// already in whole currency units. Results truncate toward zero.
#[must_use]
pub fn scale(num: f64, unit: Option<&str>) -> i64 {
    let factor = match unit {
        Some("lakh" | "lac") => 100_000.0,
        Some("k" | "thousand") => 1_000.0,
        _ => 1.0,
    };
    (num * factor) as i64
}

/// First number in the text, with optional comma grouping and unit suffix.
/// Used for cue-less fee phrasing like "tuition 50,000" or "fee of 1.5 lakh".
#[must_use]
pub fn parse_bare_amount(text: &str) -> Option<i64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(\d[\d,]*(?:\.\d+)?)\s*(lakh|lac|k|thousand)?\b")
            .expect("Invalid regex pattern defined in code")
    });

    let caps = re.captures(text)?;
    let raw = caps.get(1)?.as_str().replace(',', "");
    let num = raw.parse::<f64>().ok()?;
    Some(scale(num, caps.get(2).map(|m| m.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_units() {
        assert_eq!(scale(50.0, Some("k")), 50_000);
        assert_eq!(scale(1.5, Some("lakh")), 150_000);
        assert_eq!(scale(2.0, Some("lac")), 200_000);
        assert_eq!(scale(30.0, Some("thousand")), 30_000);
        assert_eq!(scale(75_000.0, None), 75_000);
    }

    #[test]
    fn parses_bare_amounts() {
        assert_eq!(parse_bare_amount("tuition 50,000 max"), Some(50_000));
        assert_eq!(parse_bare_amount("fee of 1.5 lakh"), Some(150_000));
        assert_eq!(parse_bare_amount("around 30k"), Some(30_000));
        assert_eq!(parse_bare_amount("no numbers here"), None);
    }
}
