use serde::{Deserialize, Serialize};

/// Course level. Stored as `UG`/`PG` in the database and on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "UG")]
    Ug,
    #[serde(rename = "PG")]
    Pg,
}

impl Level {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ug => "UG",
            Self::Pg => "PG",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    Online,
    Offline,
    Hybrid,
}

impl DeliveryMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Hybrid => "hybrid",
        }
    }
}

/// A set of recognized query dimensions. Absent dimensions impose no
/// constraint; all present dimensions compose conjunctively.
///
/// Fields are declared in alphabetical order and `None` fields are skipped,
/// so [`FilterSet::canonical_json`] yields a sorted-key serialization that is
/// stable regardless of how the set was assembled. Cache keys depend on this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_mode: Option<DeliveryMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_credits: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration_weeks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_credits: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_duration_weeks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl FilterSet {
    /// Canonical serialization used in cache keys. Two semantically equal
    /// filter sets always produce the same string.
    #[must_use]
    pub fn canonical_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.delivery_mode.is_none()
            && self.department.is_none()
            && self.level.is_none()
            && self.max_credits.is_none()
            && self.max_duration_weeks.is_none()
            && self.max_fee.is_none()
            && self.max_rating.is_none()
            && self.min_credits.is_none()
            && self.min_duration_weeks.is_none()
            && self.min_rating.is_none()
            && self.q.is_none()
            && self.year.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_json_is_stable() {
        let a = FilterSet {
            department: Some("CS".to_string()),
            max_fee: Some(50000),
            level: Some(Level::Ug),
            ..Default::default()
        };
        let b = FilterSet {
            level: Some(Level::Ug),
            department: Some("CS".to_string()),
            max_fee: Some(50000),
            ..Default::default()
        };
        assert_eq!(a.canonical_json(), b.canonical_json());
        assert_eq!(a.canonical_json(), a.canonical_json());
    }

    #[test]
    fn canonical_json_keys_are_sorted() {
        let f = FilterSet {
            department: Some("CS".to_string()),
            delivery_mode: Some(DeliveryMode::Online),
            ..Default::default()
        };
        assert_eq!(
            f.canonical_json(),
            r#"{"delivery_mode":"online","department":"CS"}"#
        );
    }

    #[test]
    fn canonical_json_skips_absent_dimensions() {
        let f = FilterSet {
            department: Some("Math".to_string()),
            ..Default::default()
        };
        assert_eq!(f.canonical_json(), r#"{"department":"Math"}"#);
        assert_eq!(FilterSet::default().canonical_json(), "{}");
    }

    #[test]
    fn enum_wire_format() {
        assert_eq!(serde_json::to_string(&Level::Pg).unwrap(), r#""PG""#);
        assert_eq!(
            serde_json::to_string(&DeliveryMode::Online).unwrap(),
            r#""online""#
        );
        let m: DeliveryMode = serde_json::from_str(r#""hybrid""#).unwrap();
        assert_eq!(m, DeliveryMode::Hybrid);
    }
}
