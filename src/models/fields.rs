//! Decoding helpers for the field shapes the ERP returns.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A foreign reference plus its display label.
///
/// The remote sends `[id, "label"]`; this type always serializes as
/// `{"id": .., "label": ..}` and accepts both forms when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefPair {
    pub id: i64,
    pub label: String,
}

impl RefPair {
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

impl<'de> Deserialize<'de> for RefPair {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Pair(i64, String),
            Object { id: i64, label: String },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Pair(id, label) | Repr::Object { id, label } => Ok(RefPair { id, label }),
        }
    }
}

/// Timestamp in the ERP's `YYYY-MM-DD HH:MM:SS` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OdooDateTime(pub NaiveDateTime);

impl OdooDateTime {
    pub const FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(raw, Self::FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .map(OdooDateTime)
    }
}

impl fmt::Display for OdooDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl Serialize for OdooDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OdooDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        OdooDateTime::parse(&raw)
            .map_err(|e| de::Error::custom(format!("invalid timestamp `{}`: {}", raw, e)))
    }
}

/// Deserialize an optional field where the ERP writes `false` for "empty".
///
/// Use with `#[serde(default, deserialize_with = "falsy::deserialize")]`.
pub mod falsy {
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Falsy<T> {
            Flag(bool),
            Value(T),
        }

        match Option::<Falsy<T>>::deserialize(deserializer)? {
            None | Some(Falsy::Flag(false)) => Ok(None),
            Some(Falsy::Flag(true)) => Err(de::Error::custom("expected a value or `false`")),
            Some(Falsy::Value(value)) => Ok(Some(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "falsy::deserialize")]
        parent_id: Option<RefPair>,
        #[serde(default, deserialize_with = "falsy::deserialize")]
        work_email: Option<String>,
        #[serde(default, deserialize_with = "falsy::deserialize")]
        check_out: Option<OdooDateTime>,
    }

    #[test]
    fn test_ref_pair_from_remote_array() {
        let pair: RefPair = serde_json::from_value(json!([3, "Sales / EMEA"])).unwrap();
        assert_eq!(pair, RefPair::new(3, "Sales / EMEA"));
        assert_eq!(
            serde_json::to_value(&pair).unwrap(),
            json!({"id": 3, "label": "Sales / EMEA"})
        );
    }

    #[test]
    fn test_ref_pair_from_object() {
        let pair: RefPair = serde_json::from_value(json!({"id": 4, "label": "R&D"})).unwrap();
        assert_eq!(pair.id, 4);
    }

    #[test]
    fn test_false_means_absent() {
        let row: Row = serde_json::from_value(json!({
            "parent_id": false,
            "work_email": false,
            "check_out": false
        }))
        .unwrap();
        assert!(row.parent_id.is_none());
        assert!(row.work_email.is_none());
        assert!(row.check_out.is_none());

        let row: Row = serde_json::from_value(json!({})).unwrap();
        assert!(row.parent_id.is_none());
    }

    #[test]
    fn test_present_values_decode() {
        let row: Row = serde_json::from_value(json!({
            "parent_id": [1, "Company"],
            "work_email": "kim@example.com",
            "check_out": "2024-05-01 18:00:00"
        }))
        .unwrap();
        assert_eq!(row.parent_id.unwrap().label, "Company");
        assert_eq!(row.work_email.as_deref(), Some("kim@example.com"));
        assert_eq!(row.check_out.unwrap().to_string(), "2024-05-01 18:00:00");
    }

    #[test]
    fn test_true_is_rejected() {
        assert!(serde_json::from_value::<Row>(json!({"work_email": true})).is_err());
    }

    #[test]
    fn test_datetime_accepts_iso_form() {
        let ts = OdooDateTime::parse("2024-05-01T09:30:00").unwrap();
        assert_eq!(ts.to_string(), "2024-05-01 09:30:00");
    }
}
