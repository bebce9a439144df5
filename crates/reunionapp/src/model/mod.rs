//! # Domain Model: Documents and Records
//!
//! The store speaks in [`Document`]s: a store-assigned string id plus a flat
//! map of named JSON fields. That is all the persistence layer knows about.
//!
//! The rest of the crate speaks in typed records. Each record type implements
//! [`Record`], which names its [`Collection`] and exposes the `order` key used
//! for display sequencing. [`Stored<T>`] pairs a record with its id.
//!
//! ## Collections
//!
//! | Collection     | Record                               | Ordered |
//! |----------------|--------------------------------------|---------|
//! | `schedule`     | [`schedule::ScheduleEvent`]          | yes     |
//! | `improvements` | [`improvements::Improvement`]        | yes     |
//! | `glossary`     | [`glossary::GlossaryTerm`]           | no      |
//! | `magazine`     | [`magazine::MagazineSection`]        | yes     |
//!
//! ## Wire Shape
//!
//! Field names are camelCase (`targetDate`, `isHighlight`, `relatedTerms`), the
//! same shape the documents have always had in the store. Documents are
//! flattened on disk, so a stored magazine section looks like:
//!
//! ```text
//! { "id": "k3j2...", "title": "Greeting", "pages": 1.0, "order": 1, ... }
//! ```
//!
//! ## Partial Updates
//!
//! Updates never rewrite a whole record. Callers build a [`Fields`] patch with
//! only the changed keys (see [`patch`]) and the store merges it.

use crate::error::{ReunionError, Result};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub mod glossary;
pub mod improvements;
pub mod magazine;
pub mod schedule;

/// Field map of a stored document.
pub type Fields = serde_json::Map<String, Value>;

/// Name of the field carrying the display sequence.
pub const ORDER_FIELD: &str = "order";
pub const NOTES_FIELD: &str = "notes";

/// Wire format of every date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Schedule,
    Improvements,
    Glossary,
    Magazine,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Schedule,
        Collection::Improvements,
        Collection::Glossary,
        Collection::Magazine,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Schedule => "schedule",
            Collection::Improvements => "improvements",
            Collection::Glossary => "glossary",
            Collection::Magazine => "magazine",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = ReunionError;

    fn from_str(s: &str) -> Result<Self> {
        Collection::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ReunionError::Validation(format!("Unknown collection: {}", s)))
    }
}

/// A raw stored record: id plus named fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// The `order` key, if the document carries one.
    ///
    /// Whole-number floats are accepted since some writers emit `3.0`.
    pub fn order(&self) -> Option<i64> {
        self.fields.get(ORDER_FIELD).and_then(|v| {
            v.as_i64()
                .or_else(|| v.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
        })
    }

    /// Merge `patch` into this document. Keys not named in `patch` are untouched.
    pub fn merge(&mut self, patch: &Fields) {
        for (key, value) in patch {
            self.fields.insert(key.clone(), value.clone());
        }
    }
}

/// A typed record living in one collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const COLLECTION: Collection;

    fn order(&self) -> Option<i64> {
        None
    }

    fn set_order(&mut self, _order: i64) {}
}

/// A record with a free-text `notes` field, edited through draft buffers.
pub trait Annotated: Record {
    fn notes(&self) -> &str;
    fn set_notes(&mut self, notes: String);
}

/// A record together with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stored<T> {
    pub id: String,
    #[serde(flatten)]
    pub record: T,
}

impl<T: Record> Stored<T> {
    pub fn new(id: impl Into<String>, record: T) -> Self {
        Self {
            id: id.into(),
            record,
        }
    }

    pub fn from_document(doc: Document) -> Result<Self> {
        let record = serde_json::from_value(Value::Object(doc.fields))?;
        Ok(Self { id: doc.id, record })
    }
}

/// Serialize a record (or any struct) into a field map.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(ReunionError::Validation(format!(
            "Expected an object, got {}",
            other
        ))),
    }
}

/// Parse a calendar date given as `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| ReunionError::Validation(format!("Invalid date '{}' (expected YYYY-MM-DD)", s)))
}

/// Deserialize an optional `YYYY-MM-DD` date, reading blank or free text as `None`.
pub fn lenient_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()))
}

/// A single-field patch.
pub fn patch(key: &str, value: impl Into<Value>) -> Fields {
    let mut fields = Fields::new();
    fields.insert(key.to_string(), value.into());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, value: Value) -> Document {
        match value {
            Value::Object(fields) => Document::new(id, fields),
            _ => panic!("test documents must be objects"),
        }
    }

    #[test]
    fn order_reads_integers_and_whole_floats() {
        assert_eq!(doc("a", json!({"order": 3})).order(), Some(3));
        assert_eq!(doc("b", json!({"order": 4.0})).order(), Some(4));
        assert_eq!(doc("c", json!({"order": 4.5})).order(), None);
        assert_eq!(doc("d", json!({"title": "x"})).order(), None);
    }

    #[test]
    fn merge_only_touches_named_fields() {
        let mut d = doc("a", json!({"title": "Greeting", "pages": 1.0, "notes": "old"}));
        d.merge(&patch("notes", "new"));
        assert_eq!(d.fields["title"], json!("Greeting"));
        assert_eq!(d.fields["pages"], json!(1.0));
        assert_eq!(d.fields["notes"], json!("new"));
    }

    #[test]
    fn document_flattens_fields_on_the_wire() {
        let d = doc("abc", json!({"term": "OB", "category": "role"}));
        let text = serde_json::to_string(&d).unwrap();
        assert!(text.contains("\"id\":\"abc\""));
        assert!(text.contains("\"term\":\"OB\""));
        assert!(!text.contains("fields"));

        let back: Document = serde_json::from_str(&text).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn collection_names_parse_back() {
        for c in Collection::ALL {
            assert_eq!(c.name().parse::<Collection>().unwrap(), c);
        }
        assert!("nope".parse::<Collection>().is_err());
    }

    #[test]
    fn parse_date_accepts_iso_only() {
        assert_eq!(
            parse_date("2026-04-29").unwrap(),
            NaiveDate::from_ymd_opt(2026, 4, 29).unwrap()
        );
        assert!(parse_date("2026/04/29").is_err());
        assert!(parse_date("2026-02-30").is_err());
    }

    #[test]
    fn to_fields_rejects_non_objects() {
        assert!(to_fields(&3).is_err());
        assert!(to_fields(&json!({"a": 1})).is_ok());
    }
}
