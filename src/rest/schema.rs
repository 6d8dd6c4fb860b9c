//! Statically declared field tables for REST resources.
//!
//! Every serialized resource publishes the fields it exposes together with the
//! document path each one is stored under. Projection works on the public
//! names; filtering translates them into storage paths.

use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::{oid::ObjectId, Bson};
use serde::Serialize;

/// Value kind of a declared field, used to convert filter arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    ObjectId,
    String,
    Integer,
    /// Calendar date stored as `YYYY-MM-DD`.
    Date,
    /// Timestamp stored as a BSON datetime.
    DateTime,
    /// Embedded document or list of documents.
    Nested,
}

impl FieldKind {
    /// Convert a raw query-string argument into a BSON value of this kind.
    ///
    /// Returns `None` when the argument does not fit the kind.
    pub fn to_bson(self, raw: &str) -> Option<Bson> {
        let raw = raw.trim();
        match self {
            FieldKind::ObjectId => ObjectId::parse_str(raw).ok().map(Bson::ObjectId),
            FieldKind::String => Some(Bson::String(raw.to_string())),
            FieldKind::Integer => raw.parse::<i64>().ok().map(Bson::Int64),
            FieldKind::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| Bson::String(d.format("%Y-%m-%d").to_string())),
            FieldKind::DateTime => parse_timestamp(raw)
                .map(|dt| Bson::DateTime(mongodb::bson::DateTime::from_millis(dt.timestamp_millis()))),
            FieldKind::Nested => None,
        }
    }

    /// Whether substring operators apply to values of this kind.
    pub fn is_textual(self) -> bool {
        matches!(self, FieldKind::String)
    }
}

/// Accepts RFC 3339 timestamps or plain dates (midnight UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// A field exposed by a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Name used in serialized output and in `select`/`omit`/`filter`.
    pub name: &'static str,
    /// Document path the field is stored under. `None` for computed fields,
    /// which can be projected but not filtered.
    pub path: Option<&'static str>,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// A field stored under its own name.
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            path: Some(name),
            kind,
        }
    }

    /// A field stored under a different document path.
    pub const fn stored_as(name: &'static str, path: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            path: Some(path),
            kind,
        }
    }

    /// A field derived at serialization time.
    pub const fn computed(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            path: None,
            kind,
        }
    }

    pub fn is_filterable(&self) -> bool {
        self.path.is_some() && self.kind != FieldKind::Nested
    }
}

/// Find a declared field by its public name.
pub fn find_field<'a>(fields: &'a [FieldDescriptor], name: &str) -> Option<&'a FieldDescriptor> {
    fields.iter().find(|f| f.name == name)
}

/// A serializable resource with a declared field table.
pub trait Resource: Serialize {
    const FIELDS: &'static [FieldDescriptor];

    /// Field kept by every projection. Resources without one leave it
    /// undeclared in `FIELDS`.
    const ID_FIELD: &'static str = "id";
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor::stored_as("id", "_id", FieldKind::ObjectId),
        FieldDescriptor::new("name", FieldKind::String),
        FieldDescriptor::computed("bank", FieldKind::String),
        FieldDescriptor::new("items", FieldKind::Nested),
    ];

    #[test]
    fn test_find_field() {
        assert_eq!(find_field(FIELDS, "id").unwrap().path, Some("_id"));
        assert!(find_field(FIELDS, "missing").is_none());
    }

    #[test]
    fn test_filterable() {
        assert!(find_field(FIELDS, "name").unwrap().is_filterable());
        assert!(!find_field(FIELDS, "bank").unwrap().is_filterable());
        assert!(!find_field(FIELDS, "items").unwrap().is_filterable());
    }

    #[test]
    fn test_integer_conversion() {
        assert_eq!(FieldKind::Integer.to_bson("42"), Some(Bson::Int64(42)));
        assert_eq!(FieldKind::Integer.to_bson("4x"), None);
    }

    #[test]
    fn test_date_conversion() {
        assert_eq!(
            FieldKind::Date.to_bson("2015-03-09"),
            Some(Bson::String("2015-03-09".to_string()))
        );
        assert_eq!(FieldKind::Date.to_bson("09/03/2015"), None);
    }

    #[test]
    fn test_datetime_conversion() {
        let expected = mongodb::bson::DateTime::from_millis(1_425_859_200_000);
        assert_eq!(
            FieldKind::DateTime.to_bson("2015-03-09"),
            Some(Bson::DateTime(expected))
        );
        assert_eq!(
            FieldKind::DateTime.to_bson("2015-03-09T00:00:00Z"),
            Some(Bson::DateTime(expected))
        );
    }

    #[test]
    fn test_object_id_conversion() {
        assert!(FieldKind::ObjectId
            .to_bson("507f1f77bcf86cd799439011")
            .is_some());
        assert_eq!(FieldKind::ObjectId.to_bson("1"), None);
    }
}
