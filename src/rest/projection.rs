//! `select`/`omit` field projection.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::rest::schema::{FieldDescriptor, Resource};

/// The set of fields a response should carry. `None` keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    only: Option<BTreeSet<String>>,
}

impl Projection {
    /// Keep every declared field.
    pub fn all() -> Self {
        Self::default()
    }

    /// Compute the projection for a declared field table.
    ///
    /// `select` narrows to declared fields, `omit` then removes fields. The
    /// identifier is put back whenever either list is in effect.
    pub fn new<S: AsRef<str>>(
        select: &[S],
        omit: &[S],
        fields: &[FieldDescriptor],
        id_field: &str,
    ) -> Self {
        let declared: BTreeSet<&str> = fields.iter().map(|f| f.name).collect();
        let select: BTreeSet<&str> = names(select);
        let omit: BTreeSet<&str> = names(omit);

        if select.is_empty() && omit.is_empty() {
            return Self::all();
        }

        let mut only: BTreeSet<String> = if select.is_empty() {
            declared.iter().map(|f| f.to_string()).collect()
        } else {
            declared
                .intersection(&select)
                .map(|f| f.to_string())
                .collect()
        };
        only.retain(|f| !omit.contains(f.as_str()));

        if declared.contains(id_field) {
            only.insert(id_field.to_string());
        }

        Self { only: Some(only) }
    }

    pub fn for_resource<R: Resource, S: AsRef<str>>(select: &[S], omit: &[S]) -> Self {
        Self::new(select, omit, R::FIELDS, R::ID_FIELD)
    }

    /// Drop the keys of a serialized object that fall outside the projection.
    pub fn apply(&self, value: Value) -> Value {
        match (value, &self.only) {
            (Value::Object(mut map), Some(only)) => {
                map.retain(|key, _| only.contains(key));
                Value::Object(map)
            }
            (value, _) => value,
        }
    }
}

fn names<S: AsRef<str>>(raw: &[S]) -> BTreeSet<&str> {
    raw.iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::schema::FieldKind;
    use serde_json::json;

    const FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor::stored_as("id", "_id", FieldKind::ObjectId),
        FieldDescriptor::new("name", FieldKind::String),
        FieldDescriptor::new("cuit", FieldKind::String),
    ];

    fn bank() -> Value {
        json!({ "id": "1", "name": "bna", "cuit": "30500010912" })
    }

    const NONE: &[&str] = &[];

    #[test]
    fn test_no_parameters_keeps_everything() {
        let p = Projection::new(NONE, NONE, FIELDS, "id");
        assert_eq!(p, Projection::all());
        assert_eq!(p.apply(bank()), bank());
    }

    #[test]
    fn test_select_keeps_id() {
        let p = Projection::new(&["name"], NONE, FIELDS, "id");
        assert_eq!(p.apply(bank()), json!({ "id": "1", "name": "bna" }));
    }

    #[test]
    fn test_select_ignores_undeclared_fields() {
        let p = Projection::new(&["name", "missing"], NONE, FIELDS, "id");
        assert_eq!(p.apply(bank()), json!({ "id": "1", "name": "bna" }));
    }

    #[test]
    fn test_omit_removes_field() {
        let p = Projection::new(NONE, &["name"], FIELDS, "id");
        assert_eq!(p.apply(bank()), json!({ "id": "1", "cuit": "30500010912" }));
    }

    #[test]
    fn test_omit_cannot_drop_id() {
        let p = Projection::new(NONE, &["id", "cuit"], FIELDS, "id");
        assert_eq!(p.apply(bank()), json!({ "id": "1", "name": "bna" }));
    }

    #[test]
    fn test_select_then_omit() {
        let p = Projection::new(&["name", "cuit"], &["cuit"], FIELDS, "id");
        assert_eq!(p.apply(bank()), json!({ "id": "1", "name": "bna" }));
    }

    #[test]
    fn test_empty_names_are_ignored() {
        let p = Projection::new(&[""], &[" "], FIELDS, "id");
        assert_eq!(p.apply(bank()), bank());
    }

    #[test]
    fn test_id_not_added_when_undeclared() {
        const RECORD: &[FieldDescriptor] = &[
            FieldDescriptor::computed("day", FieldKind::Date),
            FieldDescriptor::computed("intervals", FieldKind::Nested),
        ];
        let p = Projection::new(&["day"], NONE, RECORD, "id");
        assert_eq!(
            p.apply(json!({ "id": "x", "day": "2015-03-02", "intervals": [] })),
            json!({ "day": "2015-03-02" })
        );
    }

    #[test]
    fn test_non_object_values_pass_through() {
        let p = Projection::new(&["name"], NONE, FIELDS, "id");
        assert_eq!(p.apply(json!([1, 2])), json!([1, 2]));
    }
}
