//! `filter` query parameter parsing and translation into MongoDB predicates.
//!
//! A filter is written `field:operator:argument`, or `field:argument` for
//! equality. Filters naming an unknown field or operator are dropped without
//! reporting an error.

use log::debug;
use mongodb::bson::{Bson, Document};

use crate::rest::schema::{find_field, FieldDescriptor};

const DEFAULT_OPERATOR: &str = "eq";

/// Comparison operators accepted in filter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    IContains,
    StartsWith,
    IStartsWith,
    EndsWith,
    IEndsWith,
    In,
    NotIn,
}

impl Operator {
    pub fn from_name(name: &str) -> Option<Self> {
        let op = match name {
            "eq" => Operator::Eq,
            "neq" => Operator::Neq,
            "gt" => Operator::Gt,
            "gte" => Operator::Gte,
            "lt" => Operator::Lt,
            "lte" => Operator::Lte,
            "contains" => Operator::Contains,
            "icontains" => Operator::IContains,
            "startswith" => Operator::StartsWith,
            "istartswith" => Operator::IStartsWith,
            "endswith" => Operator::EndsWith,
            "iendswith" => Operator::IEndsWith,
            "in" => Operator::In,
            "nin" => Operator::NotIn,
            _ => return None,
        };
        Some(op)
    }

    fn is_textual(self) -> bool {
        matches!(
            self,
            Operator::Contains
                | Operator::IContains
                | Operator::StartsWith
                | Operator::IStartsWith
                | Operator::EndsWith
                | Operator::IEndsWith
        )
    }
}

/// A parsed filter expression. The operator stays a plain string until the
/// filter is applied so unknown names can be dropped at that point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub operator: String,
    pub argument: String,
}

/// Parse raw `filter` values.
///
/// Malformed entries (no `:` at all, or a known operator without argument)
/// are skipped. The argument keeps any further `:` characters.
pub fn parse_filters<S: AsRef<str>>(raw: &[S]) -> Vec<Filter> {
    raw.iter()
        .filter_map(|f| {
            let mut parts = f.as_ref().splitn(3, ':');
            let field = parts.next()?;
            let op = parts.next()?;
            match parts.next() {
                Some(arg) => Some(Filter {
                    field: field.to_string(),
                    operator: op.to_string(),
                    argument: arg.to_string(),
                }),
                None if Operator::from_name(op).is_some() => None,
                None => Some(Filter {
                    field: field.to_string(),
                    operator: DEFAULT_OPERATOR.to_string(),
                    argument: op.to_string(),
                }),
            }
        })
        .collect()
}

/// Translate one filter into a predicate on the field's storage path.
pub fn create_operation(filter: &Filter, fields: &[FieldDescriptor]) -> Option<Document> {
    let op = Operator::from_name(&filter.operator)?;
    let field = find_field(fields, &filter.field).filter(|f| f.is_filterable())?;
    let path = field.path?;

    let condition: Bson = if op.is_textual() {
        if !field.kind.is_textual() {
            return None;
        }
        text_condition(op, &filter.argument)
    } else {
        match op {
            Operator::In | Operator::NotIn => {
                let values = filter
                    .argument
                    .split(',')
                    .map(|v| field.kind.to_bson(v))
                    .collect::<Option<Vec<Bson>>>()?;
                let key = if op == Operator::In { "$in" } else { "$nin" };
                operator_document(key, Bson::Array(values))
            }
            _ => {
                let value = field.kind.to_bson(&filter.argument)?;
                match op {
                    Operator::Eq => value,
                    Operator::Neq => operator_document("$ne", value),
                    Operator::Gt => operator_document("$gt", value),
                    Operator::Gte => operator_document("$gte", value),
                    Operator::Lt => operator_document("$lt", value),
                    Operator::Lte => operator_document("$lte", value),
                    _ => return None,
                }
            }
        }
    };

    let mut predicate = Document::new();
    predicate.insert(path, condition);
    Some(predicate)
}

/// Translate every applicable filter, dropping the rest.
pub fn create_filters(filters: &[Filter], fields: &[FieldDescriptor]) -> Vec<Document> {
    filters
        .iter()
        .filter_map(|f| {
            let predicate = create_operation(f, fields);
            if predicate.is_none() {
                debug!(
                    "Ignoring filter {}:{}:{}",
                    f.field, f.operator, f.argument
                );
            }
            predicate
        })
        .collect()
}

/// Combine a base query with filter predicates using `$and`.
pub fn apply_filters(base: Document, predicates: Vec<Document>) -> Document {
    if predicates.is_empty() {
        return base;
    }
    let mut clauses = Vec::with_capacity(predicates.len() + 1);
    if !base.is_empty() {
        clauses.push(Bson::Document(base));
    }
    clauses.extend(predicates.into_iter().map(Bson::Document));
    if clauses.len() == 1 {
        if let Some(Bson::Document(only)) = clauses.pop() {
            return only;
        }
    }
    let mut query = Document::new();
    query.insert("$and", clauses);
    query
}

fn operator_document(key: &str, value: Bson) -> Bson {
    let mut condition = Document::new();
    condition.insert(key, value);
    Bson::Document(condition)
}

fn text_condition(op: Operator, argument: &str) -> Bson {
    let escaped = regex::escape(argument);
    let (pattern, insensitive) = match op {
        Operator::Contains => (escaped, false),
        Operator::IContains => (escaped, true),
        Operator::StartsWith => (format!("^{}", escaped), false),
        Operator::IStartsWith => (format!("^{}", escaped), true),
        Operator::EndsWith => (format!("{}$", escaped), false),
        _ => (format!("{}$", escaped), true),
    };
    let mut condition = Document::new();
    condition.insert("$regex", pattern);
    if insensitive {
        condition.insert("$options", "i");
    }
    Bson::Document(condition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::schema::FieldKind;
    use mongodb::bson::doc;

    const FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor::stored_as("id", "_id", FieldKind::ObjectId),
        FieldDescriptor::new("name", FieldKind::String),
        FieldDescriptor::new("number", FieldKind::Integer),
        FieldDescriptor::stored_as("branch", "bank_branch", FieldKind::String),
        FieldDescriptor::new("items.sku", FieldKind::String),
        FieldDescriptor::computed("supplier_name", FieldKind::String),
    ];

    fn filter(field: &str, operator: &str, argument: &str) -> Filter {
        Filter {
            field: field.to_string(),
            operator: operator.to_string(),
            argument: argument.to_string(),
        }
    }

    #[test]
    fn test_parse_full_expression() {
        assert_eq!(
            parse_filters(&["name:contains:acme"]),
            vec![filter("name", "contains", "acme")]
        );
    }

    #[test]
    fn test_parse_defaults_to_eq() {
        assert_eq!(parse_filters(&["name:acme"]), vec![filter("name", "eq", "acme")]);
    }

    #[test]
    fn test_parse_skips_malformed() {
        assert!(parse_filters(&["name"]).is_empty());
        assert!(parse_filters(&["name:gte"]).is_empty());
    }

    #[test]
    fn test_parse_keeps_colons_in_argument() {
        assert_eq!(
            parse_filters(&["issue:gte:2015-01-01T10:00:00Z"]),
            vec![filter("issue", "gte", "2015-01-01T10:00:00Z")]
        );
    }

    #[test]
    fn test_parse_keeps_unknown_operator() {
        assert_eq!(
            parse_filters(&["name:badop:x"]),
            vec![filter("name", "badop", "x")]
        );
    }

    #[test]
    fn test_equality_and_comparisons() {
        assert_eq!(
            create_operation(&filter("name", "eq", "acme"), FIELDS),
            Some(doc! { "name": "acme" })
        );
        assert_eq!(
            create_operation(&filter("number", "neq", "3"), FIELDS),
            Some(doc! { "number": { "$ne": 3_i64 } })
        );
        assert_eq!(
            create_operation(&filter("number", "gte", "10"), FIELDS),
            Some(doc! { "number": { "$gte": 10_i64 } })
        );
        assert_eq!(
            create_operation(&filter("number", "lt", "10"), FIELDS),
            Some(doc! { "number": { "$lt": 10_i64 } })
        );
    }

    #[test]
    fn test_string_operators() {
        assert_eq!(
            create_operation(&filter("name", "contains", "a.b"), FIELDS),
            Some(doc! { "name": { "$regex": "a\\.b" } })
        );
        assert_eq!(
            create_operation(&filter("name", "icontains", "acme"), FIELDS),
            Some(doc! { "name": { "$regex": "acme", "$options": "i" } })
        );
        assert_eq!(
            create_operation(&filter("name", "startswith", "ac"), FIELDS),
            Some(doc! { "name": { "$regex": "^ac" } })
        );
        assert_eq!(
            create_operation(&filter("name", "iendswith", "me"), FIELDS),
            Some(doc! { "name": { "$regex": "me$", "$options": "i" } })
        );
    }

    #[test]
    fn test_list_operators() {
        assert_eq!(
            create_operation(&filter("number", "in", "1,2,3"), FIELDS),
            Some(doc! { "number": { "$in": [1_i64, 2_i64, 3_i64] } })
        );
        assert_eq!(
            create_operation(&filter("name", "nin", "a,b"), FIELDS),
            Some(doc! { "name": { "$nin": ["a", "b"] } })
        );
        assert_eq!(create_operation(&filter("number", "in", "1,x"), FIELDS), None);
    }

    #[test]
    fn test_storage_path_and_embedded_path() {
        assert_eq!(
            create_operation(&filter("branch", "eq", "Centro"), FIELDS),
            Some(doc! { "bank_branch": "Centro" })
        );
        assert_eq!(
            create_operation(&filter("items.sku", "eq", "A-1"), FIELDS),
            Some(doc! { "items.sku": "A-1" })
        );
    }

    #[test]
    fn test_inapplicable_filters_are_dropped() {
        let filters = vec![
            filter("name", "badop", "x"),
            filter("nope", "eq", "x"),
            filter("items.price", "eq", "1"),
            filter("supplier_name", "eq", "x"),
            filter("number", "contains", "1"),
            filter("number", "eq", "one"),
        ];
        assert!(create_filters(&filters, FIELDS).is_empty());
    }

    #[test]
    fn test_apply_filters_composition() {
        assert_eq!(apply_filters(doc! {}, vec![]), doc! {});
        assert_eq!(
            apply_filters(doc! {}, vec![doc! { "name": "a" }]),
            doc! { "name": "a" }
        );
        assert_eq!(
            apply_filters(doc! { "supplier_id": 1 }, vec![]),
            doc! { "supplier_id": 1 }
        );
        assert_eq!(
            apply_filters(
                doc! { "supplier_id": 1 },
                vec![doc! { "name": "a" }, doc! { "number": 2 }]
            ),
            doc! { "$and": [{ "supplier_id": 1 }, { "name": "a" }, { "number": 2 }] }
        );
    }
}
