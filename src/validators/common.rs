//! Common validation utilities and helpers.

use chrono::NaiveDate;
use log::warn;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::constants::ERR_INVALID_DATE;
use crate::errors::{ApiError, FieldErrors};

/// Convert validator errors to ApiError::ValidationError.
///
/// Nested struct and list errors are keyed by their dotted path, e.g.
/// `items.0.quantity`.
pub fn validation_errors_to_api_error(e: ValidationErrors) -> ApiError {
    let mut messages = FieldErrors::new();
    collect_errors(&e, "", &mut messages);
    ApiError::ValidationError { messages }
}

fn collect_errors(errors: &ValidationErrors, prefix: &str, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let key = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                let entry = out.entry(key).or_default();
                entry.extend(errs.iter().map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_errors(inner, &key, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_errors(inner, &format!("{}.{}", key, index), out);
                }
            }
        }
    }
}

/// Run the declarative checks of a payload.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload.validate().map_err(|e| {
        let err = validation_errors_to_api_error(e);
        warn!("Validation failed: {}", err);
        err
    })
}

/// Validator for `YYYY-MM-DD` date strings.
pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            let mut error = ValidationError::new("invalid_date");
            error.message = Some(ERR_INVALID_DATE.into());
            error
        })
}

/// Merge a list of field failures into a single error, if any.
pub fn field_errors(failures: Vec<(&str, &str)>) -> Option<FieldErrors> {
    if failures.is_empty() {
        return None;
    }
    let mut messages = FieldErrors::new();
    for (field, message) in failures {
        messages
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }
    Some(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Item {
        #[validate(range(min = 1, message = "Must be at least 1."))]
        quantity: i64,
    }

    #[derive(Debug, Validate)]
    struct Order {
        #[validate(length(min = 2, message = "Shorter than minimum length 2."))]
        name: String,
        #[validate(nested)]
        items: Vec<Item>,
    }

    #[test]
    fn test_flattens_field_and_list_errors() {
        let order = Order {
            name: "a".to_string(),
            items: vec![Item { quantity: 1 }, Item { quantity: 0 }],
        };
        match validate_payload(&order) {
            Err(ApiError::ValidationError { messages }) => {
                assert_eq!(messages["name"], vec!["Shorter than minimum length 2."]);
                assert_eq!(messages["items.1.quantity"], vec!["Must be at least 1."]);
                assert!(!messages.contains_key("items.0.quantity"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_valid_payload() {
        let order = Order {
            name: "ab".to_string(),
            items: vec![Item { quantity: 2 }],
        };
        assert!(validate_payload(&order).is_ok());
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2015-03-02").is_ok());
        assert!(validate_date("2015-02-30").is_err());
        assert!(validate_date("02/03/2015").is_err());
    }

    #[test]
    fn test_field_errors() {
        assert!(field_errors(vec![]).is_none());
        let messages = field_errors(vec![("name", "taken"), ("name", "short")]).unwrap();
        assert_eq!(messages["name"], vec!["taken", "short"]);
    }
}
