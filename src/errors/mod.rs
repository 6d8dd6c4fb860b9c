use std::collections::BTreeMap;
use std::fmt;

use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use log::warn;
use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::{
    CODE_CONFLICT, CODE_INTERNAL_ERROR, CODE_INVALID_BODY, CODE_INVALID_PARAMETER,
    CODE_NOT_FOUND, CODE_UNIQUE_VIOLATION, ERR_INVALID_BODY, ERR_INVALID_PARAMETER_TYPE,
    ERR_UNIQUE_CONFLICT, ERR_VALIDATION_FAILED,
};

/// Field name to the list of messages reported for it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Body for errors that carry a single message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Body for errors reported per field.
#[derive(Debug, Serialize, ToSchema)]
pub struct FieldErrorResponse {
    pub message: String,
    pub messages: FieldErrors,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    /// Uniqueness violations detected while validating a payload.
    FieldConflict { messages: FieldErrors },
    ValidationError { messages: FieldErrors },
    InternalServerError { code: String, message: String },
}

impl ApiError {
    pub fn bad_request(code: &str, message: &str) -> Self {
        ApiError::BadRequest {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        ApiError::NotFound {
            code: CODE_NOT_FOUND.to_string(),
            message: message.to_string(),
        }
    }

    pub fn conflict(code: &str, message: &str) -> Self {
        ApiError::Conflict {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::InternalServerError {
            code: CODE_INTERNAL_ERROR.to_string(),
            message: message.into(),
        }
    }

    /// Single-field uniqueness failure.
    pub fn field_conflict(field: &str, message: &str) -> Self {
        let mut messages = FieldErrors::new();
        messages.insert(field.to_string(), vec![message.to_string()]);
        ApiError::FieldConflict { messages }
    }

    /// Single-field validation failure.
    pub fn invalid_field(field: &str, message: &str) -> Self {
        let mut messages = FieldErrors::new();
        messages.insert(field.to_string(), vec![message.to_string()]);
        ApiError::ValidationError { messages }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest { code, message } => {
                write!(f, "Bad Request [{}]: {}", code, message)
            }
            ApiError::NotFound { code, message } => {
                write!(f, "Not Found [{}]: {}", code, message)
            }
            ApiError::Conflict { code, message } => {
                write!(f, "Conflict [{}]: {}", code, message)
            }
            ApiError::FieldConflict { messages } => {
                write!(f, "Conflict [{}]: {:?}", CODE_UNIQUE_VIOLATION, messages)
            }
            ApiError::ValidationError { messages } => {
                write!(f, "Validation Error: {:?}", messages)
            }
            ApiError::InternalServerError { code, message } => {
                write!(f, "Internal Server Error [{}]: {}", code, message)
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } | ApiError::FieldConflict { .. } => StatusCode::CONFLICT,
            ApiError::ValidationError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            ApiError::BadRequest { code, message }
            | ApiError::NotFound { code, message }
            | ApiError::Conflict { code, message }
            | ApiError::InternalServerError { code, message } => builder.json(ErrorResponse {
                error: message.clone(),
                code: code.clone(),
            }),
            ApiError::FieldConflict { messages } => builder.json(FieldErrorResponse {
                message: ERR_UNIQUE_CONFLICT.to_string(),
                messages: messages.clone(),
            }),
            ApiError::ValidationError { messages } => builder.json(FieldErrorResponse {
                message: ERR_VALIDATION_FAILED.to_string(),
                messages: messages.clone(),
            }),
        }
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for ApiError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(err.to_string())
    }
}

/// Duplicate-key errors raised by a unique index outside of the field checks.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        _ => false,
    }
}

/// Map a write error to a 409 when a unique index rejected it.
pub fn map_write_error(err: mongodb::error::Error) -> ApiError {
    if is_duplicate_key(&err) {
        ApiError::conflict(CODE_CONFLICT, ERR_UNIQUE_CONFLICT)
    } else {
        err.into()
    }
}

/// `JsonConfig` error handler: malformed or mistyped bodies become a 400
/// carrying the parser message.
pub fn json_error_handler(err: error::JsonPayloadError, _: &HttpRequest) -> error::Error {
    warn!("Rejected request body: {}", err);
    ApiError::bad_request(CODE_INVALID_BODY, &format!("{}: {}", ERR_INVALID_BODY, err)).into()
}

/// `QueryConfig` error handler for typed query strings.
pub fn query_error_handler(err: error::QueryPayloadError, _: &HttpRequest) -> error::Error {
    warn!("Rejected query string: {}", err);
    ApiError::bad_request(
        CODE_INVALID_PARAMETER,
        &format!("{}: {}", ERR_INVALID_PARAMETER_TYPE, err),
    )
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::bad_request("X", "bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found("gone").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::conflict(CODE_CONFLICT, "in use").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::FieldConflict {
                messages: FieldErrors::new()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::invalid_field("name", "bad").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[actix_web::test]
    async fn test_simple_error_body() {
        let resp = ApiError::not_found("Bank not found").error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Bank not found");
        assert_eq!(json["code"], CODE_NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_field_error_body() {
        let resp = ApiError::invalid_field("cuit", "CUIT field invalid.").error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], ERR_VALIDATION_FAILED);
        assert_eq!(json["messages"]["cuit"][0], "CUIT field invalid.");
    }

    #[actix_web::test]
    async fn test_field_conflict_body() {
        let err = ApiError::field_conflict("name", "Bank name must be unique.");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["messages"]["name"][0], "Bank name must be unique.");
    }
}
