use chrono::NaiveDateTime;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::validators::{validate_cuil, validate_date};

/// Request payload for creating an employee
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEmployeeRequest {
    #[schema(example = "Juan")]
    pub first_name: Option<String>,
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 1, message = "Shorter than minimum length 1.")
    )]
    #[schema(example = "Pérez")]
    pub last_name: Option<String>,
    /// Date of birth in YYYY-MM-DD format
    #[validate(custom(function = validate_date))]
    #[schema(example = "1980-05-17")]
    pub birth_date: Option<String>,
    /// Hire date in YYYY-MM-DD format
    #[validate(custom(function = validate_date))]
    #[schema(example = "2010-02-01")]
    pub hire_date: Option<String>,
    /// CUIL as 11 digits or `XX-XXXXXXXX-X`
    #[validate(custom(function = validate_cuil))]
    #[schema(example = "20-12345678-6")]
    pub cuil: Option<String>,
    #[validate(range(min = 1, message = "Must be greater than or equal to 1."))]
    pub file_no: Option<i64>,
    #[validate(range(min = 1, message = "Must be greater than or equal to 1."))]
    pub user_code: Option<i64>,
}

/// Request payload for a partial employee update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployeeRequest {
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "Shorter than minimum length 1."))]
    pub last_name: Option<String>,
    #[validate(custom(function = validate_date))]
    pub birth_date: Option<String>,
    #[validate(custom(function = validate_date))]
    pub hire_date: Option<String>,
    #[validate(custom(function = validate_cuil))]
    pub cuil: Option<String>,
    #[validate(range(min = 1, message = "Must be greater than or equal to 1."))]
    pub file_no: Option<i64>,
    #[validate(range(min = 1, message = "Must be greater than or equal to 1."))]
    pub user_code: Option<i64>,
}

/// Request payload for recording a time clock punch
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PunchRequest {
    /// Local wall-clock time of the punch
    #[validate(required(message = "Missing data for required field."))]
    #[schema(value_type = String, example = "2015-03-02T08:35:00")]
    pub datetime: Option<NaiveDateTime>,
}
