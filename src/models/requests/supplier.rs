use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{FiscalType, FreightType};
use crate::validators::validate_cuit;

/// Request payload for creating a supplier
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSupplierRequest {
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 1, message = "Shorter than minimum length 1.")
    )]
    #[schema(example = "Distribuidora Sur SA")]
    pub name: Option<String>,
    #[schema(example = "Dist. Sur")]
    pub fancy_name: Option<String>,
    /// CUIT as 11 digits or `XX-XXXXXXXX-X`
    #[validate(custom(function = validate_cuit))]
    #[schema(example = "30-50001091-2")]
    pub cuit: Option<String>,
    pub fiscal_type: Option<FiscalType>,
    /// Payment term in days
    #[validate(range(min = 0, message = "Must be greater than or equal to 0."))]
    pub payment_term: Option<i64>,
    /// Delivery lead time in days
    #[validate(range(min = 0, message = "Must be greater than or equal to 0."))]
    pub leap_time: Option<i64>,
    pub freight_type: Option<FreightType>,
    pub notes: Option<String>,
}

/// Request payload for a partial supplier update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSupplierRequest {
    #[validate(length(min = 1, message = "Shorter than minimum length 1."))]
    pub name: Option<String>,
    pub fancy_name: Option<String>,
    #[validate(custom(function = validate_cuit))]
    pub cuit: Option<String>,
    pub fiscal_type: Option<FiscalType>,
    #[validate(range(min = 0, message = "Must be greater than or equal to 0."))]
    pub payment_term: Option<i64>,
    #[validate(range(min = 0, message = "Must be greater than or equal to 0."))]
    pub leap_time: Option<i64>,
    pub freight_type: Option<FreightType>,
    pub notes: Option<String>,
}
