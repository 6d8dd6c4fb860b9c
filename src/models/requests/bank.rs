use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::validators::validate_cuit_check_digit;

/// Request payload for creating a bank
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBankRequest {
    /// Bank name, unique
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 2, message = "Shorter than minimum length 2.")
    )]
    #[schema(example = "Banco de la Nación Argentina")]
    pub name: Option<String>,
    /// Central bank code (max 8 characters)
    #[validate(length(max = 8, message = "Longer than maximum length 8."))]
    #[schema(example = "00011")]
    pub bcra_code: Option<String>,
    /// CUIT, 11 digits
    #[validate(
        length(equal = 11, message = "Length must be 11."),
        custom(function = validate_cuit_check_digit)
    )]
    #[schema(example = "30500010912")]
    pub cuit: Option<String>,
}

/// Request payload for a partial bank update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBankRequest {
    #[validate(length(min = 2, message = "Shorter than minimum length 2."))]
    pub name: Option<String>,
    #[validate(length(max = 8, message = "Longer than maximum length 8."))]
    pub bcra_code: Option<String>,
    #[validate(
        length(equal = 11, message = "Length must be 11."),
        custom(function = validate_cuit_check_digit)
    )]
    pub cuit: Option<String>,
}

/// Request payload for creating or updating a bank account type
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccountTypeRequest {
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 2, message = "Shorter than minimum length 2.")
    )]
    #[schema(example = "Cuenta Corriente en Pesos")]
    pub name: Option<String>,
    #[schema(example = "CC $")]
    pub abbr: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAccountTypeRequest {
    #[validate(length(min = 2, message = "Shorter than minimum length 2."))]
    pub name: Option<String>,
    pub abbr: Option<String>,
}

/// Request payload for creating a bank account
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBankAccountRequest {
    /// Bank ID
    #[validate(required(message = "Missing data for required field."))]
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub bank_id: Option<String>,
    /// Bank account type ID
    #[validate(required(message = "Missing data for required field."))]
    #[schema(example = "507f1f77bcf86cd799439012")]
    pub type_id: Option<String>,
    pub branch: Option<String>,
    pub number: Option<String>,
    /// CBU, 22 digits
    #[validate(length(equal = 22, message = "Length must be 22."))]
    pub cbu: Option<String>,
    pub owner: Option<String>,
    /// Owning supplier ID
    pub supplier_id: Option<String>,
}
