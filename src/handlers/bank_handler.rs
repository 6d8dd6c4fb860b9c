//! Bank and bank account type handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, info};
use mongodb::bson::doc;

use crate::errors::ApiError;
use crate::handlers::created;
use crate::models::{
    BankAccountTypeResponse, BankResponse, CreateAccountTypeRequest, CreateBankRequest,
    UpdateAccountTypeRequest, UpdateBankRequest,
};
use crate::rest::{build_item, build_result, ListEnvelope, ListQuery};
use crate::services::{AccountTypeService, BankService};

/// List banks
#[utoipa::path(
    get,
    path = "/api/v1/banks",
    tag = "Banks",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 25, max: 100)"),
        ("select" = Option<Vec<String>>, Query, description = "Fields to include"),
        ("omit" = Option<Vec<String>>, Query, description = "Fields to exclude"),
        ("filter" = Option<Vec<String>>, Query, description = "field:operator:value, repeatable")
    ),
    responses(
        (status = 200, description = "Page of banks", body = ListEnvelope),
        (status = 400, description = "Malformed query parameter", body = crate::errors::ErrorResponse)
    )
)]
pub async fn list_banks(
    bank_service: web::Data<BankService>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    debug!("Listing banks: {:?}", query);
    let result = build_result(bank_service.get_ref(), doc! {}, &query).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Create a bank
#[utoipa::path(
    post,
    path = "/api/v1/banks",
    tag = "Banks",
    request_body = CreateBankRequest,
    responses(
        (status = 201, description = "Bank created", body = BankResponse),
        (status = 409, description = "Bank name already exists", body = crate::errors::FieldErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::FieldErrorResponse)
    )
)]
pub async fn create_bank(
    bank_service: web::Data<BankService>,
    body: web::Json<CreateBankRequest>,
    query: ListQuery,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let bank = bank_service.create_bank(body.into_inner()).await?;
    info!("Created bank {}", bank.id);
    Ok(created(&req, &bank.id, build_item(&bank, &query)?))
}

/// Get a bank by ID
#[utoipa::path(
    get,
    path = "/api/v1/banks/{id}",
    tag = "Banks",
    params(
        ("id" = String, Path, description = "Bank ID"),
        ("select" = Option<Vec<String>>, Query, description = "Fields to include"),
        ("omit" = Option<Vec<String>>, Query, description = "Fields to exclude")
    ),
    responses(
        (status = 200, description = "Bank found", body = BankResponse),
        (status = 404, description = "Bank not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_bank(
    bank_service: web::Data<BankService>,
    path: web::Path<String>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let bank = bank_service.get_bank(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(build_item(&bank, &query)?))
}

/// Partially update a bank
#[utoipa::path(
    patch,
    path = "/api/v1/banks/{id}",
    tag = "Banks",
    params(
        ("id" = String, Path, description = "Bank ID")
    ),
    request_body = UpdateBankRequest,
    responses(
        (status = 200, description = "Bank updated", body = BankResponse),
        (status = 404, description = "Bank not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Bank name already exists", body = crate::errors::FieldErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::FieldErrorResponse)
    )
)]
pub async fn update_bank(
    bank_service: web::Data<BankService>,
    path: web::Path<String>,
    body: web::Json<UpdateBankRequest>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let bank = bank_service
        .update_bank(&path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(build_item(&bank, &query)?))
}

/// Delete a bank
#[utoipa::path(
    delete,
    path = "/api/v1/banks/{id}",
    tag = "Banks",
    params(
        ("id" = String, Path, description = "Bank ID")
    ),
    responses(
        (status = 204, description = "Bank deleted"),
        (status = 404, description = "Bank not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Bank has accounts", body = crate::errors::ErrorResponse)
    )
)]
pub async fn delete_bank(
    bank_service: web::Data<BankService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    bank_service.delete_bank(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List bank account types
#[utoipa::path(
    get,
    path = "/api/v1/banks/account_types",
    tag = "Banks",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 25, max: 100)"),
        ("select" = Option<Vec<String>>, Query, description = "Fields to include"),
        ("omit" = Option<Vec<String>>, Query, description = "Fields to exclude"),
        ("filter" = Option<Vec<String>>, Query, description = "field:operator:value, repeatable")
    ),
    responses(
        (status = 200, description = "Page of account types", body = ListEnvelope),
        (status = 400, description = "Malformed query parameter", body = crate::errors::ErrorResponse)
    )
)]
pub async fn list_account_types(
    account_type_service: web::Data<AccountTypeService>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let result = build_result(account_type_service.get_ref(), doc! {}, &query).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Create a bank account type
#[utoipa::path(
    post,
    path = "/api/v1/banks/account_types",
    tag = "Banks",
    request_body = CreateAccountTypeRequest,
    responses(
        (status = 201, description = "Account type created", body = BankAccountTypeResponse),
        (status = 409, description = "Name or abbreviation already exists", body = crate::errors::FieldErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::FieldErrorResponse)
    )
)]
pub async fn create_account_type(
    account_type_service: web::Data<AccountTypeService>,
    body: web::Json<CreateAccountTypeRequest>,
    query: ListQuery,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let account_type = account_type_service
        .create_account_type(body.into_inner())
        .await?;
    info!("Created bank account type {}", account_type.id);
    Ok(created(
        &req,
        &account_type.id,
        build_item(&account_type, &query)?,
    ))
}

/// Get a bank account type by ID
#[utoipa::path(
    get,
    path = "/api/v1/banks/account_types/{id}",
    tag = "Banks",
    params(
        ("id" = String, Path, description = "Account type ID")
    ),
    responses(
        (status = 200, description = "Account type found", body = BankAccountTypeResponse),
        (status = 404, description = "Account type not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_account_type(
    account_type_service: web::Data<AccountTypeService>,
    path: web::Path<String>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let account_type = account_type_service
        .get_account_type(&path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(build_item(&account_type, &query)?))
}

/// Partially update a bank account type
#[utoipa::path(
    patch,
    path = "/api/v1/banks/account_types/{id}",
    tag = "Banks",
    params(
        ("id" = String, Path, description = "Account type ID")
    ),
    request_body = UpdateAccountTypeRequest,
    responses(
        (status = 200, description = "Account type updated", body = BankAccountTypeResponse),
        (status = 404, description = "Account type not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Name or abbreviation already exists", body = crate::errors::FieldErrorResponse)
    )
)]
pub async fn update_account_type(
    account_type_service: web::Data<AccountTypeService>,
    path: web::Path<String>,
    body: web::Json<UpdateAccountTypeRequest>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let account_type = account_type_service
        .update_account_type(&path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(build_item(&account_type, &query)?))
}

/// Delete a bank account type
#[utoipa::path(
    delete,
    path = "/api/v1/banks/account_types/{id}",
    tag = "Banks",
    params(
        ("id" = String, Path, description = "Account type ID")
    ),
    responses(
        (status = 204, description = "Account type deleted"),
        (status = 404, description = "Account type not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Account type in use", body = crate::errors::ErrorResponse)
    )
)]
pub async fn delete_account_type(
    account_type_service: web::Data<AccountTypeService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    account_type_service
        .delete_account_type(&path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
