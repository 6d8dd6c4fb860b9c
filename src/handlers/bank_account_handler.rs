//! Bank account handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use log::info;
use mongodb::bson::doc;

use crate::errors::ApiError;
use crate::handlers::created;
use crate::models::{BankAccountResponse, CreateBankAccountRequest};
use crate::rest::{build_item, build_result, ListEnvelope, ListQuery};
use crate::services::BankAccountService;

/// List bank accounts
#[utoipa::path(
    get,
    path = "/api/v1/bank_accounts",
    tag = "Bank accounts",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 25, max: 100)"),
        ("select" = Option<Vec<String>>, Query, description = "Fields to include"),
        ("omit" = Option<Vec<String>>, Query, description = "Fields to exclude"),
        ("filter" = Option<Vec<String>>, Query, description = "field:operator:value, repeatable")
    ),
    responses(
        (status = 200, description = "Page of bank accounts", body = ListEnvelope),
        (status = 400, description = "Malformed query parameter", body = crate::errors::ErrorResponse)
    )
)]
pub async fn list_bank_accounts(
    bank_account_service: web::Data<BankAccountService>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let result = build_result(bank_account_service.get_ref(), doc! {}, &query).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Create a bank account
#[utoipa::path(
    post,
    path = "/api/v1/bank_accounts",
    tag = "Bank accounts",
    request_body = CreateBankAccountRequest,
    responses(
        (status = 201, description = "Bank account created", body = BankAccountResponse),
        (status = 422, description = "Validation error or unknown reference", body = crate::errors::FieldErrorResponse)
    )
)]
pub async fn create_bank_account(
    bank_account_service: web::Data<BankAccountService>,
    body: web::Json<CreateBankAccountRequest>,
    query: ListQuery,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let account = bank_account_service
        .create_bank_account(body.into_inner())
        .await?;
    info!("Created bank account {}", account.id);
    Ok(created(&req, &account.id, build_item(&account, &query)?))
}

/// Get a bank account by ID
#[utoipa::path(
    get,
    path = "/api/v1/bank_accounts/{id}",
    tag = "Bank accounts",
    params(
        ("id" = String, Path, description = "Bank account ID")
    ),
    responses(
        (status = 200, description = "Bank account found", body = BankAccountResponse),
        (status = 404, description = "Bank account not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_bank_account(
    bank_account_service: web::Data<BankAccountService>,
    path: web::Path<String>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let account = bank_account_service
        .get_bank_account(&path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(build_item(&account, &query)?))
}

/// Delete a bank account
#[utoipa::path(
    delete,
    path = "/api/v1/bank_accounts/{id}",
    tag = "Bank accounts",
    params(
        ("id" = String, Path, description = "Bank account ID")
    ),
    responses(
        (status = 204, description = "Bank account deleted"),
        (status = 404, description = "Bank account not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn delete_bank_account(
    bank_account_service: web::Data<BankAccountService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    bank_account_service
        .delete_bank_account(&path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
