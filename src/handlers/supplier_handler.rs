//! Supplier handlers, including the supplier-scoped orders and bank
//! accounts.

use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, info};
use mongodb::bson::doc;

use crate::errors::ApiError;
use crate::handlers::created;
use crate::models::{
    CreatePurchaseOrderRequest, CreateSupplierRequest, PurchaseOrderResponse, SupplierResponse,
    UpdateSupplierRequest,
};
use crate::rest::{build_item, build_result, ListEnvelope, ListQuery};
use crate::services::{BankAccountService, PurchaseOrderService, SupplierService};

/// List suppliers
#[utoipa::path(
    get,
    path = "/api/v1/suppliers",
    tag = "Suppliers",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 25, max: 100)"),
        ("select" = Option<Vec<String>>, Query, description = "Fields to include"),
        ("omit" = Option<Vec<String>>, Query, description = "Fields to exclude"),
        ("filter" = Option<Vec<String>>, Query, description = "field:operator:value, repeatable")
    ),
    responses(
        (status = 200, description = "Page of suppliers", body = ListEnvelope),
        (status = 400, description = "Malformed query parameter", body = crate::errors::ErrorResponse)
    )
)]
pub async fn list_suppliers(
    supplier_service: web::Data<SupplierService>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let result = build_result(supplier_service.get_ref(), doc! {}, &query).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Create a supplier
#[utoipa::path(
    post,
    path = "/api/v1/suppliers",
    tag = "Suppliers",
    request_body = CreateSupplierRequest,
    responses(
        (status = 201, description = "Supplier created", body = SupplierResponse),
        (status = 409, description = "CUIT already registered", body = crate::errors::FieldErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::FieldErrorResponse)
    )
)]
pub async fn create_supplier(
    supplier_service: web::Data<SupplierService>,
    body: web::Json<CreateSupplierRequest>,
    query: ListQuery,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let supplier = supplier_service.create_supplier(body.into_inner()).await?;
    info!("Created supplier {}", supplier.id);
    Ok(created(&req, &supplier.id, build_item(&supplier, &query)?))
}

/// Get a supplier by ID
#[utoipa::path(
    get,
    path = "/api/v1/suppliers/{id}",
    tag = "Suppliers",
    params(
        ("id" = String, Path, description = "Supplier ID")
    ),
    responses(
        (status = 200, description = "Supplier found", body = SupplierResponse),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_supplier(
    supplier_service: web::Data<SupplierService>,
    path: web::Path<String>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let supplier = supplier_service.get_supplier(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(build_item(&supplier, &query)?))
}

/// Partially update a supplier
#[utoipa::path(
    patch,
    path = "/api/v1/suppliers/{id}",
    tag = "Suppliers",
    params(
        ("id" = String, Path, description = "Supplier ID")
    ),
    request_body = UpdateSupplierRequest,
    responses(
        (status = 200, description = "Supplier updated", body = SupplierResponse),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "CUIT already registered", body = crate::errors::FieldErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::FieldErrorResponse)
    )
)]
pub async fn update_supplier(
    supplier_service: web::Data<SupplierService>,
    path: web::Path<String>,
    body: web::Json<UpdateSupplierRequest>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let supplier = supplier_service
        .update_supplier(&path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(build_item(&supplier, &query)?))
}

/// Delete a supplier
#[utoipa::path(
    delete,
    path = "/api/v1/suppliers/{id}",
    tag = "Suppliers",
    params(
        ("id" = String, Path, description = "Supplier ID")
    ),
    responses(
        (status = 204, description = "Supplier deleted"),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Supplier has orders or bank accounts", body = crate::errors::ErrorResponse)
    )
)]
pub async fn delete_supplier(
    supplier_service: web::Data<SupplierService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    supplier_service.delete_supplier(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List the purchase orders of a supplier
#[utoipa::path(
    get,
    path = "/api/v1/suppliers/{id}/orders",
    tag = "Suppliers",
    params(
        ("id" = String, Path, description = "Supplier ID"),
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 25, max: 100)"),
        ("filter" = Option<Vec<String>>, Query, description = "field:operator:value, repeatable")
    ),
    responses(
        (status = 200, description = "Page of purchase orders", body = ListEnvelope),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn list_supplier_orders(
    supplier_service: web::Data<SupplierService>,
    order_service: web::Data<PurchaseOrderService>,
    path: web::Path<String>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let supplier_id = supplier_service.ensure_exists(&path.into_inner()).await?;
    debug!("Listing orders of supplier {}", supplier_id);
    let result = build_result(
        order_service.get_ref(),
        doc! { "supplier_id": supplier_id },
        &query,
    )
    .await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Create a purchase order for a supplier
#[utoipa::path(
    post,
    path = "/api/v1/suppliers/{id}/orders",
    tag = "Suppliers",
    params(
        ("id" = String, Path, description = "Supplier ID")
    ),
    request_body = CreatePurchaseOrderRequest,
    responses(
        (status = 201, description = "Purchase order created", body = PurchaseOrderResponse),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::FieldErrorResponse)
    )
)]
pub async fn create_supplier_order(
    supplier_service: web::Data<SupplierService>,
    order_service: web::Data<PurchaseOrderService>,
    path: web::Path<String>,
    body: web::Json<CreatePurchaseOrderRequest>,
    query: ListQuery,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let supplier_id = supplier_service.ensure_exists(&path.into_inner()).await?;
    let order = order_service
        .create_order(body.into_inner(), Some(supplier_id))
        .await?;
    info!("Created purchase order {} for supplier {}", order.id, supplier_id);
    Ok(created(&req, &order.id, build_item(&order, &query)?))
}

/// Get a purchase order of a supplier
#[utoipa::path(
    get,
    path = "/api/v1/suppliers/{id}/orders/{order_id}",
    tag = "Suppliers",
    params(
        ("id" = String, Path, description = "Supplier ID"),
        ("order_id" = String, Path, description = "Purchase order ID")
    ),
    responses(
        (status = 200, description = "Purchase order found", body = PurchaseOrderResponse),
        (status = 404, description = "Supplier or order not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_supplier_order(
    supplier_service: web::Data<SupplierService>,
    order_service: web::Data<PurchaseOrderService>,
    path: web::Path<(String, String)>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let (supplier_id, order_id) = path.into_inner();
    let supplier_id = supplier_service.ensure_exists(&supplier_id).await?;
    let order = order_service
        .get_order(&order_id, Some(supplier_id))
        .await?;
    Ok(HttpResponse::Ok().json(build_item(&order, &query)?))
}

/// List the bank accounts of a supplier
#[utoipa::path(
    get,
    path = "/api/v1/suppliers/{id}/bank_accounts",
    tag = "Suppliers",
    params(
        ("id" = String, Path, description = "Supplier ID"),
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 25, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of bank accounts", body = ListEnvelope),
        (status = 404, description = "Supplier not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn list_supplier_bank_accounts(
    supplier_service: web::Data<SupplierService>,
    bank_account_service: web::Data<BankAccountService>,
    path: web::Path<String>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let supplier_id = supplier_service.ensure_exists(&path.into_inner()).await?;
    let result = build_result(
        bank_account_service.get_ref(),
        doc! { "supplier_id": supplier_id },
        &query,
    )
    .await?;
    Ok(HttpResponse::Ok().json(result))
}
