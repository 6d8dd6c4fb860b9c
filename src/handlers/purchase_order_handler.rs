//! Purchase order handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use log::info;
use mongodb::bson::doc;

use crate::errors::ApiError;
use crate::handlers::created;
use crate::models::{CreatePurchaseOrderRequest, PurchaseOrderResponse, UpdatePurchaseOrderRequest};
use crate::rest::{build_item, build_result, ListEnvelope, ListQuery};
use crate::services::PurchaseOrderService;

/// List purchase orders
///
/// Order lines can be filtered with `items.sku`, `items.description` and
/// `items.quantity`.
#[utoipa::path(
    get,
    path = "/api/v1/purchases/orders",
    tag = "Purchase orders",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 25, max: 100)"),
        ("select" = Option<Vec<String>>, Query, description = "Fields to include"),
        ("omit" = Option<Vec<String>>, Query, description = "Fields to exclude"),
        ("filter" = Option<Vec<String>>, Query, description = "field:operator:value, repeatable")
    ),
    responses(
        (status = 200, description = "Page of purchase orders", body = ListEnvelope),
        (status = 400, description = "Malformed query parameter", body = crate::errors::ErrorResponse)
    )
)]
pub async fn list_orders(
    order_service: web::Data<PurchaseOrderService>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let result = build_result(order_service.get_ref(), doc! {}, &query).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Create a purchase order
#[utoipa::path(
    post,
    path = "/api/v1/purchases/orders",
    tag = "Purchase orders",
    request_body = CreatePurchaseOrderRequest,
    responses(
        (status = 201, description = "Purchase order created", body = PurchaseOrderResponse),
        (status = 422, description = "Validation error or unknown supplier", body = crate::errors::FieldErrorResponse)
    )
)]
pub async fn create_order(
    order_service: web::Data<PurchaseOrderService>,
    body: web::Json<CreatePurchaseOrderRequest>,
    query: ListQuery,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let order = order_service.create_order(body.into_inner(), None).await?;
    info!("Created purchase order {} (number {})", order.id, order.number);
    Ok(created(&req, &order.id, build_item(&order, &query)?))
}

/// Get a purchase order by ID
#[utoipa::path(
    get,
    path = "/api/v1/purchases/orders/{id}",
    tag = "Purchase orders",
    params(
        ("id" = String, Path, description = "Purchase order ID")
    ),
    responses(
        (status = 200, description = "Purchase order found", body = PurchaseOrderResponse),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_order(
    order_service: web::Data<PurchaseOrderService>,
    path: web::Path<String>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let order = order_service.get_order(&path.into_inner(), None).await?;
    Ok(HttpResponse::Ok().json(build_item(&order, &query)?))
}

/// Partially update a purchase order
#[utoipa::path(
    patch,
    path = "/api/v1/purchases/orders/{id}",
    tag = "Purchase orders",
    params(
        ("id" = String, Path, description = "Purchase order ID")
    ),
    request_body = UpdatePurchaseOrderRequest,
    responses(
        (status = 200, description = "Purchase order updated", body = PurchaseOrderResponse),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::FieldErrorResponse)
    )
)]
pub async fn update_order(
    order_service: web::Data<PurchaseOrderService>,
    path: web::Path<String>,
    body: web::Json<UpdatePurchaseOrderRequest>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let order = order_service
        .update_order(&path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(build_item(&order, &query)?))
}
