use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{NotifyMethod, OrderStatus};

/// Line of a purchase order request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PurchaseOrderItemRequest {
    #[schema(example = "AB-1234")]
    pub sku: Option<String>,
    #[validate(required(message = "Missing data for required field."))]
    #[schema(example = "Tornillo 3/8")]
    pub description: Option<String>,
    #[validate(
        required(message = "Missing data for required field."),
        range(min = 1, message = "Must be greater than or equal to 1.")
    )]
    #[schema(example = 10)]
    pub quantity: Option<i64>,
    #[validate(range(min = 0, message = "Must be greater than or equal to 0."))]
    pub received_quantity: Option<i64>,
    /// Position in the order; defaults to the position in the list
    #[validate(range(min = 0, message = "Must be greater than or equal to 0."))]
    pub index: Option<i64>,
}

/// Request payload for creating a purchase order
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePurchaseOrderRequest {
    pub notes: Option<String>,
    pub status: Option<OrderStatus>,
    pub notify: Option<NotifyMethod>,
    /// Supplier ID; taken from the path on supplier-scoped routes
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub supplier_id: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<PurchaseOrderItemRequest>,
}

/// Request payload for a partial purchase order update
///
/// `items`, when present, replaces the whole list.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePurchaseOrderRequest {
    pub notes: Option<String>,
    pub status: Option<OrderStatus>,
    pub notify: Option<NotifyMethod>,
    #[validate(nested)]
    pub items: Option<Vec<PurchaseOrderItemRequest>>,
}
