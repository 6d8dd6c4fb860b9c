//! Purchase order response models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::responses::to_utc;
use crate::models::{NotifyMethod, OrderStatus, PurchaseOrder, PurchaseOrderItem};
use crate::rest::{FieldDescriptor, FieldKind, Resource};

#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct PurchaseOrderItemResponse {
    pub sku: Option<String>,
    pub description: String,
    pub quantity: i64,
    pub received_quantity: i64,
    pub index: i64,
}

impl From<PurchaseOrderItem> for PurchaseOrderItemResponse {
    fn from(item: PurchaseOrderItem) -> Self {
        Self {
            sku: item.sku,
            description: item.description,
            quantity: item.quantity,
            received_quantity: item.received_quantity,
            index: item.index,
        }
    }
}

/// Purchase order data returned in API responses
#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct PurchaseOrderResponse {
    pub id: String,
    #[schema(example = 1)]
    pub number: i64,
    /// When the order was issued
    pub issue: DateTime<Utc>,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub notify: NotifyMethod,
    pub supplier_id: String,
    pub supplier_name: Option<String>,
    pub items: Vec<PurchaseOrderItemResponse>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Resource for PurchaseOrderResponse {
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::stored_as("id", "_id", FieldKind::ObjectId),
        FieldDescriptor::new("number", FieldKind::Integer),
        FieldDescriptor::stored_as("issue", "issue_date", FieldKind::DateTime),
        FieldDescriptor::new("notes", FieldKind::String),
        FieldDescriptor::new("status", FieldKind::String),
        FieldDescriptor::new("notify", FieldKind::String),
        FieldDescriptor::new("supplier_id", FieldKind::ObjectId),
        FieldDescriptor::computed("supplier_name", FieldKind::String),
        FieldDescriptor::new("items", FieldKind::Nested),
        FieldDescriptor::new("items.sku", FieldKind::String),
        FieldDescriptor::new("items.description", FieldKind::String),
        FieldDescriptor::new("items.quantity", FieldKind::Integer),
        FieldDescriptor::new("created", FieldKind::DateTime),
        FieldDescriptor::new("modified", FieldKind::DateTime),
    ];
}

impl PurchaseOrderResponse {
    pub fn new(order: PurchaseOrder, supplier_name: Option<String>) -> Self {
        let mut items: Vec<PurchaseOrderItemResponse> =
            order.items.into_iter().map(Into::into).collect();
        items.sort_by_key(|item| item.index);
        Self {
            id: order.id.map(|id| id.to_hex()).unwrap_or_default(),
            number: order.number,
            issue: to_utc(order.issue_date),
            notes: order.notes,
            status: order.status,
            notify: order.notify,
            supplier_id: order.supplier_id.to_hex(),
            supplier_name,
            items,
            created: to_utc(order.created),
            modified: to_utc(order.modified),
        }
    }
}
