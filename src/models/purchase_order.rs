use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
pub enum OrderStatus {
    #[serde(rename = "STATUS_CANCELLED")]
    Cancelled,
    #[serde(rename = "STATUS_QUOTING")]
    Quoting,
    #[serde(rename = "STATUS_PENDING")]
    Pending,
    #[serde(rename = "STATUS_PARTIAL")]
    Partial,
    #[serde(rename = "STATUS_CONFIRMED")]
    Confirmed,
    #[serde(rename = "STATUS_CLOSED")]
    Closed,
    #[default]
    #[serde(rename = "STATUS_DRAFT")]
    Draft,
}

/// How the supplier gets notified of the order
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
pub enum NotifyMethod {
    #[default]
    #[serde(rename = "NOTIFY_EMAIL")]
    Email,
    #[serde(rename = "NOTIFY_FAX")]
    Fax,
    #[serde(rename = "NOTIFY_PHONE")]
    Phone,
    #[serde(rename = "NOTIFY_PERSONALLY")]
    Personally,
}

/// Line of a purchase order, embedded in the order document
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PurchaseOrderItem {
    pub sku: Option<String>,
    pub description: String,
    pub quantity: i64,
    #[serde(default)]
    pub received_quantity: i64,
    pub index: i64,
}

/// Purchase order document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PurchaseOrder {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub number: i64,
    pub issue_date: DateTime,
    pub notes: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub notify: NotifyMethod,
    pub supplier_id: ObjectId,
    #[serde(default)]
    pub items: Vec<PurchaseOrderItem>,
    pub created: DateTime,
    pub modified: DateTime,
}
