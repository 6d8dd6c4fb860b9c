//! Supplier response models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::responses::to_utc;
use crate::models::{FiscalType, FreightType, Supplier};
use crate::rest::{FieldDescriptor, FieldKind, Resource};
use crate::validators::format_cuit;

/// Supplier data returned in API responses
#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct SupplierResponse {
    pub id: String,
    pub name: String,
    pub fancy_name: Option<String>,
    /// CUIT rendered as `XX-XXXXXXXX-X`
    #[schema(example = "30-50001091-2")]
    pub cuit: Option<String>,
    pub fiscal_type: Option<FiscalType>,
    pub payment_term: Option<i64>,
    pub leap_time: Option<i64>,
    pub freight_type: Option<FreightType>,
    pub notes: Option<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Resource for SupplierResponse {
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::stored_as("id", "_id", FieldKind::ObjectId),
        FieldDescriptor::new("name", FieldKind::String),
        FieldDescriptor::new("fancy_name", FieldKind::String),
        FieldDescriptor::new("cuit", FieldKind::String),
        FieldDescriptor::new("fiscal_type", FieldKind::String),
        FieldDescriptor::new("payment_term", FieldKind::Integer),
        FieldDescriptor::new("leap_time", FieldKind::Integer),
        FieldDescriptor::new("freight_type", FieldKind::String),
        FieldDescriptor::new("notes", FieldKind::String),
        FieldDescriptor::new("created", FieldKind::DateTime),
        FieldDescriptor::new("modified", FieldKind::DateTime),
    ];
}

impl From<Supplier> for SupplierResponse {
    fn from(supplier: Supplier) -> Self {
        Self {
            id: supplier.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: supplier.name,
            fancy_name: supplier.fancy_name,
            cuit: supplier.cuit.as_deref().map(format_cuit),
            fiscal_type: supplier.fiscal_type,
            payment_term: supplier.payment_term,
            leap_time: supplier.leap_time,
            freight_type: supplier.freight_type,
            notes: supplier.notes,
            created: to_utc(supplier.created),
            modified: to_utc(supplier.modified),
        }
    }
}
