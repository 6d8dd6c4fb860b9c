//! Purchase order management, globally and scoped to a supplier.

use std::sync::Arc;

use log::{info, warn};
use mongodb::bson::{doc, oid::ObjectId, to_bson, DateTime, Document};

use crate::constants::{ERR_PURCHASE_ORDER_NOT_FOUND, ERR_REQUIRED_FIELD, ERR_UNKNOWN_SUPPLIER};
use crate::errors::ApiError;
use crate::models::{
    CreatePurchaseOrderRequest, PurchaseOrder, PurchaseOrderItem, PurchaseOrderItemRequest,
    PurchaseOrderResponse, Supplier, UpdatePurchaseOrderRequest,
};
use crate::repositories::{parse_object_id, Repositories, Repository};
use crate::rest::ListSource;
use crate::services::{existing_reference, resolve_names};
use crate::validators::validate_payload;

pub struct PurchaseOrderService {
    purchase_orders: Arc<Repository<PurchaseOrder>>,
    suppliers: Arc<Repository<Supplier>>,
}

/// Convert request lines; lines without an explicit index keep their
/// position in the list.
fn order_items(items: Vec<PurchaseOrderItemRequest>) -> Vec<PurchaseOrderItem> {
    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| PurchaseOrderItem {
            sku: item.sku,
            description: item.description.unwrap_or_default(),
            quantity: item.quantity.unwrap_or_default(),
            received_quantity: item.received_quantity.unwrap_or(0),
            index: item.index.unwrap_or(position as i64),
        })
        .collect()
}

impl PurchaseOrderService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            purchase_orders: Arc::clone(&repositories.purchase_orders),
            suppliers: Arc::clone(&repositories.suppliers),
        }
    }

    async fn resolve(&self, orders: Vec<PurchaseOrder>) -> Result<Vec<PurchaseOrderResponse>, ApiError> {
        let suppliers = resolve_names(&self.suppliers, orders.iter().map(|o| o.supplier_id)).await?;
        Ok(orders
            .into_iter()
            .map(|order| {
                let supplier_name = suppliers.get(&order.supplier_id).cloned();
                PurchaseOrderResponse::new(order, supplier_name)
            })
            .collect())
    }

    async fn resolve_one(&self, order: PurchaseOrder) -> Result<PurchaseOrderResponse, ApiError> {
        self.resolve(vec![order])
            .await?
            .pop()
            .ok_or_else(|| ApiError::not_found(ERR_PURCHASE_ORDER_NOT_FOUND))
    }

    async fn find(&self, id: ObjectId) -> Result<PurchaseOrder, ApiError> {
        self.purchase_orders.find_by_id(id).await?.ok_or_else(|| {
            warn!("Purchase order not found with id: {}", id);
            ApiError::not_found(ERR_PURCHASE_ORDER_NOT_FOUND)
        })
    }

    /// Fetch an order; with `supplier` set, orders of other suppliers are
    /// reported as missing.
    pub async fn get_order(
        &self,
        id: &str,
        supplier: Option<ObjectId>,
    ) -> Result<PurchaseOrderResponse, ApiError> {
        let id = parse_object_id(id, ERR_PURCHASE_ORDER_NOT_FOUND)?;
        let order = self.find(id).await?;
        if let Some(supplier_id) = supplier {
            if order.supplier_id != supplier_id {
                warn!("Purchase order {} does not belong to supplier {}", id, supplier_id);
                return Err(ApiError::not_found(ERR_PURCHASE_ORDER_NOT_FOUND));
            }
        }
        self.resolve_one(order).await
    }

    /// Create an order. The supplier comes from the path on supplier-scoped
    /// routes and from the payload otherwise.
    pub async fn create_order(
        &self,
        req: CreatePurchaseOrderRequest,
        supplier: Option<ObjectId>,
    ) -> Result<PurchaseOrderResponse, ApiError> {
        validate_payload(&req)?;

        let supplier_id = match (supplier, req.supplier_id.as_deref()) {
            (Some(id), _) => id,
            (None, Some(raw)) => {
                existing_reference(&self.suppliers, raw, "supplier_id", ERR_UNKNOWN_SUPPLIER)
                    .await?
            }
            (None, None) => return Err(ApiError::invalid_field("supplier_id", ERR_REQUIRED_FIELD)),
        };

        let now = DateTime::now();
        let mut order = PurchaseOrder {
            id: None,
            number: self.purchase_orders.next_number("number").await?,
            issue_date: now,
            notes: req.notes,
            status: req.status.unwrap_or_default(),
            notify: req.notify.unwrap_or_default(),
            supplier_id,
            items: order_items(req.items),
            created: now,
            modified: now,
        };
        let id = self.purchase_orders.insert(&order).await?;
        info!("Purchase order {} created with number {}", id, order.number);
        order.id = Some(id);

        self.resolve_one(order).await
    }

    pub async fn update_order(
        &self,
        id: &str,
        req: UpdatePurchaseOrderRequest,
    ) -> Result<PurchaseOrderResponse, ApiError> {
        let id = parse_object_id(id, ERR_PURCHASE_ORDER_NOT_FOUND)?;
        self.find(id).await?;
        validate_payload(&req)?;

        let mut update = Document::new();
        if let Some(notes) = req.notes {
            update.insert("notes", notes);
        }
        if let Some(status) = req.status {
            update.insert("status", to_bson(&status)?);
        }
        if let Some(notify) = req.notify {
            update.insert("notify", to_bson(&notify)?);
        }
        if let Some(items) = req.items {
            update.insert("items", to_bson(&order_items(items))?);
        }
        if !update.is_empty() {
            update.insert("modified", DateTime::now());
        }
        self.purchase_orders.update(id, update).await?;
        info!("Purchase order updated: {}", id);

        let order = self.find(id).await?;
        self.resolve_one(order).await
    }
}

impl ListSource for PurchaseOrderService {
    type Item = PurchaseOrderResponse;

    async fn count(&self, filter: Document) -> Result<u64, ApiError> {
        self.purchase_orders.count(filter).await
    }

    async fn fetch(
        &self,
        filter: Document,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<PurchaseOrderResponse>, ApiError> {
        let orders = self
            .purchase_orders
            .find_many(filter, doc! { "number": 1 }, skip, limit)
            .await?;
        self.resolve(orders).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(description: &str, index: Option<i64>) -> PurchaseOrderItemRequest {
        PurchaseOrderItemRequest {
            sku: None,
            description: Some(description.to_string()),
            quantity: Some(2),
            received_quantity: None,
            index,
        }
    }

    #[test]
    fn test_items_default_to_list_position() {
        let items = order_items(vec![line("a", None), line("b", Some(7)), line("c", None)]);
        let indexes: Vec<i64> = items.iter().map(|i| i.index).collect();
        assert_eq!(indexes, vec![0, 7, 2]);
        assert!(items.iter().all(|i| i.received_quantity == 0));
    }

    #[test]
    fn test_item_quantity_is_validated() {
        let req = CreatePurchaseOrderRequest {
            notes: None,
            status: None,
            notify: None,
            supplier_id: None,
            items: vec![line("a", None), PurchaseOrderItemRequest {
                quantity: Some(0),
                ..line("b", None)
            }],
        };
        match validate_payload(&req) {
            Err(ApiError::ValidationError { messages }) => {
                assert!(messages.contains_key("items.1.quantity"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
