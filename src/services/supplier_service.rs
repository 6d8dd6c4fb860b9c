//! Supplier management.

use std::sync::Arc;

use log::{info, warn};
use mongodb::bson::{doc, oid::ObjectId, to_bson, DateTime, Document};

use crate::constants::{
    CODE_REFERENCED, ERR_DELETE_SUPPLIER, ERR_SUPPLIER_CUIT_EXISTS, ERR_SUPPLIER_NOT_FOUND,
};
use crate::errors::ApiError;
use crate::models::{
    BankAccount, CreateSupplierRequest, PurchaseOrder, Supplier, SupplierResponse,
    UpdateSupplierRequest,
};
use crate::repositories::{parse_object_id, Repositories, Repository};
use crate::rest::ListSource;
use crate::validators::{normalize_cuit, validate_payload};

pub struct SupplierService {
    suppliers: Arc<Repository<Supplier>>,
    purchase_orders: Arc<Repository<PurchaseOrder>>,
    bank_accounts: Arc<Repository<BankAccount>>,
}

impl SupplierService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            suppliers: Arc::clone(&repositories.suppliers),
            purchase_orders: Arc::clone(&repositories.purchase_orders),
            bank_accounts: Arc::clone(&repositories.bank_accounts),
        }
    }

    async fn find(&self, id: ObjectId) -> Result<Supplier, ApiError> {
        self.suppliers.find_by_id(id).await?.ok_or_else(|| {
            warn!("Supplier not found with id: {}", id);
            ApiError::not_found(ERR_SUPPLIER_NOT_FOUND)
        })
    }

    /// Resolve the supplier of a nested route, 404 when it does not exist.
    pub async fn ensure_exists(&self, id: &str) -> Result<ObjectId, ApiError> {
        let id = parse_object_id(id, ERR_SUPPLIER_NOT_FOUND)?;
        if !self.suppliers.exists(doc! { "_id": id }).await? {
            warn!("Supplier not found with id: {}", id);
            return Err(ApiError::not_found(ERR_SUPPLIER_NOT_FOUND));
        }
        Ok(id)
    }

    /// Validated CUITs are stored as bare digits and must be unique.
    async fn unique_cuit(&self, raw: &str, exclude: Option<ObjectId>) -> Result<String, ApiError> {
        let cuit = normalize_cuit(raw).unwrap_or_else(|| raw.to_string());
        if self.suppliers.is_taken("cuit", cuit.as_str(), exclude).await? {
            warn!("Supplier CUIT {} already taken", cuit);
            return Err(ApiError::field_conflict("cuit", ERR_SUPPLIER_CUIT_EXISTS));
        }
        Ok(cuit)
    }

    pub async fn get_supplier(&self, id: &str) -> Result<SupplierResponse, ApiError> {
        let id = parse_object_id(id, ERR_SUPPLIER_NOT_FOUND)?;
        Ok(self.find(id).await?.into())
    }

    pub async fn create_supplier(
        &self,
        req: CreateSupplierRequest,
    ) -> Result<SupplierResponse, ApiError> {
        validate_payload(&req)?;
        let cuit = match req.cuit.as_deref() {
            Some(raw) => Some(self.unique_cuit(raw, None).await?),
            None => None,
        };

        let now = DateTime::now();
        let mut supplier = Supplier {
            id: None,
            name: req.name.unwrap_or_default(),
            fancy_name: req.fancy_name,
            cuit,
            fiscal_type: req.fiscal_type,
            payment_term: req.payment_term,
            leap_time: req.leap_time,
            freight_type: req.freight_type,
            notes: req.notes,
            created: now,
            modified: now,
        };
        let id = self.suppliers.insert(&supplier).await?;
        info!("Supplier created: {}", id);
        supplier.id = Some(id);
        Ok(supplier.into())
    }

    pub async fn update_supplier(
        &self,
        id: &str,
        req: UpdateSupplierRequest,
    ) -> Result<SupplierResponse, ApiError> {
        let id = parse_object_id(id, ERR_SUPPLIER_NOT_FOUND)?;
        self.find(id).await?;
        validate_payload(&req)?;

        let mut update = Document::new();
        if let Some(raw) = req.cuit.as_deref() {
            update.insert("cuit", self.unique_cuit(raw, Some(id)).await?);
        }
        if let Some(name) = req.name {
            update.insert("name", name);
        }
        if let Some(fancy_name) = req.fancy_name {
            update.insert("fancy_name", fancy_name);
        }
        if let Some(fiscal_type) = req.fiscal_type {
            update.insert("fiscal_type", to_bson(&fiscal_type)?);
        }
        if let Some(payment_term) = req.payment_term {
            update.insert("payment_term", payment_term);
        }
        if let Some(leap_time) = req.leap_time {
            update.insert("leap_time", leap_time);
        }
        if let Some(freight_type) = req.freight_type {
            update.insert("freight_type", to_bson(&freight_type)?);
        }
        if let Some(notes) = req.notes {
            update.insert("notes", notes);
        }
        if !update.is_empty() {
            update.insert("modified", DateTime::now());
        }
        self.suppliers.update(id, update).await?;
        info!("Supplier updated: {}", id);

        Ok(self.find(id).await?.into())
    }

    /// Suppliers with orders or bank accounts cannot be deleted.
    pub async fn delete_supplier(&self, id: &str) -> Result<(), ApiError> {
        let id = parse_object_id(id, ERR_SUPPLIER_NOT_FOUND)?;
        self.find(id).await?;

        let referenced = self.purchase_orders.exists(doc! { "supplier_id": id }).await?
            || self.bank_accounts.exists(doc! { "supplier_id": id }).await?;
        if referenced {
            warn!("Supplier {} still has orders or bank accounts", id);
            return Err(ApiError::conflict(CODE_REFERENCED, ERR_DELETE_SUPPLIER));
        }
        self.suppliers.delete(id).await?;
        info!("Supplier deleted: {}", id);
        Ok(())
    }
}

impl ListSource for SupplierService {
    type Item = SupplierResponse;

    async fn count(&self, filter: Document) -> Result<u64, ApiError> {
        self.suppliers.count(filter).await
    }

    async fn fetch(
        &self,
        filter: Document,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<SupplierResponse>, ApiError> {
        let suppliers = self
            .suppliers
            .find_many(filter, doc! { "name": 1 }, skip, limit)
            .await?;
        Ok(suppliers.into_iter().map(Into::into).collect())
    }
}
