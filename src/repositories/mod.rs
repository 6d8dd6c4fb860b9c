//! Repository layer for database operations.
//!
//! This module provides a clean separation between business logic (services)
//! and database operations (repositories). A single generic [`Repository`]
//! wraps each typed collection; [`Repositories`] bundles them and is built
//! once at startup.

pub mod repository;

pub use repository::Repository;

use std::sync::Arc;

use log::info;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::IndexOptions;
use mongodb::{Database, IndexModel};

use crate::constants::{
    COLLECTION_ATTENDANCE_PUNCHES, COLLECTION_BANKS, COLLECTION_BANK_ACCOUNTS,
    COLLECTION_BANK_ACCOUNT_TYPES, COLLECTION_EMPLOYEES, COLLECTION_PURCHASE_ORDERS,
    COLLECTION_SUPPLIERS,
};
use crate::errors::ApiError;
use crate::models::{
    AttendancePunch, Bank, BankAccount, BankAccountType, Employee, PurchaseOrder, Supplier,
};

/// Every repository of the application, sharing one database handle.
#[derive(Clone)]
pub struct Repositories {
    pub banks: Arc<Repository<Bank>>,
    pub account_types: Arc<Repository<BankAccountType>>,
    pub bank_accounts: Arc<Repository<BankAccount>>,
    pub suppliers: Arc<Repository<Supplier>>,
    pub purchase_orders: Arc<Repository<PurchaseOrder>>,
    pub employees: Arc<Repository<Employee>>,
    pub punches: Arc<Repository<AttendancePunch>>,
}

impl Repositories {
    pub fn new(db: &Database) -> Self {
        Self {
            banks: Arc::new(Repository::new(db, COLLECTION_BANKS)),
            account_types: Arc::new(Repository::new(db, COLLECTION_BANK_ACCOUNT_TYPES)),
            bank_accounts: Arc::new(Repository::new(db, COLLECTION_BANK_ACCOUNTS)),
            suppliers: Arc::new(Repository::new(db, COLLECTION_SUPPLIERS)),
            purchase_orders: Arc::new(Repository::new(db, COLLECTION_PURCHASE_ORDERS)),
            employees: Arc::new(Repository::new(db, COLLECTION_EMPLOYEES)),
            punches: Arc::new(Repository::new(db, COLLECTION_ATTENDANCE_PUNCHES)),
        }
    }

    /// Create database indexes for unique and commonly queried fields.
    ///
    /// This method should be called once during application startup.
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes...");

        self.banks.create_indexes(vec![unique("name", false)]).await?;
        self.account_types
            .create_indexes(vec![unique("name", true), unique("abbr", true)])
            .await?;
        self.bank_accounts
            .create_indexes(vec![
                IndexModel::builder().keys(doc! { "bank_id": 1 }).build(),
                IndexModel::builder().keys(doc! { "supplier_id": 1 }).build(),
            ])
            .await?;
        self.suppliers.create_indexes(vec![unique("cuit", true)]).await?;
        self.purchase_orders
            .create_indexes(vec![
                unique("number", false),
                IndexModel::builder().keys(doc! { "supplier_id": 1 }).build(),
            ])
            .await?;
        self.employees
            .create_indexes(vec![unique("file_no", true), unique("user_code", true)])
            .await?;
        // Monthly attendance reads scan one employee's punches by date
        self.punches
            .create_indexes(vec![IndexModel::builder()
                .keys(doc! { "user_code": 1, "datetime": 1 })
                .build()])
            .await?;

        info!("Database indexes created successfully");
        Ok(())
    }
}

/// Unique index on a single field. Sparse indexes let several documents
/// leave the field unset, which requires the field to be absent rather than
/// null.
fn unique(field: &str, sparse: bool) -> IndexModel {
    let mut keys = mongodb::bson::Document::new();
    keys.insert(field, 1);
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).sparse(sparse).build())
        .build()
}

/// Parse a path identifier. Malformed identifiers are reported the same way
/// as missing records.
pub fn parse_object_id(raw: &str, not_found: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| ApiError::not_found(not_found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_malformed_id_is_not_found() {
        let err = parse_object_id("not-an-id", "Bank not found").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_valid_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex(), "x").unwrap(), id);
    }

    #[test]
    fn test_unique_index_options() {
        let index = unique("cuit", true);
        assert_eq!(index.keys, doc! { "cuit": 1 });
        let options = index.options.unwrap();
        assert_eq!(options.unique, Some(true));
        assert_eq!(options.sparse, Some(true));
    }
}
