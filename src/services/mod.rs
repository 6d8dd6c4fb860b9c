//! Services organized by domain concern.
//!
//! Each service owns the business rules of one resource and implements
//! [`ListSource`](crate::rest::ListSource) so handlers can hand it to
//! `build_result`.

pub mod bank_account_service;
pub mod bank_service;
pub mod employee_service;
pub mod purchase_order_service;
pub mod supplier_service;

pub use bank_account_service::BankAccountService;
pub use bank_service::{AccountTypeService, BankService};
pub use employee_service::EmployeeService;
pub use purchase_order_service::PurchaseOrderService;
pub use supplier_service::SupplierService;

use std::collections::{BTreeSet, HashMap};

use log::warn;
use mongodb::bson::{doc, oid::ObjectId};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::ApiError;
use crate::models::{Bank, BankAccountType, Supplier};
use crate::repositories::Repository;

/// Documents other resources refer to by id and render by name.
pub(crate) trait Named {
    fn object_id(&self) -> Option<ObjectId>;
    fn display_name(&self) -> &str;
}

impl Named for Bank {
    fn object_id(&self) -> Option<ObjectId> {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Named for BankAccountType {
    fn object_id(&self) -> Option<ObjectId> {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Named for Supplier {
    fn object_id(&self) -> Option<ObjectId> {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Load the names of the referenced documents with a single query.
pub(crate) async fn resolve_names<T>(
    repository: &Repository<T>,
    ids: impl IntoIterator<Item = ObjectId>,
) -> Result<HashMap<ObjectId, String>, ApiError>
where
    T: Named + Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    let ids: BTreeSet<ObjectId> = ids.into_iter().collect();
    let documents = repository.find_by_ids(ids.into_iter().collect()).await?;
    Ok(documents
        .iter()
        .filter_map(|d| d.object_id().map(|id| (id, d.display_name().to_string())))
        .collect())
}

/// Parse a referenced id and make sure the document exists; failures are
/// reported on `field`.
pub(crate) async fn existing_reference<T>(
    repository: &Repository<T>,
    raw: &str,
    field: &str,
    message: &str,
) -> Result<ObjectId, ApiError>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    let id = ObjectId::parse_str(raw.trim()).map_err(|_| ApiError::invalid_field(field, message))?;
    if !repository.exists(doc! { "_id": id }).await? {
        warn!("Reference {} = {} does not exist", field, id);
        return Err(ApiError::invalid_field(field, message));
    }
    Ok(id)
}
