//! Bank and bank account type management.

use std::sync::Arc;

use log::{info, warn};
use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::constants::{
    CODE_REFERENCED, ERR_ACCOUNT_TYPE_ABBR_EXISTS, ERR_ACCOUNT_TYPE_NAME_EXISTS,
    ERR_ACCOUNT_TYPE_NOT_FOUND, ERR_BANK_NAME_EXISTS, ERR_BANK_NOT_FOUND,
    ERR_DELETE_ACCOUNT_TYPE, ERR_DELETE_BANK,
};
use crate::errors::ApiError;
use crate::models::{
    Bank, BankAccount, BankAccountType, BankAccountTypeResponse, BankResponse,
    CreateAccountTypeRequest, CreateBankRequest, UpdateAccountTypeRequest, UpdateBankRequest,
};
use crate::repositories::{parse_object_id, Repositories, Repository};
use crate::rest::ListSource;
use crate::validators::{field_errors, validate_payload};

pub struct BankService {
    banks: Arc<Repository<Bank>>,
    bank_accounts: Arc<Repository<BankAccount>>,
}

impl BankService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            banks: Arc::clone(&repositories.banks),
            bank_accounts: Arc::clone(&repositories.bank_accounts),
        }
    }

    async fn find(&self, id: ObjectId) -> Result<Bank, ApiError> {
        self.banks.find_by_id(id).await?.ok_or_else(|| {
            warn!("Bank not found with id: {}", id);
            ApiError::not_found(ERR_BANK_NOT_FOUND)
        })
    }

    async fn check_unique_name(&self, name: &str, exclude: Option<ObjectId>) -> Result<(), ApiError> {
        if self.banks.is_taken("name", name, exclude).await? {
            warn!("Bank name {} already taken", name);
            return Err(ApiError::field_conflict("name", ERR_BANK_NAME_EXISTS));
        }
        Ok(())
    }

    pub async fn get_bank(&self, id: &str) -> Result<BankResponse, ApiError> {
        let id = parse_object_id(id, ERR_BANK_NOT_FOUND)?;
        Ok(self.find(id).await?.into())
    }

    pub async fn create_bank(&self, req: CreateBankRequest) -> Result<BankResponse, ApiError> {
        validate_payload(&req)?;
        let name = req.name.unwrap_or_default();
        self.check_unique_name(&name, None).await?;

        let mut bank = Bank {
            id: None,
            name,
            bcra_code: req.bcra_code,
            cuit: req.cuit,
        };
        let id = self.banks.insert(&bank).await?;
        info!("Bank created: {}", id);
        bank.id = Some(id);
        Ok(bank.into())
    }

    pub async fn update_bank(
        &self,
        id: &str,
        req: UpdateBankRequest,
    ) -> Result<BankResponse, ApiError> {
        let id = parse_object_id(id, ERR_BANK_NOT_FOUND)?;
        self.find(id).await?;
        validate_payload(&req)?;

        let mut update = Document::new();
        if let Some(name) = req.name {
            self.check_unique_name(&name, Some(id)).await?;
            update.insert("name", name);
        }
        if let Some(bcra_code) = req.bcra_code {
            update.insert("bcra_code", bcra_code);
        }
        if let Some(cuit) = req.cuit {
            update.insert("cuit", cuit);
        }
        self.banks.update(id, update).await?;
        info!("Bank updated: {}", id);

        Ok(self.find(id).await?.into())
    }

    /// Banks with accounts cannot be deleted.
    pub async fn delete_bank(&self, id: &str) -> Result<(), ApiError> {
        let id = parse_object_id(id, ERR_BANK_NOT_FOUND)?;
        self.find(id).await?;

        if self.bank_accounts.exists(doc! { "bank_id": id }).await? {
            warn!("Bank {} still has accounts", id);
            return Err(ApiError::conflict(CODE_REFERENCED, ERR_DELETE_BANK));
        }
        self.banks.delete(id).await?;
        info!("Bank deleted: {}", id);
        Ok(())
    }
}

impl ListSource for BankService {
    type Item = BankResponse;

    async fn count(&self, filter: Document) -> Result<u64, ApiError> {
        self.banks.count(filter).await
    }

    async fn fetch(
        &self,
        filter: Document,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<BankResponse>, ApiError> {
        let banks = self
            .banks
            .find_many(filter, doc! { "name": 1 }, skip, limit)
            .await?;
        Ok(banks.into_iter().map(Into::into).collect())
    }
}

pub struct AccountTypeService {
    account_types: Arc<Repository<BankAccountType>>,
    bank_accounts: Arc<Repository<BankAccount>>,
}

impl AccountTypeService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            account_types: Arc::clone(&repositories.account_types),
            bank_accounts: Arc::clone(&repositories.bank_accounts),
        }
    }

    async fn find(&self, id: ObjectId) -> Result<BankAccountType, ApiError> {
        self.account_types.find_by_id(id).await?.ok_or_else(|| {
            warn!("Bank account type not found with id: {}", id);
            ApiError::not_found(ERR_ACCOUNT_TYPE_NOT_FOUND)
        })
    }

    /// Both `name` and `abbr` are unique; conflicts on either are reported
    /// together.
    async fn check_unique(
        &self,
        name: Option<&str>,
        abbr: Option<&str>,
        exclude: Option<ObjectId>,
    ) -> Result<(), ApiError> {
        let mut failures = Vec::new();
        if let Some(name) = name {
            if self.account_types.is_taken("name", name, exclude).await? {
                failures.push(("name", ERR_ACCOUNT_TYPE_NAME_EXISTS));
            }
        }
        if let Some(abbr) = abbr {
            if self.account_types.is_taken("abbr", abbr, exclude).await? {
                failures.push(("abbr", ERR_ACCOUNT_TYPE_ABBR_EXISTS));
            }
        }
        match field_errors(failures) {
            Some(messages) => {
                warn!("Bank account type uniqueness failed: {:?}", messages);
                Err(ApiError::FieldConflict { messages })
            }
            None => Ok(()),
        }
    }

    pub async fn get_account_type(&self, id: &str) -> Result<BankAccountTypeResponse, ApiError> {
        let id = parse_object_id(id, ERR_ACCOUNT_TYPE_NOT_FOUND)?;
        Ok(self.find(id).await?.into())
    }

    pub async fn create_account_type(
        &self,
        req: CreateAccountTypeRequest,
    ) -> Result<BankAccountTypeResponse, ApiError> {
        validate_payload(&req)?;
        let name = req.name.unwrap_or_default();
        self.check_unique(Some(&name), req.abbr.as_deref(), None)
            .await?;

        let mut account_type = BankAccountType {
            id: None,
            name,
            abbr: req.abbr,
        };
        let id = self.account_types.insert(&account_type).await?;
        info!("Bank account type created: {}", id);
        account_type.id = Some(id);
        Ok(account_type.into())
    }

    pub async fn update_account_type(
        &self,
        id: &str,
        req: UpdateAccountTypeRequest,
    ) -> Result<BankAccountTypeResponse, ApiError> {
        let id = parse_object_id(id, ERR_ACCOUNT_TYPE_NOT_FOUND)?;
        self.find(id).await?;
        validate_payload(&req)?;
        self.check_unique(req.name.as_deref(), req.abbr.as_deref(), Some(id))
            .await?;

        let mut update = Document::new();
        if let Some(name) = req.name {
            update.insert("name", name);
        }
        if let Some(abbr) = req.abbr {
            update.insert("abbr", abbr);
        }
        self.account_types.update(id, update).await?;
        info!("Bank account type updated: {}", id);

        Ok(self.find(id).await?.into())
    }

    pub async fn delete_account_type(&self, id: &str) -> Result<(), ApiError> {
        let id = parse_object_id(id, ERR_ACCOUNT_TYPE_NOT_FOUND)?;
        self.find(id).await?;

        if self.bank_accounts.exists(doc! { "type_id": id }).await? {
            warn!("Bank account type {} still in use", id);
            return Err(ApiError::conflict(CODE_REFERENCED, ERR_DELETE_ACCOUNT_TYPE));
        }
        self.account_types.delete(id).await?;
        info!("Bank account type deleted: {}", id);
        Ok(())
    }
}

impl ListSource for AccountTypeService {
    type Item = BankAccountTypeResponse;

    async fn count(&self, filter: Document) -> Result<u64, ApiError> {
        self.account_types.count(filter).await
    }

    async fn fetch(
        &self,
        filter: Document,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<BankAccountTypeResponse>, ApiError> {
        let account_types = self
            .account_types
            .find_many(filter, doc! { "name": 1 }, skip, limit)
            .await?;
        Ok(account_types.into_iter().map(Into::into).collect())
    }
}
