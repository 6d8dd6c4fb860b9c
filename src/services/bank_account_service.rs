//! Bank account management. Accounts reference a bank, an account type and
//! optionally the supplier that owns them.

use std::sync::Arc;

use log::{info, warn};
use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::constants::{
    ERR_BANK_ACCOUNT_NOT_FOUND, ERR_UNKNOWN_ACCOUNT_TYPE, ERR_UNKNOWN_BANK, ERR_UNKNOWN_SUPPLIER,
};
use crate::errors::ApiError;
use crate::models::{
    Bank, BankAccount, BankAccountResponse, BankAccountType, CreateBankAccountRequest, Supplier,
};
use crate::repositories::{parse_object_id, Repositories, Repository};
use crate::rest::ListSource;
use crate::services::{existing_reference, resolve_names};
use crate::validators::validate_payload;

pub struct BankAccountService {
    bank_accounts: Arc<Repository<BankAccount>>,
    banks: Arc<Repository<Bank>>,
    account_types: Arc<Repository<BankAccountType>>,
    suppliers: Arc<Repository<Supplier>>,
}

impl BankAccountService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            bank_accounts: Arc::clone(&repositories.bank_accounts),
            banks: Arc::clone(&repositories.banks),
            account_types: Arc::clone(&repositories.account_types),
            suppliers: Arc::clone(&repositories.suppliers),
        }
    }

    /// Attach bank, account type and supplier names to a page of accounts.
    async fn resolve(&self, accounts: Vec<BankAccount>) -> Result<Vec<BankAccountResponse>, ApiError> {
        let banks = resolve_names(&self.banks, accounts.iter().map(|a| a.bank_id)).await?;
        let types = resolve_names(&self.account_types, accounts.iter().map(|a| a.type_id)).await?;
        let suppliers =
            resolve_names(&self.suppliers, accounts.iter().filter_map(|a| a.supplier_id)).await?;

        Ok(accounts
            .into_iter()
            .map(|account| {
                let bank = banks.get(&account.bank_id).cloned();
                let account_type = types.get(&account.type_id).cloned();
                let supplier_name = account
                    .supplier_id
                    .and_then(|id| suppliers.get(&id).cloned());
                BankAccountResponse::new(account, bank, account_type, supplier_name)
            })
            .collect())
    }

    async fn find(&self, id: ObjectId) -> Result<BankAccount, ApiError> {
        self.bank_accounts.find_by_id(id).await?.ok_or_else(|| {
            warn!("Bank account not found with id: {}", id);
            ApiError::not_found(ERR_BANK_ACCOUNT_NOT_FOUND)
        })
    }

    pub async fn get_bank_account(&self, id: &str) -> Result<BankAccountResponse, ApiError> {
        let id = parse_object_id(id, ERR_BANK_ACCOUNT_NOT_FOUND)?;
        let account = self.find(id).await?;
        self.resolve(vec![account])
            .await?
            .pop()
            .ok_or_else(|| ApiError::not_found(ERR_BANK_ACCOUNT_NOT_FOUND))
    }

    pub async fn create_bank_account(
        &self,
        req: CreateBankAccountRequest,
    ) -> Result<BankAccountResponse, ApiError> {
        validate_payload(&req)?;

        let bank_id = existing_reference(
            &self.banks,
            req.bank_id.as_deref().unwrap_or_default(),
            "bank_id",
            ERR_UNKNOWN_BANK,
        )
        .await?;
        let type_id = existing_reference(
            &self.account_types,
            req.type_id.as_deref().unwrap_or_default(),
            "type_id",
            ERR_UNKNOWN_ACCOUNT_TYPE,
        )
        .await?;
        let supplier_id = match req.supplier_id.as_deref() {
            Some(raw) => Some(
                existing_reference(&self.suppliers, raw, "supplier_id", ERR_UNKNOWN_SUPPLIER)
                    .await?,
            ),
            None => None,
        };

        let mut account = BankAccount {
            id: None,
            bank_id,
            bank_branch: req.branch,
            type_id,
            account_number: req.number,
            account_cbu: req.cbu,
            account_owner: req.owner,
            supplier_id,
        };
        let id = self.bank_accounts.insert(&account).await?;
        info!("Bank account created: {}", id);
        account.id = Some(id);

        self.resolve(vec![account])
            .await?
            .pop()
            .ok_or_else(|| ApiError::internal("Created bank account vanished"))
    }

    pub async fn delete_bank_account(&self, id: &str) -> Result<(), ApiError> {
        let id = parse_object_id(id, ERR_BANK_ACCOUNT_NOT_FOUND)?;
        if !self.bank_accounts.delete(id).await? {
            warn!("Bank account not found with id: {}", id);
            return Err(ApiError::not_found(ERR_BANK_ACCOUNT_NOT_FOUND));
        }
        info!("Bank account deleted: {}", id);
        Ok(())
    }
}

impl ListSource for BankAccountService {
    type Item = BankAccountResponse;

    async fn count(&self, filter: Document) -> Result<u64, ApiError> {
        self.bank_accounts.count(filter).await
    }

    async fn fetch(
        &self,
        filter: Document,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<BankAccountResponse>, ApiError> {
        let accounts = self
            .bank_accounts
            .find_many(filter, doc! { "_id": 1 }, skip, limit)
            .await?;
        self.resolve(accounts).await
    }
}
