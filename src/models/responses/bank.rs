//! Bank-related response models.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Bank, BankAccount, BankAccountType};
use crate::rest::{FieldDescriptor, FieldKind, Resource};

/// Bank data returned in API responses
#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct BankResponse {
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    #[schema(example = "Banco de la Nación Argentina")]
    pub name: String,
    pub bcra_code: Option<String>,
    pub cuit: Option<String>,
}

impl Resource for BankResponse {
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::stored_as("id", "_id", FieldKind::ObjectId),
        FieldDescriptor::new("name", FieldKind::String),
        FieldDescriptor::new("bcra_code", FieldKind::String),
        FieldDescriptor::new("cuit", FieldKind::String),
    ];
}

impl From<Bank> for BankResponse {
    fn from(bank: Bank) -> Self {
        Self {
            id: bank.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: bank.name,
            bcra_code: bank.bcra_code,
            cuit: bank.cuit,
        }
    }
}

/// Bank account type data returned in API responses
#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct BankAccountTypeResponse {
    pub id: String,
    #[schema(example = "Cuenta Corriente en Pesos")]
    pub name: String,
    #[schema(example = "CC $")]
    pub abbr: Option<String>,
}

impl Resource for BankAccountTypeResponse {
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::stored_as("id", "_id", FieldKind::ObjectId),
        FieldDescriptor::new("name", FieldKind::String),
        FieldDescriptor::new("abbr", FieldKind::String),
    ];
}

impl From<BankAccountType> for BankAccountTypeResponse {
    fn from(account_type: BankAccountType) -> Self {
        Self {
            id: account_type.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: account_type.name,
            abbr: account_type.abbr,
        }
    }
}

/// Bank account data returned in API responses, with the names of the
/// referenced records resolved
#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct BankAccountResponse {
    pub id: String,
    /// Bank name
    pub bank: Option<String>,
    pub bank_id: String,
    pub branch: Option<String>,
    /// Account type name
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    pub type_id: String,
    pub number: Option<String>,
    pub cbu: Option<String>,
    pub owner: Option<String>,
    pub supplier_id: Option<String>,
    pub supplier_name: Option<String>,
}

impl Resource for BankAccountResponse {
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::stored_as("id", "_id", FieldKind::ObjectId),
        FieldDescriptor::computed("bank", FieldKind::String),
        FieldDescriptor::new("bank_id", FieldKind::ObjectId),
        FieldDescriptor::stored_as("branch", "bank_branch", FieldKind::String),
        FieldDescriptor::computed("type", FieldKind::String),
        FieldDescriptor::new("type_id", FieldKind::ObjectId),
        FieldDescriptor::stored_as("number", "account_number", FieldKind::String),
        FieldDescriptor::stored_as("cbu", "account_cbu", FieldKind::String),
        FieldDescriptor::stored_as("owner", "account_owner", FieldKind::String),
        FieldDescriptor::new("supplier_id", FieldKind::ObjectId),
        FieldDescriptor::computed("supplier_name", FieldKind::String),
    ];
}

impl BankAccountResponse {
    pub fn new(
        account: BankAccount,
        bank: Option<String>,
        account_type: Option<String>,
        supplier_name: Option<String>,
    ) -> Self {
        Self {
            id: account.id.map(|id| id.to_hex()).unwrap_or_default(),
            bank,
            bank_id: account.bank_id.to_hex(),
            branch: account.bank_branch,
            account_type,
            type_id: account.type_id.to_hex(),
            number: account.account_number,
            cbu: account.account_cbu,
            owner: account.account_owner,
            supplier_id: account.supplier_id.map(|id| id.to_hex()),
            supplier_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::projection::Projection;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    #[test]
    fn test_account_serializes_public_names() {
        let bank_id = ObjectId::new();
        let type_id = ObjectId::new();
        let account = BankAccount {
            id: None,
            bank_id,
            bank_branch: Some("Centro".to_string()),
            type_id,
            account_number: Some("123/4".to_string()),
            account_cbu: None,
            account_owner: None,
            supplier_id: None,
        };
        let response = BankAccountResponse::new(
            account,
            Some("Nación".to_string()),
            Some("Caja de Ahorro".to_string()),
            None,
        );
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["type"], "Caja de Ahorro");
        assert_eq!(value["branch"], "Centro");
        assert_eq!(value["bank_id"], json!(bank_id.to_hex()));

        let p = Projection::for_resource::<BankAccountResponse, &str>(&["bank", "type"], &[]);
        let projected = p.apply(value);
        assert_eq!(
            projected,
            json!({ "id": "", "bank": "Nación", "type": "Caja de Ahorro" })
        );
    }
}
