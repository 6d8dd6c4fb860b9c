use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Bank document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Bank {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    /// Code assigned by the central bank
    pub bcra_code: Option<String>,
    pub cuit: Option<String>,
}

/// Kind of bank account, e.g. checking account in pesos
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BankAccountType {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbr: Option<String>,
}

/// Bank account document; owned by a supplier when `supplier_id` is set
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BankAccount {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub bank_id: ObjectId,
    pub bank_branch: Option<String>,
    pub type_id: ObjectId,
    pub account_number: Option<String>,
    pub account_cbu: Option<String>,
    pub account_owner: Option<String>,
    pub supplier_id: Option<ObjectId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::to_document;

    #[test]
    fn test_account_type_without_abbr_omits_the_key() {
        let account_type = BankAccountType {
            id: None,
            name: "Cuenta corriente".to_string(),
            abbr: None,
        };
        let doc = to_document(&account_type).unwrap();
        assert!(!doc.contains_key("abbr"));
    }

    #[test]
    fn test_account_type_round_trips_missing_abbr() {
        let doc = mongodb::bson::doc! { "name": "Caja de ahorro" };
        let account_type: BankAccountType = mongodb::bson::from_document(doc).unwrap();
        assert_eq!(account_type.abbr, None);
    }
}
