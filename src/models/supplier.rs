use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Tax condition of a supplier
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum FiscalType {
    #[serde(rename = "FISCAL_CONSUMIDOR_FINAL")]
    ConsumidorFinal,
    #[serde(rename = "FISCAL_RESPONSABLE_INSCRIPTO")]
    ResponsableInscripto,
    #[serde(rename = "FISCAL_EXCENTO")]
    Exento,
    #[serde(rename = "FISCAL_MONOTRIBUTO")]
    Monotributo,
}

/// Who pays the freight of the goods
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum FreightType {
    #[serde(rename = "FREIGHT_SUPPLIER")]
    Supplier,
    #[serde(rename = "FREIGHT_CUSTOMER")]
    Customer,
}

/// Supplier document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Supplier {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub fancy_name: Option<String>,
    /// Eleven digits, without dashes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuit: Option<String>,
    pub fiscal_type: Option<FiscalType>,
    /// Payment term in days
    pub payment_term: Option<i64>,
    /// Delivery lead time in days
    pub leap_time: Option<i64>,
    pub freight_type: Option<FreightType>,
    pub notes: Option<String>,
    pub created: DateTime,
    pub modified: DateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::to_document;

    #[test]
    fn test_supplier_without_cuit_omits_the_key() {
        let supplier = Supplier {
            id: None,
            name: "Acme".to_string(),
            fancy_name: None,
            cuit: None,
            fiscal_type: None,
            payment_term: None,
            leap_time: None,
            freight_type: None,
            notes: None,
            created: DateTime::now(),
            modified: DateTime::now(),
        };
        let doc = to_document(&supplier).unwrap();
        assert!(!doc.contains_key("cuit"));
        assert_eq!(doc.get_str("name").unwrap(), "Acme");
    }
}
