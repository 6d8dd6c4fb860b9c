use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Employee document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Employee {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: Option<String>,
    pub last_name: String,
    /// `YYYY-MM-DD`
    pub birth_date: Option<String>,
    /// `YYYY-MM-DD`
    pub hire_date: Option<String>,
    /// Eleven digits, without dashes
    pub cuil: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_no: Option<i64>,
    /// Code the employee punches in with on the time clock
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_code: Option<i64>,
    pub created: DateTime,
    pub modified: DateTime,
}

/// A single time clock punch. The datetime holds local wall-clock time.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AttendancePunch {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_code: i64,
    pub datetime: DateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::to_document;

    #[test]
    fn test_unset_unique_fields_are_not_stored() {
        let employee = Employee {
            id: None,
            first_name: None,
            last_name: "Perez".to_string(),
            birth_date: None,
            hire_date: None,
            cuil: None,
            file_no: None,
            user_code: None,
            created: DateTime::now(),
            modified: DateTime::now(),
        };
        let doc = to_document(&employee).unwrap();
        assert!(!doc.contains_key("file_no"));
        assert!(!doc.contains_key("user_code"));
        assert!(!doc.contains_key("_id"));
    }

    #[test]
    fn test_set_unique_fields_are_stored() {
        let employee = Employee {
            id: None,
            first_name: Some("Juan".to_string()),
            last_name: "Perez".to_string(),
            birth_date: None,
            hire_date: None,
            cuil: None,
            file_no: Some(12),
            user_code: Some(7),
            created: DateTime::now(),
            modified: DateTime::now(),
        };
        let doc = to_document(&employee).unwrap();
        assert_eq!(doc.get_i64("file_no").unwrap(), 12);
        assert_eq!(doc.get_i64("user_code").unwrap(), 7);
    }
}
