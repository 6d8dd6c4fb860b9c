//! Employee and attendance response models.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::responses::to_utc;
use crate::models::{AttendancePunch, Employee};
use crate::rest::{FieldDescriptor, FieldKind, Resource};
use crate::utils::attendance::{IntervalInfo, Record};
use crate::validators::format_cuit;

/// Employee data returned in API responses
#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct EmployeeResponse {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: String,
    #[schema(example = "1980-05-17")]
    pub birth_date: Option<String>,
    #[schema(example = "2010-02-01")]
    pub hire_date: Option<String>,
    /// CUIL rendered as `XX-XXXXXXXX-X`
    pub cuil: Option<String>,
    pub file_no: Option<i64>,
    pub user_code: Option<i64>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Resource for EmployeeResponse {
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::stored_as("id", "_id", FieldKind::ObjectId),
        FieldDescriptor::new("first_name", FieldKind::String),
        FieldDescriptor::new("last_name", FieldKind::String),
        FieldDescriptor::new("birth_date", FieldKind::Date),
        FieldDescriptor::new("hire_date", FieldKind::Date),
        FieldDescriptor::new("cuil", FieldKind::String),
        FieldDescriptor::new("file_no", FieldKind::Integer),
        FieldDescriptor::new("user_code", FieldKind::Integer),
        FieldDescriptor::new("created", FieldKind::DateTime),
        FieldDescriptor::new("modified", FieldKind::DateTime),
    ];
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.map(|id| id.to_hex()).unwrap_or_default(),
            first_name: employee.first_name,
            last_name: employee.last_name,
            birth_date: employee.birth_date,
            hire_date: employee.hire_date,
            cuil: employee.cuil.as_deref().map(format_cuit),
            file_no: employee.file_no,
            user_code: employee.user_code,
            created: to_utc(employee.created),
            modified: to_utc(employee.modified),
        }
    }
}

/// A recorded punch
#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct PunchResponse {
    pub id: String,
    pub user_code: i64,
    #[schema(value_type = String, example = "2015-03-02T08:35:00")]
    pub datetime: NaiveDateTime,
}

impl Resource for PunchResponse {
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::stored_as("id", "_id", FieldKind::ObjectId),
        FieldDescriptor::new("user_code", FieldKind::Integer),
        FieldDescriptor::new("datetime", FieldKind::DateTime),
    ];
}

impl From<AttendancePunch> for PunchResponse {
    fn from(punch: AttendancePunch) -> Self {
        Self {
            id: punch.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_code: punch.user_code,
            datetime: to_utc(punch.datetime).naive_utc(),
        }
    }
}

#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct AttendanceIntervalResponse {
    #[schema(value_type = Option<String>, example = "08:35:00")]
    pub input: Option<NaiveTime>,
    #[schema(value_type = Option<String>, example = "12:31:00")]
    pub output: Option<NaiveTime>,
    /// Seconds past the expected start; null without an input punch
    #[schema(example = 300)]
    pub late: Option<i64>,
}

impl From<IntervalInfo> for AttendanceIntervalResponse {
    fn from(info: IntervalInfo) -> Self {
        Self {
            input: info.input,
            output: info.output,
            late: info.late.map(|d| d.num_seconds()),
        }
    }
}

/// Reconciled attendance of one scheduled day
#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct AttendanceRecordResponse {
    #[schema(value_type = String, example = "2015-03-02")]
    pub day: NaiveDate,
    pub intervals: Vec<AttendanceIntervalResponse>,
}

impl Resource for AttendanceRecordResponse {
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::computed("day", FieldKind::Date),
        FieldDescriptor::computed("intervals", FieldKind::Nested),
    ];
}

impl From<Record> for AttendanceRecordResponse {
    fn from(record: Record) -> Self {
        Self {
            day: record.day,
            intervals: record.intervals.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use serde_json::json;

    #[test]
    fn test_record_serialization() {
        let record = Record {
            day: NaiveDate::from_ymd_opt(2015, 3, 2).unwrap(),
            intervals: vec![
                IntervalInfo {
                    input: NaiveTime::from_hms_opt(8, 35, 0),
                    output: NaiveTime::from_hms_opt(12, 31, 0),
                    late: Some(TimeDelta::minutes(5)),
                },
                IntervalInfo {
                    input: None,
                    output: None,
                    late: None,
                },
            ],
        };
        let value = serde_json::to_value(AttendanceRecordResponse::from(record)).unwrap();
        assert_eq!(
            value,
            json!({
                "day": "2015-03-02",
                "intervals": [
                    { "input": "08:35:00", "output": "12:31:00", "late": 300 },
                    { "input": null, "output": null, "late": null }
                ]
            })
        );
    }

    #[test]
    fn test_cuil_is_rendered_dashed() {
        let now = mongodb::bson::DateTime::now();
        let employee = Employee {
            id: None,
            first_name: None,
            last_name: "Pérez".to_string(),
            birth_date: None,
            hire_date: None,
            cuil: Some("20123456786".to_string()),
            file_no: None,
            user_code: Some(12),
            created: now,
            modified: now,
        };
        let response = EmployeeResponse::from(employee);
        assert_eq!(response.cuil.as_deref(), Some("20-12345678-6"));
    }
}
