//! Employee management and time clock attendance.

use std::sync::Arc;

use chrono::{Months, NaiveDate};
use log::{debug, info, warn};
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};

use crate::constants::{
    CODE_INVALID_PARAMETER, CODE_REFERENCED, ERR_DELETE_EMPLOYEE, ERR_EMPLOYEE_FILE_NO_EXISTS,
    ERR_EMPLOYEE_NOT_FOUND, ERR_EMPLOYEE_USER_CODE_EXISTS, ERR_EMPLOYEE_WITHOUT_USER_CODE,
    ERR_INVALID_MONTH, ERR_INVALID_YEAR, ERR_REQUIRED_FIELD,
};
use crate::errors::ApiError;
use crate::models::{
    AttendancePunch, AttendanceRecordResponse, CreateEmployeeRequest, Employee,
    EmployeeResponse, PunchRequest, PunchResponse, UpdateEmployeeRequest,
};
use crate::models::responses::to_utc;
use crate::repositories::{parse_object_id, Repositories, Repository};
use crate::rest::ListSource;
use crate::utils::attendance::{fixed_records, WorkSchedule};
use crate::validators::{field_errors, normalize_cuit, validate_payload};

pub struct EmployeeService {
    employees: Arc<Repository<Employee>>,
    punches: Arc<Repository<AttendancePunch>>,
    schedule: WorkSchedule,
}

/// First day of the month and first day of the next one.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), ApiError> {
    if !(1..=12).contains(&month) {
        return Err(ApiError::bad_request(CODE_INVALID_PARAMETER, ERR_INVALID_MONTH));
    }
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ApiError::bad_request(CODE_INVALID_PARAMETER, ERR_INVALID_YEAR))?;
    let end = start
        .checked_add_months(Months::new(1))
        .ok_or_else(|| ApiError::bad_request(CODE_INVALID_PARAMETER, ERR_INVALID_YEAR))?;
    Ok((start, end))
}

fn midnight(date: NaiveDate) -> DateTime {
    let millis = date
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default();
    DateTime::from_millis(millis)
}

impl EmployeeService {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            employees: Arc::clone(&repositories.employees),
            punches: Arc::clone(&repositories.punches),
            schedule: WorkSchedule::default(),
        }
    }

    async fn find(&self, id: ObjectId) -> Result<Employee, ApiError> {
        self.employees.find_by_id(id).await?.ok_or_else(|| {
            warn!("Employee not found with id: {}", id);
            ApiError::not_found(ERR_EMPLOYEE_NOT_FOUND)
        })
    }

    async fn check_unique(
        &self,
        file_no: Option<i64>,
        user_code: Option<i64>,
        exclude: Option<ObjectId>,
    ) -> Result<(), ApiError> {
        let mut failures = Vec::new();
        if let Some(file_no) = file_no {
            if self.employees.is_taken("file_no", file_no, exclude).await? {
                failures.push(("file_no", ERR_EMPLOYEE_FILE_NO_EXISTS));
            }
        }
        if let Some(user_code) = user_code {
            if self.employees.is_taken("user_code", user_code, exclude).await? {
                failures.push(("user_code", ERR_EMPLOYEE_USER_CODE_EXISTS));
            }
        }
        match field_errors(failures) {
            Some(messages) => {
                warn!("Employee uniqueness failed: {:?}", messages);
                Err(ApiError::FieldConflict { messages })
            }
            None => Ok(()),
        }
    }

    pub async fn get_employee(&self, id: &str) -> Result<EmployeeResponse, ApiError> {
        let id = parse_object_id(id, ERR_EMPLOYEE_NOT_FOUND)?;
        Ok(self.find(id).await?.into())
    }

    pub async fn create_employee(
        &self,
        req: CreateEmployeeRequest,
    ) -> Result<EmployeeResponse, ApiError> {
        validate_payload(&req)?;
        self.check_unique(req.file_no, req.user_code, None).await?;

        let now = DateTime::now();
        let mut employee = Employee {
            id: None,
            first_name: req.first_name,
            last_name: req.last_name.unwrap_or_default(),
            birth_date: req.birth_date,
            hire_date: req.hire_date,
            cuil: req.cuil.map(|c| normalize_cuit(&c).unwrap_or(c)),
            file_no: req.file_no,
            user_code: req.user_code,
            created: now,
            modified: now,
        };
        let id = self.employees.insert(&employee).await?;
        info!("Employee created: {}", id);
        employee.id = Some(id);
        Ok(employee.into())
    }

    pub async fn update_employee(
        &self,
        id: &str,
        req: UpdateEmployeeRequest,
    ) -> Result<EmployeeResponse, ApiError> {
        let id = parse_object_id(id, ERR_EMPLOYEE_NOT_FOUND)?;
        self.find(id).await?;
        validate_payload(&req)?;
        self.check_unique(req.file_no, req.user_code, Some(id)).await?;

        let mut update = Document::new();
        if let Some(first_name) = req.first_name {
            update.insert("first_name", first_name);
        }
        if let Some(last_name) = req.last_name {
            update.insert("last_name", last_name);
        }
        if let Some(birth_date) = req.birth_date {
            update.insert("birth_date", birth_date);
        }
        if let Some(hire_date) = req.hire_date {
            update.insert("hire_date", hire_date);
        }
        if let Some(cuil) = req.cuil {
            update.insert("cuil", normalize_cuit(&cuil).unwrap_or(cuil));
        }
        if let Some(file_no) = req.file_no {
            update.insert("file_no", file_no);
        }
        if let Some(user_code) = req.user_code {
            update.insert("user_code", user_code);
        }
        if !update.is_empty() {
            update.insert("modified", DateTime::now());
        }
        self.employees.update(id, update).await?;
        info!("Employee updated: {}", id);

        Ok(self.find(id).await?.into())
    }

    /// Employees with recorded punches cannot be deleted.
    pub async fn delete_employee(&self, id: &str) -> Result<(), ApiError> {
        let id = parse_object_id(id, ERR_EMPLOYEE_NOT_FOUND)?;
        let employee = self.find(id).await?;

        if let Some(user_code) = employee.user_code {
            if self.punches.exists(doc! { "user_code": user_code }).await? {
                warn!("Employee {} has attendance records", id);
                return Err(ApiError::conflict(CODE_REFERENCED, ERR_DELETE_EMPLOYEE));
            }
        }
        self.employees.delete(id).await?;
        info!("Employee deleted: {}", id);
        Ok(())
    }

    /// Reconciled attendance of one month. Employees without a user code
    /// get the bare schedule.
    pub async fn attendance(
        &self,
        id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<AttendanceRecordResponse>, ApiError> {
        let id = parse_object_id(id, ERR_EMPLOYEE_NOT_FOUND)?;
        let employee = self.find(id).await?;
        let (start, end) = month_bounds(year, month)?;

        let punches = match employee.user_code {
            Some(user_code) => {
                let filter = doc! {
                    "user_code": user_code,
                    "datetime": { "$gte": midnight(start), "$lt": midnight(end) },
                };
                self.punches
                    .find_many(filter, doc! { "datetime": 1 }, 0, 0)
                    .await?
            }
            None => Vec::new(),
        };
        debug!(
            "Reconciling {} punches of employee {} for {}-{:02}",
            punches.len(),
            id,
            year,
            month
        );

        let times: Vec<_> = punches
            .iter()
            .map(|p| to_utc(p.datetime).naive_utc())
            .collect();
        Ok(fixed_records(&times, year, month, &self.schedule)
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn record_punch(
        &self,
        id: &str,
        req: PunchRequest,
    ) -> Result<PunchResponse, ApiError> {
        let id = parse_object_id(id, ERR_EMPLOYEE_NOT_FOUND)?;
        let employee = self.find(id).await?;
        validate_payload(&req)?;

        let user_code = employee.user_code.ok_or_else(|| {
            warn!("Employee {} has no user code", id);
            ApiError::invalid_field("user_code", ERR_EMPLOYEE_WITHOUT_USER_CODE)
        })?;
        let datetime = req
            .datetime
            .ok_or_else(|| ApiError::invalid_field("datetime", ERR_REQUIRED_FIELD))?;

        let mut punch = AttendancePunch {
            id: None,
            user_code,
            datetime: DateTime::from_millis(datetime.and_utc().timestamp_millis()),
        };
        let punch_id = self.punches.insert(&punch).await?;
        info!("Punch recorded for employee {} at {}", id, datetime);
        punch.id = Some(punch_id);
        Ok(punch.into())
    }
}

impl ListSource for EmployeeService {
    type Item = EmployeeResponse;

    async fn count(&self, filter: Document) -> Result<u64, ApiError> {
        self.employees.count(filter).await
    }

    async fn fetch(
        &self,
        filter: Document,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<EmployeeResponse>, ApiError> {
        let employees = self
            .employees
            .find_many(filter, doc! { "last_name": 1, "first_name": 1 }, skip, limit)
            .await?;
        Ok(employees.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds() {
        let (start, end) = month_bounds(2015, 12).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2015, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2016, 1, 1).unwrap());
    }

    #[test]
    fn test_month_out_of_range() {
        assert!(matches!(month_bounds(2015, 0), Err(ApiError::BadRequest { .. })));
        assert!(matches!(month_bounds(2015, 13), Err(ApiError::BadRequest { .. })));
    }

    #[test]
    fn test_midnight() {
        let date = NaiveDate::from_ymd_opt(2015, 3, 2).unwrap();
        assert_eq!(midnight(date).timestamp_millis(), 1_425_254_400_000);
    }
}
