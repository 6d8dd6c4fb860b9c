//! Employee and attendance handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{Datelike, Utc};
use log::{debug, info};
use mongodb::bson::doc;
use serde::Deserialize;

use crate::errors::ApiError;
use crate::handlers::created;
use crate::models::{
    CreateEmployeeRequest, EmployeeResponse, PunchRequest, PunchResponse, UpdateEmployeeRequest,
};
use crate::rest::{build_collection, build_item, build_result, ListEnvelope, ListQuery};
use crate::services::EmployeeService;

/// Month selector of the attendance endpoint
#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// List employees
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    tag = "Employees",
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 25, max: 100)"),
        ("select" = Option<Vec<String>>, Query, description = "Fields to include"),
        ("omit" = Option<Vec<String>>, Query, description = "Fields to exclude"),
        ("filter" = Option<Vec<String>>, Query, description = "field:operator:value, repeatable")
    ),
    responses(
        (status = 200, description = "Page of employees", body = ListEnvelope),
        (status = 400, description = "Malformed query parameter", body = crate::errors::ErrorResponse)
    )
)]
pub async fn list_employees(
    employee_service: web::Data<EmployeeService>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let result = build_result(employee_service.get_ref(), doc! {}, &query).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Create an employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    tag = "Employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 409, description = "File number or user code already taken", body = crate::errors::FieldErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::FieldErrorResponse)
    )
)]
pub async fn create_employee(
    employee_service: web::Data<EmployeeService>,
    body: web::Json<CreateEmployeeRequest>,
    query: ListQuery,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let employee = employee_service.create_employee(body.into_inner()).await?;
    info!("Created employee {}", employee.id);
    Ok(created(&req, &employee.id, build_item(&employee, &query)?))
}

/// Get an employee by ID
#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    params(
        ("id" = String, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 404, description = "Employee not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_employee(
    employee_service: web::Data<EmployeeService>,
    path: web::Path<String>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let employee = employee_service.get_employee(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(build_item(&employee, &query)?))
}

/// Partially update an employee
#[utoipa::path(
    patch,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    params(
        ("id" = String, Path, description = "Employee ID")
    ),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 404, description = "Employee not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "File number or user code already taken", body = crate::errors::FieldErrorResponse),
        (status = 422, description = "Validation error", body = crate::errors::FieldErrorResponse)
    )
)]
pub async fn update_employee(
    employee_service: web::Data<EmployeeService>,
    path: web::Path<String>,
    body: web::Json<UpdateEmployeeRequest>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let employee = employee_service
        .update_employee(&path.into_inner(), body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(build_item(&employee, &query)?))
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    params(
        ("id" = String, Path, description = "Employee ID")
    ),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Employee has attendance records", body = crate::errors::ErrorResponse)
    )
)]
pub async fn delete_employee(
    employee_service: web::Data<EmployeeService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    employee_service.delete_employee(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Reconciled attendance of an employee for one month
///
/// Punches are matched to the nearest expected time of the work schedule.
/// Defaults to the current month.
#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}/attendance",
    tag = "Employees",
    params(
        ("id" = String, Path, description = "Employee ID"),
        ("year" = Option<i32>, Query, description = "Year (default: current)"),
        ("month" = Option<u32>, Query, description = "Month 1-12 (default: current)"),
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("per_page" = Option<u64>, Query, description = "Items per page (default: 25, max: 100)")
    ),
    responses(
        (status = 200, description = "Page of daily attendance records", body = ListEnvelope),
        (status = 400, description = "Invalid year or month", body = crate::errors::ErrorResponse),
        (status = 404, description = "Employee not found", body = crate::errors::ErrorResponse)
    )
)]
pub async fn get_attendance(
    employee_service: web::Data<EmployeeService>,
    path: web::Path<String>,
    month: web::Query<AttendanceQuery>,
    query: ListQuery,
) -> Result<HttpResponse, ApiError> {
    let today = Utc::now().date_naive();
    let year = month.year.unwrap_or_else(|| today.year());
    let month = month.month.unwrap_or_else(|| today.month());
    debug!("Attendance for {}-{:02}", year, month);

    let records = employee_service
        .attendance(&path.into_inner(), year, month)
        .await?;
    Ok(HttpResponse::Ok().json(build_collection(records, &query)?))
}

/// Record a time clock punch for an employee
#[utoipa::path(
    post,
    path = "/api/v1/employees/{id}/attendance",
    tag = "Employees",
    params(
        ("id" = String, Path, description = "Employee ID")
    ),
    request_body = PunchRequest,
    responses(
        (status = 201, description = "Punch recorded", body = PunchResponse),
        (status = 404, description = "Employee not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Employee has no user code", body = crate::errors::FieldErrorResponse)
    )
)]
pub async fn record_punch(
    employee_service: web::Data<EmployeeService>,
    path: web::Path<String>,
    body: web::Json<PunchRequest>,
    query: ListQuery,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let punch = employee_service
        .record_punch(&path.into_inner(), body.into_inner())
        .await?;
    Ok(created(&req, &punch.id, build_item(&punch, &query)?))
}
