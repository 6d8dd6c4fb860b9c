use utoipa::OpenApi;

use crate::errors::{ErrorResponse, FieldErrorResponse};
use crate::models::{
    ApiRootResponse, AttendanceIntervalResponse, AttendanceRecordResponse,
    BankAccountResponse, BankAccountTypeResponse, BankResponse, CreateAccountTypeRequest,
    CreateBankAccountRequest, CreateBankRequest, CreateEmployeeRequest,
    CreatePurchaseOrderRequest, CreateSupplierRequest, EmployeeResponse, FiscalType,
    FreightType, HealthResponse, NotifyMethod, OrderStatus, PunchRequest, PunchResponse,
    PurchaseOrderItemRequest, PurchaseOrderItemResponse, PurchaseOrderResponse,
    SupplierResponse, UpdateAccountTypeRequest, UpdateBankRequest, UpdateEmployeeRequest,
    UpdatePurchaseOrderRequest, UpdateSupplierRequest,
};
use crate::rest::ListEnvelope;

/// OpenAPI documentation of the Nobix API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nobix API",
        version = "0.1.0",
        description = "REST backend for banks, suppliers, purchase orders and employee attendance.\n\nList endpoints accept `page`, `per_page`, `select`, `omit` and repeatable `filter=field:operator:value` parameters.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "Health", description = "API root, documentation and health check"),
        (name = "Banks", description = "Banks and bank account types"),
        (name = "Bank accounts", description = "Bank accounts, optionally owned by a supplier"),
        (name = "Suppliers", description = "Suppliers with their orders and bank accounts"),
        (name = "Purchase orders", description = "Purchase orders and their lines"),
        (name = "Employees", description = "Employees and attendance")
    ),
    paths(
        crate::handlers::api_root,
        crate::handlers::api_docs,
        crate::handlers::health_check,
        crate::handlers::list_banks,
        crate::handlers::create_bank,
        crate::handlers::get_bank,
        crate::handlers::update_bank,
        crate::handlers::delete_bank,
        crate::handlers::list_account_types,
        crate::handlers::create_account_type,
        crate::handlers::get_account_type,
        crate::handlers::update_account_type,
        crate::handlers::delete_account_type,
        crate::handlers::list_bank_accounts,
        crate::handlers::create_bank_account,
        crate::handlers::get_bank_account,
        crate::handlers::delete_bank_account,
        crate::handlers::list_suppliers,
        crate::handlers::create_supplier,
        crate::handlers::get_supplier,
        crate::handlers::update_supplier,
        crate::handlers::delete_supplier,
        crate::handlers::list_supplier_orders,
        crate::handlers::create_supplier_order,
        crate::handlers::get_supplier_order,
        crate::handlers::list_supplier_bank_accounts,
        crate::handlers::list_orders,
        crate::handlers::create_order,
        crate::handlers::get_order,
        crate::handlers::update_order,
        crate::handlers::list_employees,
        crate::handlers::create_employee,
        crate::handlers::get_employee,
        crate::handlers::update_employee,
        crate::handlers::delete_employee,
        crate::handlers::get_attendance,
        crate::handlers::record_punch
    ),
    components(
        schemas(
            CreateBankRequest,
            UpdateBankRequest,
            CreateAccountTypeRequest,
            UpdateAccountTypeRequest,
            CreateBankAccountRequest,
            CreateSupplierRequest,
            UpdateSupplierRequest,
            PurchaseOrderItemRequest,
            CreatePurchaseOrderRequest,
            UpdatePurchaseOrderRequest,
            CreateEmployeeRequest,
            UpdateEmployeeRequest,
            PunchRequest,
            FiscalType,
            FreightType,
            OrderStatus,
            NotifyMethod,
            BankResponse,
            BankAccountTypeResponse,
            BankAccountResponse,
            SupplierResponse,
            PurchaseOrderItemResponse,
            PurchaseOrderResponse,
            EmployeeResponse,
            PunchResponse,
            AttendanceIntervalResponse,
            AttendanceRecordResponse,
            ListEnvelope,
            ErrorResponse,
            FieldErrorResponse,
            ApiRootResponse,
            HealthResponse
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/banks",
            "/api/v1/banks/account_types/{id}",
            "/api/v1/bank_accounts/{id}",
            "/api/v1/suppliers/{id}/orders/{order_id}",
            "/api/v1/purchases/orders",
            "/api/v1/employees/{id}/attendance",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
