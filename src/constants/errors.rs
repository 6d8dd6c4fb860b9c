//! Error message constants used throughout the application.

// Request errors
pub const ERR_INVALID_PARAMETER_TYPE: &str = "Invalid parameter type";
pub const ERR_INVALID_MONTH: &str = "Month must be between 1 and 12";
pub const ERR_INVALID_YEAR: &str = "Year is out of range";
pub const ERR_INVALID_BODY: &str = "Request body is not valid JSON";

// Lookup errors
pub const ERR_BANK_NOT_FOUND: &str = "Bank not found";
pub const ERR_ACCOUNT_TYPE_NOT_FOUND: &str = "Bank account type not found";
pub const ERR_BANK_ACCOUNT_NOT_FOUND: &str = "Bank account not found";
pub const ERR_SUPPLIER_NOT_FOUND: &str = "Supplier not found";
pub const ERR_PURCHASE_ORDER_NOT_FOUND: &str = "Purchase order not found";
pub const ERR_EMPLOYEE_NOT_FOUND: &str = "Employee not found";

// Validation errors
pub const ERR_VALIDATION_FAILED: &str = "Validation failed";
pub const ERR_REQUIRED_FIELD: &str = "Missing data for required field.";
pub const ERR_INVALID_CUIT: &str = "CUIT field invalid.";
pub const ERR_INVALID_CUIL: &str = "CUIL field invalid.";
pub const ERR_INVALID_DATE: &str = "Not a valid date.";
pub const ERR_UNKNOWN_BANK: &str = "Bank does not exist.";
pub const ERR_UNKNOWN_ACCOUNT_TYPE: &str = "Bank account type does not exist.";
pub const ERR_UNKNOWN_SUPPLIER: &str = "Supplier does not exist.";
pub const ERR_EMPLOYEE_WITHOUT_USER_CODE: &str =
    "Employee has no user code to record attendance with.";

// Uniqueness errors
pub const ERR_UNIQUE_CONFLICT: &str = "Unique constraint violated";
pub const ERR_BANK_NAME_EXISTS: &str = "Bank name must be unique.";
pub const ERR_ACCOUNT_TYPE_NAME_EXISTS: &str = "BankAccountType name must be unique.";
pub const ERR_ACCOUNT_TYPE_ABBR_EXISTS: &str = "BankAccountType abbr must be unique.";
pub const ERR_SUPPLIER_CUIT_EXISTS: &str = "Supplier CUIT must be unique.";
pub const ERR_EMPLOYEE_FILE_NO_EXISTS: &str = "Employee file number must be unique.";
pub const ERR_EMPLOYEE_USER_CODE_EXISTS: &str = "Employee user code must be unique.";

// Integrity errors
pub const ERR_DELETE_BANK: &str = "Unable to delete bank";
pub const ERR_DELETE_ACCOUNT_TYPE: &str = "Unable to delete account type";
pub const ERR_DELETE_SUPPLIER: &str = "Unable to delete supplier";
pub const ERR_DELETE_EMPLOYEE: &str = "Unable to delete employee";
