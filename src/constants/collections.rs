//! MongoDB collection names.

pub const COLLECTION_BANKS: &str = "banks";
pub const COLLECTION_BANK_ACCOUNT_TYPES: &str = "bank_account_types";
pub const COLLECTION_BANK_ACCOUNTS: &str = "bank_accounts";
pub const COLLECTION_SUPPLIERS: &str = "suppliers";
pub const COLLECTION_PURCHASE_ORDERS: &str = "purchase_orders";
pub const COLLECTION_EMPLOYEES: &str = "employees";
pub const COLLECTION_ATTENDANCE_PUNCHES: &str = "attendance_punches";
