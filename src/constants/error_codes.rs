//! Error code constants for API responses.
//!
//! These codes provide a machine-readable identifier for each error type,
//! making it easier for API clients to handle errors programmatically.

// Request errors
pub const CODE_INVALID_PARAMETER: &str = "INVALID_PARAMETER";
pub const CODE_INVALID_BODY: &str = "INVALID_BODY";

// Lookup errors
pub const CODE_NOT_FOUND: &str = "NOT_FOUND";

// Integrity errors
pub const CODE_CONFLICT: &str = "CONFLICT";
pub const CODE_UNIQUE_VIOLATION: &str = "UNIQUE_VIOLATION";
pub const CODE_REFERENCED: &str = "REFERENCED";

// Generic errors
pub const CODE_INTERNAL_ERROR: &str = "INTERNAL_ERROR";
