//! Informational message constants used throughout the application.

pub const MSG_API_ROOT: &str = "This is api root.";
pub const MSG_API_DOCS_PATH: &str = "/api/docs";
pub const MSG_SERVER_RUNNING: &str = "Server is running";
