//! Standalone helpers with no web or database dependencies.

pub mod attendance;
