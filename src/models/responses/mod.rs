//! Response models for API endpoints.
//!
//! Every resource response declares its field table, which drives
//! `select`/`omit` projection and `filter` translation.

pub mod api;
pub mod bank;
pub mod employee;
pub mod purchase_order;
pub mod supplier;

pub use api::*;
pub use bank::*;
pub use employee::*;
pub use purchase_order::*;
pub use supplier::*;

use chrono::{DateTime, Utc};

/// Convert a stored BSON timestamp for serialization.
pub(crate) fn to_utc(dt: mongodb::bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}
