//! Request models for API endpoints.

pub mod bank;
pub mod employee;
pub mod purchase_order;
pub mod supplier;

pub use bank::*;
pub use employee::*;
pub use purchase_order::*;
pub use supplier::*;
