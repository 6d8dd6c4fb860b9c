//! Data models organized by type.

pub mod bank;
pub mod employee;
pub mod purchase_order;
pub mod requests;
pub mod responses;
pub mod supplier;

pub use bank::*;
pub use employee::*;
pub use purchase_order::*;
pub use requests::*;
pub use responses::*;
pub use supplier::*;
