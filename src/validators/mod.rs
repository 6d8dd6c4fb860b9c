//! Custom validation helpers used by request payloads and services.

pub mod common;
pub mod cuit;

pub use common::*;
pub use cuit::*;
