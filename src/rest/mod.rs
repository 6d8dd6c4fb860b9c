//! Tools for building REST results out of MongoDB queries.
//!
//! The entry points are [`build_result`] for collections and [`build_item`] for
//! single records. Both honour the `select`/`omit` projection parameters;
//! collections additionally honour `filter`, `page` and `per_page`.
//!
//! Limitations:
//! - Filters only address fields declared in a resource's field table.
//! - Only one collection is queried per result; related names are resolved by
//!   the list source itself.

pub mod filter;
pub mod pagination;
pub mod projection;
pub mod query;
pub mod result;
pub mod schema;

pub use query::ListQuery;
pub use result::{build_collection, build_item, build_result, ListEnvelope, ListSource};
pub use schema::{FieldDescriptor, FieldKind, Resource};
