//! Data model for stores, search terms and product records
//!
//! - `Store` - one location from the store directory
//! - `SearchTerm` - a validated query string
//! - `ProductRecord` - one matched product at one store

mod record;
mod store;

pub use record::{ProductRecord, RunResult};
pub use store::{SearchTerm, Store};
