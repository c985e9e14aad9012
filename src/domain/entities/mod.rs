//! Core domain entities.
//!
//! - [`LinkRecord`] - A persisted code → URL mapping with usage counters
//! - [`NewLink`] - Input for inserting a record
//! - [`DeletedLink`] - Confirmation returned by a hard delete

pub mod link;

pub use link::{DeletedLink, LinkRecord, NewLink};
