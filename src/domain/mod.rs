//! Domain layer containing the link record and the store contract.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or transport; the
//! [`repositories::LinkRepository`] trait is implemented in
//! `crate::infrastructure::persistence`.

pub mod entities;
pub mod repositories;
