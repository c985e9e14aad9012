//! Server-rendered pages.
//!
//! - [`not_found`] - Page shown when a short code does not resolve

pub mod not_found;

pub use not_found::NotFoundTemplate;
