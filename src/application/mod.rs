//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! - [`services::link_registry::LinkRegistry`] - Link creation, resolution, and removal

pub mod services;
