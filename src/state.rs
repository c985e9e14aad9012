//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkRegistry;
use crate::infrastructure::persistence::PgLinkRepository;

/// Registry backed by PostgreSQL.
pub type PgLinkRegistry = LinkRegistry<PgLinkRepository>;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<PgLinkRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<PgLinkRegistry>) -> Self {
        Self { registry }
    }
}
