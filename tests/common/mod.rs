#![allow(dead_code)]

use chrono::{DateTime, Utc};
use link_registry::application::services::LinkRegistry;
use link_registry::infrastructure::persistence::PgLinkRepository;
use link_registry::state::{AppState, PgLinkRegistry};
use sqlx::PgPool;
use std::sync::Arc;

pub fn create_test_registry(pool: PgPool) -> PgLinkRegistry {
    LinkRegistry::new(Arc::new(PgLinkRepository::new(Arc::new(pool))))
}

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(create_test_registry(pool)))
}

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) {
    sqlx::query("INSERT INTO links (code, target_url) VALUES ($1, $2)")
        .bind(code)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}

/// Returns `(clicks, last_accessed)` for a code.
pub async fn get_usage(pool: &PgPool, code: &str) -> (i64, Option<DateTime<Utc>>) {
    sqlx::query_as("SELECT clicks, last_accessed FROM links WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_links(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_links_with_code(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}
