mod common;

use link_registry::AppError;
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

const CONCURRENT_CALLERS: usize = 16;

#[sqlx::test]
async fn test_concurrent_hits_are_not_lost(pool: PgPool) {
    common::create_test_link(&pool, "race01", "https://example.com").await;
    let registry = Arc::new(common::create_test_registry(pool.clone()));

    let mut tasks = JoinSet::new();
    for _ in 0..CONCURRENT_CALLERS {
        let registry = registry.clone();
        tasks.spawn(async move { registry.resolve_and_hit("race01").await });
    }

    while let Some(result) = tasks.join_next().await {
        assert_eq!(result.unwrap().unwrap(), "https://example.com");
    }

    let (clicks, last_accessed) = common::get_usage(&pool, "race01").await;
    assert_eq!(clicks, CONCURRENT_CALLERS as i64);
    assert!(last_accessed.is_some());
}

#[sqlx::test]
async fn test_concurrent_hits_add_to_existing_count(pool: PgPool) {
    common::create_test_link(&pool, "race02", "https://example.com").await;
    sqlx::query("UPDATE links SET clicks = 100 WHERE code = 'race02'")
        .execute(&pool)
        .await
        .unwrap();
    let registry = Arc::new(common::create_test_registry(pool.clone()));

    let mut tasks = JoinSet::new();
    for _ in 0..CONCURRENT_CALLERS {
        let registry = registry.clone();
        tasks.spawn(async move { registry.resolve_and_hit("race02").await });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    let (clicks, _) = common::get_usage(&pool, "race02").await;
    assert_eq!(clicks, 100 + CONCURRENT_CALLERS as i64);
}

#[sqlx::test]
async fn test_hits_on_different_codes_are_independent(pool: PgPool) {
    common::create_test_link(&pool, "left01", "https://left.example").await;
    common::create_test_link(&pool, "right1", "https://right.example").await;
    let registry = Arc::new(common::create_test_registry(pool.clone()));

    let mut tasks = JoinSet::new();
    for i in 0..CONCURRENT_CALLERS {
        let registry = registry.clone();
        let code = if i % 2 == 0 { "left01" } else { "right1" };
        tasks.spawn(async move { registry.resolve_and_hit(code).await });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    let half = (CONCURRENT_CALLERS / 2) as i64;
    assert_eq!(common::get_usage(&pool, "left01").await.0, half);
    assert_eq!(common::get_usage(&pool, "right1").await.0, half);
}

#[sqlx::test]
async fn test_concurrent_custom_code_creates_one_winner(pool: PgPool) {
    let registry = Arc::new(common::create_test_registry(pool.clone()));

    let mut tasks = JoinSet::new();
    for i in 0..CONCURRENT_CALLERS {
        let registry = registry.clone();
        tasks.spawn(async move {
            registry
                .create(
                    format!("https://example.com/{i}"),
                    Some("samecd".to_string()),
                )
                .await
        });
    }

    let mut created = 0;
    let mut conflicts = 0;
    while let Some(result) = tasks.join_next().await {
        match result.unwrap() {
            Ok(_) => created += 1,
            Err(AppError::CodeConflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, CONCURRENT_CALLERS - 1);
    assert_eq!(common::count_links_with_code(&pool, "samecd").await, 1);
}

#[sqlx::test]
async fn test_concurrent_generated_codes_are_unique(pool: PgPool) {
    let registry = Arc::new(common::create_test_registry(pool.clone()));

    let mut tasks = JoinSet::new();
    for i in 0..CONCURRENT_CALLERS {
        let registry = registry.clone();
        tasks.spawn(async move {
            registry
                .create(format!("https://example.com/{i}"), None)
                .await
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    assert_eq!(common::count_links(&pool).await, CONCURRENT_CALLERS as i64);
}

/// Takes the row lock on `code` in a transaction of its own.
async fn lock_row(pool: &PgPool, code: &str) -> Transaction<'static, Postgres> {
    let mut tx = pool.begin().await.unwrap();
    sqlx::query("SELECT id FROM links WHERE code = $1 FOR UPDATE")
        .bind(code)
        .execute(&mut *tx)
        .await
        .unwrap();
    tx
}

#[sqlx::test]
async fn test_cancelled_hit_leaves_no_increment(pool: PgPool) {
    common::create_test_link(&pool, "cancel", "https://example.com").await;
    let registry = Arc::new(common::create_test_registry(pool.clone()));

    let lock = lock_row(&pool, "cancel").await;

    let pending = tokio::spawn({
        let registry = registry.clone();
        async move { registry.resolve_and_hit("cancel").await }
    });

    // The hit is now queued behind the row lock.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!pending.is_finished());

    pending.abort();
    assert!(pending.await.unwrap_err().is_cancelled());

    lock.rollback().await.unwrap();

    assert_eq!(common::get_usage(&pool, "cancel").await, (0, None));
}

#[sqlx::test]
async fn test_locked_code_does_not_block_other_codes(pool: PgPool) {
    common::create_test_link(&pool, "codeAA", "https://a.example").await;
    common::create_test_link(&pool, "codeBB", "https://b.example").await;
    let registry = common::create_test_registry(pool.clone());

    let lock = lock_row(&pool, "codeAA").await;

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        registry.resolve_and_hit("codeBB"),
    )
    .await;

    assert_eq!(result.unwrap().unwrap(), "https://b.example");
    assert_eq!(common::get_usage(&pool, "codeBB").await.0, 1);
    assert_eq!(common::get_usage(&pool, "codeAA").await.0, 0);

    lock.rollback().await.unwrap();
}
