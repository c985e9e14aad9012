mod common;

use link_registry::AppError;
use sqlx::PgPool;

#[sqlx::test]
async fn test_create_resolve_fetch_delete_lifecycle(pool: PgPool) {
    let registry = common::create_test_registry(pool);

    let created = registry
        .create("https://example.com".to_string(), None)
        .await
        .unwrap();
    assert_eq!(created.code.len(), 6);
    assert!(created.code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(created.target_url, "https://example.com");
    assert_eq!(created.clicks, 0);
    assert!(created.last_accessed.is_none());

    let target = registry.resolve_and_hit(&created.code).await.unwrap();
    assert_eq!(target, "https://example.com");

    let fetched = registry.fetch(&created.code).await.unwrap();
    assert_eq!(fetched.clicks, 1);
    assert!(fetched.last_accessed.is_some());
    assert_eq!(fetched.created_at, created.created_at);

    let deleted = registry.delete(&created.code).await.unwrap();
    assert_eq!(deleted.code, created.code);

    let result = registry.fetch(&created.code).await;
    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_custom_code_twice_conflicts(pool: PgPool) {
    let registry = common::create_test_registry(pool.clone());

    registry
        .create("https://example.com".to_string(), Some("abc123".to_string()))
        .await
        .unwrap();
    let second = registry
        .create("https://other.example".to_string(), Some("abc123".to_string()))
        .await;

    assert!(matches!(second, Err(AppError::CodeConflict { .. })));
    assert_eq!(common::count_links_with_code(&pool, "abc123").await, 1);

    let kept = registry.fetch("abc123").await.unwrap();
    assert_eq!(kept.target_url, "https://example.com");
}

#[sqlx::test]
async fn test_short_custom_code_creates_nothing(pool: PgPool) {
    let registry = common::create_test_registry(pool.clone());

    let result = registry
        .create("https://example.com".to_string(), Some("ab".to_string()))
        .await;

    assert!(matches!(result, Err(AppError::InvalidFormat { .. })));
    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_invalid_url_creates_nothing(pool: PgPool) {
    let registry = common::create_test_registry(pool.clone());

    let result = registry.create("not a url".to_string(), None).await;

    assert!(matches!(result, Err(AppError::InvalidUrl { .. })));
    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_resolve_missing_leaves_store_unchanged(pool: PgPool) {
    common::create_test_link(&pool, "keep12", "https://example.com").await;
    let registry = common::create_test_registry(pool.clone());

    let result = registry.resolve_and_hit("doesnotexist").await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
    assert_eq!(common::count_links(&pool).await, 1);
    assert_eq!(common::get_usage(&pool, "keep12").await, (0, None));
}

#[sqlx::test]
async fn test_delete_twice(pool: PgPool) {
    common::create_test_link(&pool, "twice1", "https://example.com").await;
    let registry = common::create_test_registry(pool);

    assert!(registry.delete("twice1").await.is_ok());
    assert!(matches!(
        registry.delete("twice1").await,
        Err(AppError::NotFound { .. })
    ));
}

#[sqlx::test]
async fn test_fetch_does_not_count_hit(pool: PgPool) {
    common::create_test_link(&pool, "peek12", "https://example.com").await;
    let registry = common::create_test_registry(pool.clone());

    registry.fetch("peek12").await.unwrap();
    registry.fetch("peek12").await.unwrap();

    assert_eq!(common::get_usage(&pool, "peek12").await, (0, None));
}

#[sqlx::test]
async fn test_list_newest_first(pool: PgPool) {
    let registry = common::create_test_registry(pool);

    for code in ["aaaaaa", "bbbbbb", "cccccc"] {
        registry
            .create("https://example.com".to_string(), Some(code.to_string()))
            .await
            .unwrap();
    }

    let codes: Vec<String> = registry
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.code)
        .collect();

    assert_eq!(codes, vec!["cccccc", "bbbbbb", "aaaaaa"]);
}
