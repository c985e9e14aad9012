mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use link_registry::api::handlers::redirect_handler;
use sqlx::PgPool;

fn make_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    common::create_test_link(&pool, "redir1", "https://example.com/target").await;
    let server = make_server(pool);

    let response = server.get("/redir1").await;

    assert_eq!(response.status_code(), 307);
    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[sqlx::test]
async fn test_redirect_records_hit(pool: PgPool) {
    common::create_test_link(&pool, "clickm", "https://example.com/").await;
    let server = make_server(pool.clone());

    for _ in 0..3 {
        assert_eq!(server.get("/clickm").await.status_code(), 307);
    }

    let (clicks, last_accessed) = common::get_usage(&pool, "clickm").await;
    assert_eq!(clicks, 3);
    assert!(last_accessed.is_some());
}

#[sqlx::test]
async fn test_redirect_not_found_renders_page(pool: PgPool) {
    let server = make_server(pool.clone());

    let response = server.get("/notfnd").await;

    response.assert_status_not_found();
    let html = response.text();
    assert!(html.contains("notfnd"));
    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_redirect_malformed_code_is_not_found(pool: PgPool) {
    let server = make_server(pool);

    let response = server.get("/doesnotexist").await;

    response.assert_status_not_found();
}
