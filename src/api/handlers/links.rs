//! Handlers for link management endpoints (list, create, fetch, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, DeleteLinkResponse, LinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.registry.list().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "target_url": "https://example.com",
///   "custom_code": "abc123"   // optional, 6-8 alphanumeric characters
/// }
/// ```
///
/// # Errors
///
/// - 400 `invalid_url` if `target_url` is missing, `null` or not absolute
/// - 400 `invalid_format` for a malformed custom code
/// - 400 `validation_error` for an unreadable body or an oversized URL
/// - 409 `code_conflict` if the custom code is taken
/// - 500 `allocation_exhausted` / `store_unavailable`
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .registry
        .create(payload.target_url.unwrap_or_default(), payload.custom_code)
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Returns a single link without counting a hit.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.registry.fetch(&code).await?;

    Ok(Json(link.into()))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Response
///
/// ```json
/// { "message": "Link deleted", "code": "abc123" }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist, including on a repeated delete.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    let deleted = state.registry.delete(&code).await?;

    Ok(Json(deleted.into()))
}
