//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::NotFoundTemplate;

/// Redirects a short code to its target URL, counting the hit.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Responses
///
/// - **307 Temporary Redirect** to the target; the hit is committed before
///   the response is built
/// - **404 Not Found** with an HTML page if the code does not exist
/// - **500** with a JSON error body if the store is unavailable
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.registry.resolve_and_hit(&code).await {
        Ok(target_url) => {
            debug!(code = %code, "Redirecting");
            Ok(Redirect::temporary(&location_header(target_url)).into_response())
        }
        Err(AppError::NotFound { .. }) => {
            Ok((StatusCode::NOT_FOUND, NotFoundTemplate { code }).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Serializes the stored URL in its percent-encoded form so it is always a
/// valid header value. Stored URLs were parsed on create, so the fallback
/// only covers rows written outside the registry.
fn location_header(target_url: String) -> String {
    Url::parse(&target_url)
        .map(String::from)
        .unwrap_or(target_url)
}
