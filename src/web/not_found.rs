//! Not-found page for unknown short codes.

use askama::Template;
use askama_web::WebTemplate;

/// Renders `templates/not_found.html`.
///
/// Callers pair it with a 404 status; the template itself has no status.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub code: String,
}
