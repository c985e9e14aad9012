//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{DeletedLink, LinkRecord};

/// Request to create a short link.
///
/// camelCase keys (`targetUrl`, `customCode`) are accepted as aliases.
/// URL and code rules are enforced by the registry, not here, so that
/// callers see `invalid_url` / `invalid_format` rather than a generic
/// validation error.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Absolute URL to redirect to. Missing and `null` are both reported
    /// as a required-URL error by the registry.
    #[serde(default, alias = "targetUrl")]
    #[validate(length(max = 2048, message = "Target URL is too long"))]
    pub target_url: Option<String>,

    /// Optional 6-8 character alphanumeric code.
    #[serde(default, alias = "customCode")]
    pub custom_code: Option<String>,
}

/// JSON representation of a link record.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub code: String,
    pub target_url: String,
    pub clicks: i64,
    pub last_accessed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<LinkRecord> for LinkResponse {
    fn from(link: LinkRecord) -> Self {
        Self {
            code: link.code,
            target_url: link.target_url,
            clicks: link.clicks,
            last_accessed: link.last_accessed,
            created_at: link.created_at,
        }
    }
}

/// Confirmation returned after a delete.
#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub message: &'static str,
    pub code: String,
}

impl From<DeletedLink> for DeleteLinkResponse {
    fn from(deleted: DeletedLink) -> Self {
        Self {
            message: "Link deleted",
            code: deleted.code,
        }
    }
}
