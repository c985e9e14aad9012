//! Link registry: code allocation, resolution with hit counting, and lifecycle.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info};
use url::Url;

use crate::domain::entities::{DeletedLink, LinkRecord, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{
    MAX_ALLOCATION_ATTEMPTS, generate_code, is_valid_code, validate_custom_code,
};

/// Counter bumped each time code allocation runs out of attempts.
///
/// The crate only records it; whichever `metrics` recorder the embedding
/// process installs (see [`crate::server::describe_metrics`]) exports it.
pub const ALLOCATION_EXHAUSTED_COUNTER: &str = "link_allocation_exhausted_total";

/// Sole writer of link records.
///
/// The registry holds no records in memory; every call goes to the store so
/// reads are always consistent. Concurrency guarantees come from the store:
/// the unique constraint on `code` settles racing creates, and a per-row lock
/// serializes hits on the same code.
pub struct LinkRegistry<R: LinkRepository> {
    repository: Arc<R>,
}

impl<R: LinkRepository> LinkRegistry<R> {
    /// Creates a registry over the given store handle.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a link for `target_url`.
    ///
    /// # Arguments
    ///
    /// - `target_url` - Absolute URL to redirect to; stored as given
    /// - `custom_code` - Optional caller-chosen code; an empty string counts as absent
    ///
    /// # Code Allocation
    ///
    /// Without a custom code, random 6-character candidates are tried up to
    /// [`MAX_ALLOCATION_ATTEMPTS`] times. A candidate is skipped if a lookup
    /// finds it taken, or if the insert hits the unique constraint.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the URL is empty or not absolute
    /// - [`AppError::InvalidFormat`] if the custom code is malformed
    /// - [`AppError::CodeConflict`] if the custom code is taken
    /// - [`AppError::AllocationExhausted`] if every candidate collided
    /// - [`AppError::StoreUnavailable`] on database errors
    pub async fn create(
        &self,
        target_url: String,
        custom_code: Option<String>,
    ) -> Result<LinkRecord, AppError> {
        validate_target_url(&target_url)?;

        let custom_code = custom_code.filter(|c| !c.is_empty());
        if let Some(code) = &custom_code {
            validate_custom_code(code)?;
        }

        let link = match custom_code {
            Some(code) => self.insert_custom(code, target_url).await?,
            None => self.allocate_and_insert(target_url).await?,
        };

        info!(code = %link.code, "Link created");
        Ok(link)
    }

    /// Resolves `code` to its target URL and records the hit.
    ///
    /// The lookup, `clicks + 1` and `last_accessed = now` commit as one unit.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no record matches; nothing is written
    /// - [`AppError::StoreUnavailable`] on database errors; the hit is not recorded
    pub async fn resolve_and_hit(&self, code: &str) -> Result<String, AppError> {
        if !is_valid_code(code) {
            return Err(link_not_found(code));
        }

        self.repository
            .resolve_and_hit(code)
            .await?
            .ok_or_else(|| link_not_found(code))
    }

    /// Fetches a record without modifying it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    pub async fn fetch(&self, code: &str) -> Result<LinkRecord, AppError> {
        if !is_valid_code(code) {
            return Err(link_not_found(code));
        }

        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| link_not_found(code))
    }

    /// Hard-deletes a record and returns its code.
    ///
    /// Deleting a missing code is an error, so callers can tell "deleted"
    /// from "nothing to delete".
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    pub async fn delete(&self, code: &str) -> Result<DeletedLink, AppError> {
        if !is_valid_code(code) {
            return Err(link_not_found(code));
        }

        let code = self
            .repository
            .delete(code)
            .await?
            .ok_or_else(|| link_not_found(code))?;

        info!(code = %code, "Link deleted");
        Ok(DeletedLink { code })
    }

    /// Returns every record, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    pub async fn list(&self) -> Result<Vec<LinkRecord>, AppError> {
        self.repository.list_all().await
    }

    /// Verifies that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the store cannot be reached.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    async fn insert_custom(&self, code: String, target_url: String) -> Result<LinkRecord, AppError> {
        // Fast path only; the insert below is what actually settles a race.
        if self.repository.exists(&code).await? {
            return Err(code_taken(&code));
        }

        self.repository
            .insert(NewLink {
                code: code.clone(),
                target_url,
            })
            .await
            .map_err(|e| match e {
                AppError::CodeConflict { .. } => code_taken(&code),
                other => other,
            })
    }

    async fn allocate_and_insert(&self, target_url: String) -> Result<LinkRecord, AppError> {
        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let code = generate_code();

            if self.repository.exists(&code).await? {
                debug!(attempt, code = %code, "Generated code already taken");
                continue;
            }

            let new_link = NewLink {
                code,
                target_url: target_url.clone(),
            };

            match self.repository.insert(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::CodeConflict { .. }) => {
                    debug!(attempt, "Generated code claimed concurrently");
                }
                Err(e) => return Err(e),
            }
        }

        metrics::counter!(ALLOCATION_EXHAUSTED_COUNTER).increment(1);
        error!(
            attempts = MAX_ALLOCATION_ATTEMPTS,
            "Code allocation exhausted; code space may be too crowded"
        );

        Err(AppError::allocation_exhausted(
            "Failed to generate unique code",
            json!({ "attempts": MAX_ALLOCATION_ATTEMPTS }),
        ))
    }
}

/// Checks that `target_url` is present and parses as an absolute URL.
fn validate_target_url(target_url: &str) -> Result<(), AppError> {
    if target_url.trim().is_empty() {
        return Err(AppError::invalid_url("Target URL is required", json!({})));
    }

    Url::parse(target_url).map_err(|e| {
        AppError::invalid_url("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    Ok(())
}

fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Link not found", json!({ "code": code }))
}

fn code_taken(code: &str) -> AppError {
    AppError::conflict("This short code is already in use", json!({ "code": code }))
}
