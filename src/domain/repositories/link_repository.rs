//! Repository trait for the durable link store.

use crate::domain::entities::{LinkRecord, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable store for link records.
///
/// Implementations must provide:
/// - a unique constraint on `code`, reported as [`AppError::CodeConflict`] on insert
/// - row-level locking for [`LinkRepository::resolve_and_hit`], so concurrent hits on
///   the same code are serialized while different codes never block each other
/// - full rollback of any operation that fails midway
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new record with `clicks = 0` and `last_accessed = NULL`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeConflict`] if the code is already taken.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn insert(&self, new_link: NewLink) -> Result<LinkRecord, AppError>;

    /// Checks whether a code is currently in use.
    ///
    /// The answer can be stale by the time the caller acts on it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Finds a record by code without modifying it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, AppError>;

    /// Locks the record, increments `clicks`, stamps `last_accessed`, and commits.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(target_url))` if the record existed and the hit was committed
    /// - `Ok(None)` if no record matches; nothing is written
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors; the hit is not recorded.
    async fn resolve_and_hit(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Hard-deletes a record.
    ///
    /// Returns the deleted code, or `None` if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn delete(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Lists all records, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn list_all(&self) -> Result<Vec<LinkRecord>, AppError>;

    /// Round-trips a trivial query to verify connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
