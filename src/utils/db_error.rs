//! Helpers for classifying PostgreSQL errors.

/// Name of the unique constraint guarding `links.code`.
pub const LINKS_CODE_CONSTRAINT: &str = "links_code_key";

/// Returns `true` if `e` is a unique violation raised by [`LINKS_CODE_CONSTRAINT`].
///
/// This is the authoritative signal that a code is taken; any pre-insert
/// lookup can race with a concurrent writer.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation() && db.constraint() == Some(LINKS_CODE_CONSTRAINT))
}
