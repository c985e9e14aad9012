//! Link record entity.

use chrono::{DateTime, Utc};

/// A short code mapped to its target URL.
///
/// `code`, `target_url` and `created_at` never change after insert.
/// `clicks` and `last_accessed` are only ever written by a resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRecord {
    pub code: String,
    pub target_url: String,
    pub clicks: i64,
    pub last_accessed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LinkRecord {
    /// Creates a new LinkRecord instance.
    pub fn new(
        code: String,
        target_url: String,
        clicks: i64,
        last_accessed: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            target_url,
            clicks,
            last_accessed,
            created_at,
        }
    }

    /// Returns true if the link has been resolved at least once.
    pub fn was_accessed(&self) -> bool {
        self.last_accessed.is_some()
    }
}

/// Input data for inserting a link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
}

/// Code of a record that was removed.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedLink {
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_record_creation() {
        let now = Utc::now();
        let link = LinkRecord::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            0,
            None,
            now,
        );

        assert_eq!(link.code, "abc123");
        assert_eq!(link.target_url, "https://example.com");
        assert_eq!(link.clicks, 0);
        assert_eq!(link.created_at, now);
        assert!(!link.was_accessed());
    }

    #[test]
    fn test_link_record_was_accessed() {
        let link = LinkRecord::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            3,
            Some(Utc::now()),
            Utc::now(),
        );

        assert!(link.was_accessed());
    }
}
