//! Sitemap index entry type.

use chrono::{DateTime, FixedOffset};

/// A pointer to one child sitemap, written as one sitemap index record.
#[derive(Debug, Clone, PartialEq)]
pub struct Sitemap {
    location: String,
    last_modified: Option<DateTime<FixedOffset>>,
}

impl Sitemap {
    /// Create an index entry pointing at a child sitemap.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            last_modified: None,
        }
    }

    /// Set the child sitemap's last modification time.
    pub fn with_last_modified(mut self, last_modified: impl Into<DateTime<FixedOffset>>) -> Self {
        self.last_modified = Some(last_modified.into());
        self
    }

    #[inline]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[inline]
    pub fn last_modified(&self) -> Option<&DateTime<FixedOffset>> {
        self.last_modified.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn entry_fields() {
        let sitemap = Sitemap::new("https://example.com/sitemap1.xml");
        assert_eq!(sitemap.location(), "https://example.com/sitemap1.xml");
        assert!(sitemap.last_modified().is_none());

        let modified = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2026, 7, 15, 8, 0, 0)
            .unwrap();
        let sitemap = sitemap.with_last_modified(modified);
        assert_eq!(sitemap.last_modified(), Some(&modified));
    }
}
