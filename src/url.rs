//! URL entry types for sitemap records.

use chrono::{DateTime, FixedOffset};
use std::fmt;

/// How frequently the page at a location is likely to change.
///
/// Hint for crawlers only; values are defined by the sitemap protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    /// The protocol token for this frequency.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One location to be written as one sitemap record.
///
/// Only the location is required; the remaining fields are optional
/// crawler hints. The stream does not validate any of them, and the
/// renderer decides how each field appears in the output.
#[derive(Debug, Clone, PartialEq)]
pub struct Url {
    location: String,
    last_modified: Option<DateTime<FixedOffset>>,
    change_frequency: Option<ChangeFrequency>,
    priority: Option<f32>,
}

impl Url {
    /// Create an entry with only a location.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            last_modified: None,
            change_frequency: None,
            priority: None,
        }
    }

    /// Set the last modification time.
    pub fn with_last_modified(mut self, last_modified: impl Into<DateTime<FixedOffset>>) -> Self {
        self.last_modified = Some(last_modified.into());
        self
    }

    /// Set the expected change frequency.
    pub fn with_change_frequency(mut self, change_frequency: ChangeFrequency) -> Self {
        self.change_frequency = Some(change_frequency);
        self
    }

    /// Set the crawl priority (protocol range 0.0 to 1.0).
    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
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

    #[inline]
    pub fn change_frequency(&self) -> Option<ChangeFrequency> {
        self.change_frequency
    }

    #[inline]
    pub fn priority(&self) -> Option<f32> {
        self.priority
    }
}
