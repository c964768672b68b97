use crate::results::JobRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Configuration for filtering stored job records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordFilterConfig {
    /// Case-insensitive substring the record's location must contain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Regex patterns for titles to include (if empty, all titles are included unless excluded)
    #[serde(default)]
    pub include_title_patterns: Vec<String>,

    /// Regex patterns for titles to exclude (these take precedence over include patterns)
    #[serde(default)]
    pub exclude_title_patterns: Vec<String>,
}

/// Filter that decides which stored records a downstream tool should see
#[derive(Debug)]
pub struct RecordFilter {
    location: Option<String>,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl RecordFilter {
    /// Create a new record filter from configuration
    pub fn new(config: RecordFilterConfig) -> Result<Self, regex::Error> {
        let include_regexes = config
            .include_title_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        let exclude_regexes = config
            .exclude_title_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            location: config
                .location
                .map(|l| l.trim().to_lowercase())
                .filter(|l| !l.is_empty()),
            include_regexes,
            exclude_regexes,
        })
    }

    /// Filter only on a location substring
    pub fn by_location(location: &str) -> Self {
        Self {
            location: Some(location.trim().to_lowercase()).filter(|l| !l.is_empty()),
            include_regexes: Vec::new(),
            exclude_regexes: Vec::new(),
        }
    }

    /// Determine if a record passes every filtering rule
    pub fn matches(&self, record: &JobRecord) -> bool {
        if let Some(location) = &self.location {
            if !record.location.to_lowercase().contains(location.as_str()) {
                return false;
            }
        }

        // Exclusions take precedence
        if self.exclude_regexes.iter().any(|r| r.is_match(&record.title)) {
            return false;
        }

        self.include_regexes.is_empty() || self.include_regexes.iter().any(|r| r.is_match(&record.title))
    }

    /// Records that pass the filter, in their original order
    pub fn apply(&self, records: &[JobRecord]) -> Vec<JobRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
