use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which fetcher retrieves search result pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchBackend {
    /// Plain HTTP GET with browser-like headers
    #[default]
    Http,
    /// Load the page through a WebDriver session
    WebDriver,
}

/// Structural selectors used to pull fields out of each listing item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSelectors {
    /// Selector for a single candidate listing item
    #[serde(default = "default_item_selector")]
    pub item: String,

    /// Selector for the listing detail anchor; items without it are not listings
    #[serde(default = "default_anchor_selector")]
    pub anchor: String,

    #[serde(default = "default_title_selector")]
    pub title: String,

    #[serde(default = "default_company_selector")]
    pub company: String,

    #[serde(default = "default_location_selector")]
    pub location: String,

    /// Selector for the element carrying a machine-readable `datetime` attribute
    #[serde(default = "default_date_selector")]
    pub date_posted: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            item: default_item_selector(),
            anchor: default_anchor_selector(),
            title: default_title_selector(),
            company: default_company_selector(),
            location: default_location_selector(),
            date_posted: default_date_selector(),
        }
    }
}

/// Configuration for the listing scraper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Public search endpoint queried for each page
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Site origin used to resolve root-relative listing links
    #[serde(default = "default_site_origin")]
    pub site_origin: String,

    /// Location sent upstream when the request leaves it unspecified
    #[serde(default = "default_location")]
    pub default_location: String,

    /// Submission tracking token sent as `trk`
    #[serde(default = "default_tracking_token")]
    pub tracking_token: String,

    /// Restrict results to "easy apply" postings (`f_AL`)
    #[serde(default = "default_easy_apply")]
    pub easy_apply: bool,

    /// Results per page offset
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Wait between consecutive page fetches, in milliseconds
    #[serde(default = "default_politeness_delay_ms")]
    pub politeness_delay_ms: u64,

    /// Per-request timeout, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Hard cap on offsets attempted in one search
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Drop records whose url was already accumulated
    #[serde(default)]
    pub dedupe_by_url: bool,

    #[serde(default)]
    pub backend: FetchBackend,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// File holding the last search's records
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    #[serde(default)]
    pub selectors: ListingSelectors,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            site_origin: default_site_origin(),
            default_location: default_location(),
            tracking_token: default_tracking_token(),
            easy_apply: default_easy_apply(),
            page_size: default_page_size(),
            politeness_delay_ms: default_politeness_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            max_pages: default_max_pages(),
            dedupe_by_url: false,
            backend: FetchBackend::default(),
            webdriver_url: default_webdriver_url(),
            store_path: default_store_path(),
            selectors: ListingSelectors::default(),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SearchError> {
        let path = path.as_ref();
        let mut contents = String::new();
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut contents))
            .map_err(|e| SearchError::Config(format!("{}: {}", path.display(), e)))?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SearchError> {
        serde_json::from_str(json).map_err(|e| SearchError::Config(e.to_string()))
    }

    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_endpoint() -> String {
    "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search".to_string()
}

fn default_site_origin() -> String {
    "https://www.linkedin.com".to_string()
}

fn default_location() -> String {
    "India".to_string()
}

fn default_tracking_token() -> String {
    "public_jobs_jobs-search-bar_search-submit".to_string()
}

fn default_easy_apply() -> bool {
    true
}

fn default_page_size() -> usize {
    10
}

fn default_politeness_delay_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_pages() -> usize {
    100
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_store_path() -> PathBuf {
    PathBuf::from("jobs_data.json")
}

fn default_item_selector() -> String {
    "li".to_string()
}

fn default_anchor_selector() -> String {
    r#"a[data-tracking-control-name*="jserp-result"]"#.to_string()
}

fn default_title_selector() -> String {
    "h3.base-search-card__title".to_string()
}

fn default_company_selector() -> String {
    "h4.base-search-card__subtitle".to_string()
}

fn default_location_selector() -> String {
    r#"[data-field="jobLocation"], .job-search-card__location"#.to_string()
}

fn default_date_selector() -> String {
    "time".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            ScraperConfig::from_json(r#"{"page_size": 25, "backend": "webdriver"}"#).unwrap();

        assert_eq!(config.page_size, 25);
        assert_eq!(config.backend, FetchBackend::WebDriver);
        assert_eq!(config.politeness_delay(), Duration::from_secs(1));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.default_location, "India");
        assert_eq!(config.selectors, ListingSelectors::default());
        assert!(!config.dedupe_by_url);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = ScraperConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scout.json");
        std::fs::write(&path, r#"{"selectors": {"title": "h2.title"}}"#).unwrap();

        let config = ScraperConfig::from_file(&path).unwrap();
        assert_eq!(config.selectors.title, "h2.title");
        assert_eq!(config.selectors.item, "li");

        assert!(ScraperConfig::from_file(dir.path().join("missing.json")).is_err());
    }
}
