use crate::error::SearchError;
use crate::utils::collapse_whitespace;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

/// Sentinel stored in any record field that could not be resolved
pub const UNKNOWN: &str = "unknown";

/// Location recorded on a search request when the caller gave none
pub const UNSPECIFIED_LOCATION: &str = "unspecified";

// Calendar date with an optional time part; ASCII digits only
static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])(T[0-9]{2}:[0-9]{2}(:[0-9]{2}(\.[0-9]+)?)?(Z|[+-][0-9]{2}:?[0-9]{2})?)?$",
    )
    .expect("ISO date pattern is valid")
});

/// One normalized job posting extracted from a search result page.
///
/// Every field is always populated: values missing from the source markup hold
/// [`UNKNOWN`]. Records have no identity beyond their fields; collaborators that
/// need deduplication compare by `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    /// ISO-8601 date (`YYYY-MM-DD`, optionally with a time part) or [`UNKNOWN`]
    pub date_posted: String,
    /// Absolute URL of the listing detail page
    pub url: String,
}

/// Raw, untrusted field values as pulled out of one listing item
#[derive(Debug, Clone, Default)]
pub struct RawListing {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub date_posted: Option<String>,
    pub href: Option<String>,
}

impl JobRecord {
    /// Build a record from raw extracted values, normalizing every field.
    ///
    /// Whitespace is collapsed, empty values become [`UNKNOWN`], the date is kept
    /// only when the whole value is an ISO-8601 date, and `href` is resolved against `origin`.
    pub fn from_raw(raw: RawListing, origin: &Url) -> Self {
        Self {
            title: text_or_unknown(raw.title),
            company: text_or_unknown(raw.company),
            location: text_or_unknown(raw.location),
            date_posted: normalize_date(raw.date_posted),
            url: raw
                .href
                .and_then(|href| resolve_url(&href, origin))
                .unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

fn text_or_unknown(value: Option<String>) -> String {
    value
        .map(|v| collapse_whitespace(&v))
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn normalize_date(value: Option<String>) -> String {
    match value.map(|v| v.trim().to_string()) {
        Some(date) if ISO_DATE.is_match(&date) => date,
        _ => UNKNOWN.to_string(),
    }
}

/// Resolve a listing href into an absolute URL.
///
/// Absolute `http(s)` hrefs are returned unchanged; anything else is joined onto
/// `origin`. Returns `None` for empty or unresolvable hrefs.
pub fn resolve_url(href: &str, origin: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if let Ok(parsed) = Url::parse(href) {
        return match parsed.scheme() {
            "http" | "https" => Some(href.to_string()),
            _ => None,
        };
    }

    origin.join(href).ok().map(|u| u.to_string())
}

/// Parameters of one search. Validated on construction so invalid requests fail before any I/O.
///
/// Fields are private: the only way to get a request is through [`SearchRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    keywords: String,
    location: String,
    target_count: usize,
}

impl SearchRequest {
    /// Create a validated search request.
    ///
    /// A blank `location` is recorded as [`UNSPECIFIED_LOCATION`].
    pub fn new(
        keywords: &str,
        location: Option<&str>,
        target_count: usize,
    ) -> Result<Self, SearchError> {
        let keywords = collapse_whitespace(keywords);
        if keywords.is_empty() {
            return Err(SearchError::EmptyKeywords);
        }
        if target_count == 0 {
            return Err(SearchError::ZeroTargetCount);
        }

        let location = location
            .map(collapse_whitespace)
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| UNSPECIFIED_LOCATION.to_string());

        Ok(Self {
            keywords,
            location,
            target_count,
        })
    }

    /// Check the invariants `new` establishes.
    ///
    /// Entry points that accept a request re-check it, so no request reaches the
    /// network with blank keywords or a zero target.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.keywords.trim().is_empty() {
            return Err(SearchError::EmptyKeywords);
        }
        if self.target_count == 0 {
            return Err(SearchError::ZeroTargetCount);
        }
        Ok(())
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    /// Requested location, or [`UNSPECIFIED_LOCATION`]
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Request built without validation, for exercising the re-checks in tests
    #[cfg(test)]
    pub(crate) fn unchecked(keywords: &str, location: &str, target_count: usize) -> Self {
        Self {
            keywords: keywords.to_string(),
            location: location.to_string(),
            target_count,
        }
    }

    /// Location to send upstream, or `None` when the caller left it unspecified
    pub fn location_filter(&self) -> Option<&str> {
        if self.location == UNSPECIFIED_LOCATION {
            None
        } else {
            Some(&self.location)
        }
    }
}
