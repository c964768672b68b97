use thiserror::Error;

/// Failures visible to the caller of a search. All of them are raised before any network I/O.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search keywords must not be empty")]
    EmptyKeywords,

    #[error("target count must be greater than zero")]
    ZeroTargetCount,

    #[error("invalid {field} selector '{selector}': {reason}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        reason: String,
    },

    #[error("invalid {what} URL '{url}': {source}")]
    InvalidUrl {
        what: &'static str,
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to load configuration: {0}")]
    Config(String),
}

/// Why a single page could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchCause {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("webdriver error: {0}")]
    WebDriver(String),
}

/// A page fetch that failed. Carried as a value through the pagination loop, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fetch failed at offset {offset}: {cause}")]
pub struct FetchFailure {
    pub offset: usize,
    pub cause: FetchCause,
}

impl FetchFailure {
    pub fn new(offset: usize, cause: FetchCause) -> Self {
        Self { offset, cause }
    }
}

/// Failures while persisting the result store. Reads never fail; see [`crate::store::ResultStore::load`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to replace store file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("store lock poisoned")]
    Poisoned,
}
