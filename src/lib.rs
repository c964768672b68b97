// Re-export modules
pub mod commands;
pub mod config;
pub mod error;
pub mod fetchers;
pub mod filter;
pub mod pagination;
pub mod parsers;
pub mod results;
pub mod store;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{FetchBackend, ScraperConfig};
pub use error::{FetchCause, FetchFailure, SearchError, StoreError};
pub use pagination::SearchReport;
pub use results::{JobRecord, SearchRequest, UNKNOWN};
pub use store::{JsonFileStore, MemoryStore, ResultStore};

use fetchers::{HttpFetcher, PageFetcher, WebDriverFetcher};
use pagination::{PaginationSettings, Paginator};
use parsers::ListingParser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Main builder for running job searches and reaching the result store
pub struct JobSearch {
    config: ScraperConfig,
    fetcher: Option<Arc<dyn PageFetcher>>,
    store: Option<Arc<dyn ResultStore>>,
}

impl Default for JobSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl JobSearch {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ScraperConfig::default(),
            fetcher: None,
            store: None,
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> Result<Self, SearchError> {
        let config = ScraperConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, SearchError> {
        let config = ScraperConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    /// Set the number of results requested per page offset
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// Set the wait between consecutive page fetches
    pub fn with_politeness_delay(mut self, delay_ms: u64) -> Self {
        self.config.politeness_delay_ms = delay_ms;
        self
    }

    /// Set the hard cap on offsets attempted per search
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Choose how pages are fetched
    pub fn with_backend(mut self, backend: FetchBackend) -> Self {
        self.config.backend = backend;
        self
    }

    /// Set the file the default store persists to
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.store_path = path.into();
        self
    }

    /// Use a custom page fetcher instead of the configured backend
    pub fn with_fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Use a custom result store instead of the JSON file at `store_path`
    pub fn with_store(mut self, store: Arc<dyn ResultStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// The store searches commit to and downstream tools read from
    pub fn store(&self) -> Arc<dyn ResultStore> {
        match &self.store {
            Some(store) => Arc::clone(store),
            None => Arc::new(JsonFileStore::new(&self.config.store_path)),
        }
    }

    fn fetcher(&self) -> Result<Arc<dyn PageFetcher>, SearchError> {
        if let Some(fetcher) = &self.fetcher {
            return Ok(Arc::clone(fetcher));
        }

        let fetcher: Arc<dyn PageFetcher> = match self.config.backend {
            FetchBackend::Http => Arc::new(HttpFetcher::new(&self.config)?),
            FetchBackend::WebDriver => {
                let mut config = self.config.clone();
                // Override the WebDriver URL with an environment variable if provided
                if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
                    if !webdriver_url.is_empty() {
                        config.webdriver_url = webdriver_url;
                    }
                }
                Arc::new(WebDriverFetcher::new(&config)?)
            }
        };
        Ok(fetcher)
    }

    /// Build the pagination controller for the current configuration.
    ///
    /// All setup errors (bad selectors, endpoint or origin) surface here, before any network I/O.
    pub fn paginator(&self) -> Result<Paginator, SearchError> {
        let settings = PaginationSettings::from_config(&self.config);
        let parser = ListingParser::new(
            &self.config.selectors,
            &self.config.site_origin,
            settings.page_size,
        )?;

        Ok(Paginator::new(self.fetcher()?, parser, self.store(), settings))
    }

    /// Run a search to completion and commit the results to the store
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchReport, SearchError> {
        self.search_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Run a search that stops at the next offset boundary once `cancel` fires.
    ///
    /// An invalid request is rejected before any fetch and leaves the store untouched.
    pub async fn search_with_cancel(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<SearchReport, SearchError> {
        request.validate()?;
        let paginator = self.paginator()?;
        Ok(paginator.run(request, cancel).await)
    }
}
