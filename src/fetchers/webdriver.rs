use crate::config::ScraperConfig;
use crate::error::{FetchCause, FetchFailure, SearchError};
use crate::fetchers::fetcher::{PageFetcher, SearchUrl};
use crate::results::SearchRequest;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;

/// Common local WebDriver addresses tried when the configured one is unreachable
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444",
];

/// Fetches search result pages through a WebDriver-controlled browser.
///
/// The session is opened lazily on the first fetch and reused for every later
/// page. Pages are fetched one at a time, so a single session is enough.
pub struct WebDriverFetcher {
    webdriver_url: String,
    search_url: SearchUrl,
    page_timeout: Duration,
    client: Mutex<Option<Client>>,
}

impl WebDriverFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, SearchError> {
        Ok(Self {
            webdriver_url: config.webdriver_url.clone(),
            search_url: SearchUrl::from_config(config)?,
            page_timeout: config.request_timeout(),
            client: Mutex::new(None),
        })
    }

    pub fn webdriver_url(&self) -> &str {
        &self.webdriver_url
    }
}

#[async_trait]
impl PageFetcher for WebDriverFetcher {
    async fn fetch(&self, request: &SearchRequest, offset: usize) -> Result<String, FetchFailure> {
        let url = self.search_url.for_page(request, offset);
        let mut guard = self.client.lock().await;

        if guard.is_none() {
            *guard = connect_to_webdriver(&self.webdriver_url).await;
        }
        let Some(client) = guard.as_ref() else {
            return Err(FetchFailure::new(
                offset,
                FetchCause::WebDriver(format!(
                    "no WebDriver server reachable at {}",
                    self.webdriver_url
                )),
            ));
        };

        let loaded = timeout(self.page_timeout, async {
            client.goto(url.as_str()).await?;
            client.source().await
        })
        .await;

        match loaded {
            Ok(Ok(source)) => Ok(source),
            Ok(Err(e)) => {
                if e.to_string().contains("Unable to find session") {
                    // Drop the dead session so the next offset reconnects
                    ::log::warn!("Lost WebDriver session while loading offset {}", offset);
                    *guard = None;
                }
                Err(FetchFailure::new(offset, FetchCause::WebDriver(e.to_string())))
            }
            Err(_) => Err(FetchFailure::new(offset, FetchCause::Timeout)),
        }
    }

    /// End the WebDriver session, if one was opened
    async fn shutdown(&self) {
        if let Some(client) = self.client.lock().await.take() {
            ::log::debug!("Closing WebDriver session at {}", self.webdriver_url);
            if let Err(e) = client.close().await {
                ::log::warn!("Failed to close WebDriver session: {}", e);
            }
        }
    }
}

/// Connects to the configured WebDriver instance, falling back to common local addresses
async fn connect_to_webdriver(webdriver_url: &str) -> Option<Client> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Some(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
        }
    }

    for url in FALLBACK_WEBDRIVER_URLS {
        if url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Some(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    None
}
