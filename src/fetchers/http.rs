use crate::config::ScraperConfig;
use crate::error::{FetchCause, FetchFailure, SearchError};
use crate::fetchers::fetcher::{PageFetcher, SearchUrl};
use crate::results::SearchRequest;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Fixed browser-like header set sent with every page request
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("empty"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("cors"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("same-origin"),
    );
    headers
}

/// Fetches search result pages with a plain HTTP GET
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    search_url: SearchUrl,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            search_url: SearchUrl::from_config(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, request: &SearchRequest, offset: usize) -> Result<String, FetchFailure> {
        let url = self.search_url.for_page(request, offset);
        ::log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchFailure::new(offset, classify(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::new(offset, FetchCause::Status(status.as_u16())));
        }

        response
            .text()
            .await
            .map_err(|e| FetchFailure::new(offset, classify(&e)))
    }
}

fn classify(error: &reqwest::Error) -> FetchCause {
    if error.is_timeout() {
        FetchCause::Timeout
    } else {
        FetchCause::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, MockServer};

    fn config_for(server: &MockServer) -> ScraperConfig {
        ScraperConfig {
            endpoint: server.url("/jobs-guest/jobs/api/seeMoreJobPostings/search"),
            request_timeout_secs: 5,
            ..ScraperConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_returns_body_unmodified() {
        let server = MockServer::start_async().await;
        let body = "<li>  raw <b>markup</b>\n</li>";
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/jobs-guest/jobs/api/seeMoreJobPostings/search")
                    .query_param("keywords", "backend engineer")
                    .query_param("location", "Bengaluru")
                    .query_param("trk", "public_jobs_jobs-search-bar_search-submit")
                    .query_param("start", "20")
                    .query_param("f_AL", "true")
                    .header("accept-language", "en-US,en;q=0.9")
                    .header("sec-fetch-mode", "cors")
                    .header("user-agent", BROWSER_USER_AGENT);
                then.status(200).body(body);
            })
            .await;

        let fetcher = HttpFetcher::new(&config_for(&server)).unwrap();
        let request = SearchRequest::new("backend engineer", Some("Bengaluru"), 30).unwrap();
        let markup = fetcher.fetch(&request, 20).await.unwrap();

        assert_eq!(markup, body);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(429);
            })
            .await;

        let fetcher = HttpFetcher::new(&config_for(&server)).unwrap();
        let request = SearchRequest::new("rust", None, 10).unwrap();
        let failure = fetcher.fetch(&request, 0).await.unwrap_err();

        assert_eq!(failure, FetchFailure::new(0, FetchCause::Status(429)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_failure() {
        let config = ScraperConfig {
            endpoint: "http://127.0.0.1:9/search".to_string(),
            request_timeout_secs: 2,
            ..ScraperConfig::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();
        let request = SearchRequest::new("rust", None, 10).unwrap();
        let failure = fetcher.fetch(&request, 30).await.unwrap_err();

        assert_eq!(failure.offset, 30);
        assert!(matches!(
            failure.cause,
            FetchCause::Network(_) | FetchCause::Timeout
        ));
    }
}
