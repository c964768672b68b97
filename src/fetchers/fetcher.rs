use crate::config::ScraperConfig;
use crate::error::{FetchFailure, SearchError};
use crate::results::SearchRequest;
use async_trait::async_trait;
use url::Url;

/// Retrieves the raw markup of one search result page.
///
/// Implementations make a single attempt per call and report every failure as a
/// [`FetchFailure`] value; retry policy belongs to the caller.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, request: &SearchRequest, offset: usize) -> Result<String, FetchFailure>;

    /// Release any session held between fetches. Called once a search finishes
    /// or is cancelled; a later `fetch` may open a new one.
    async fn shutdown(&self) {}
}

/// Builds the search endpoint URL for a given request and page offset
#[derive(Debug, Clone)]
pub struct SearchUrl {
    endpoint: Url,
    default_location: String,
    tracking_token: String,
    easy_apply: bool,
}

impl SearchUrl {
    pub fn from_config(config: &ScraperConfig) -> Result<Self, SearchError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|source| SearchError::InvalidUrl {
            what: "search endpoint",
            url: config.endpoint.clone(),
            source,
        })?;

        Ok(Self {
            endpoint,
            default_location: config.default_location.clone(),
            tracking_token: config.tracking_token.clone(),
            easy_apply: config.easy_apply,
        })
    }

    pub fn for_page(&self, request: &SearchRequest, offset: usize) -> Url {
        let location = request
            .location_filter()
            .unwrap_or(self.default_location.as_str());

        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("keywords", request.keywords())
                .append_pair("location", location)
                .append_pair("trk", &self.tracking_token)
                .append_pair("start", &offset.to_string());
            if self.easy_apply {
                query.append_pair("f_AL", "true");
            }
        }
        url
    }
}
