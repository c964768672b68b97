use crate::config::ScraperConfig;
use crate::error::FetchFailure;
use crate::fetchers::PageFetcher;
use crate::parsers::ListingParser;
use crate::results::{JobRecord, SearchRequest};
use crate::store::ResultStore;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Outcome of one page offset
#[derive(Debug)]
pub enum PageResult {
    /// The page parsed into at least one record
    Records { offset: usize, records: Vec<JobRecord> },
    /// The page could not be fetched
    FetchFailed(FetchFailure),
    /// The page was fetched but held no recognizable listings
    ParseFailed { offset: usize },
}

/// Tunables for the pagination loop
#[derive(Debug, Clone)]
pub struct PaginationSettings {
    pub page_size: usize,
    pub politeness_delay: Duration,
    pub max_pages: usize,
    pub dedupe_by_url: bool,
}

impl PaginationSettings {
    pub fn from_config(config: &ScraperConfig) -> Self {
        Self {
            page_size: config.page_size.max(1),
            politeness_delay: config.politeness_delay(),
            max_pages: config.max_pages,
            dedupe_by_url: config.dedupe_by_url,
        }
    }

    /// Offsets needed to reach `target_count`, bounded by the hard page cap
    pub fn page_budget(&self, target_count: usize) -> usize {
        target_count.div_ceil(self.page_size).min(self.max_pages)
    }
}

/// What a finished search produced
#[derive(Debug, Clone, Default)]
pub struct SearchReport {
    pub records: Vec<JobRecord>,
    pub pages_attempted: usize,
    pub pages_failed: usize,
    pub pages_empty: usize,
    pub cancelled: bool,
}

/// Drives the fetcher and parser across successive page offsets
pub struct Paginator {
    fetcher: Arc<dyn PageFetcher>,
    parser: ListingParser,
    store: Arc<dyn ResultStore>,
    settings: PaginationSettings,
}

impl Paginator {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        parser: ListingParser,
        store: Arc<dyn ResultStore>,
        settings: PaginationSettings,
    ) -> Self {
        Self {
            fetcher,
            parser,
            store,
            settings,
        }
    }

    /// Fetch and parse a single offset. Never fails; failures come back as values.
    pub async fn fetch_page(&self, request: &SearchRequest, offset: usize) -> PageResult {
        let markup = match self.fetcher.fetch(request, offset).await {
            Ok(markup) => markup,
            Err(failure) => return PageResult::FetchFailed(failure),
        };

        let records = self.parser.parse(&markup);
        if records.is_empty() {
            PageResult::ParseFailed { offset }
        } else {
            PageResult::Records { offset, records }
        }
    }

    /// Run a full search and commit the results to the store.
    ///
    /// Pages are fetched sequentially with the politeness delay between them.
    /// A failed or empty page is skipped; the loop ends once `target_count`
    /// records are accumulated or the page budget is spent. Cancellation is
    /// checked at every offset boundary; a cancelled search returns what it has
    /// but leaves the store untouched. The fetcher is shut down once the loop
    /// ends either way.
    pub async fn run(&self, request: &SearchRequest, cancel: &CancellationToken) -> SearchReport {
        let target = request.target_count();
        let budget = self.settings.page_budget(target);
        let mut report = SearchReport::default();
        let mut seen = HashSet::new();

        ::log::info!(
            "Searching '{}' in {} for {} records over at most {} pages",
            request.keywords(),
            request.location(),
            target,
            budget
        );

        for page in 0..budget {
            if page > 0 && !self.politeness_wait(cancel).await {
                report.cancelled = true;
                break;
            }
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let offset = page * self.settings.page_size;
            report.pages_attempted += 1;

            match self.fetch_page(request, offset).await {
                PageResult::Records { offset, records } => {
                    let found = records.len();
                    for record in records {
                        if self.settings.dedupe_by_url && !seen.insert(record.url.clone()) {
                            ::log::debug!("Dropping duplicate listing {}", record.url);
                            continue;
                        }
                        report.records.push(record);
                    }
                    ::log::info!(
                        "Offset {}: {} records, {} accumulated",
                        offset,
                        found,
                        report.records.len()
                    );
                }
                PageResult::FetchFailed(failure) => {
                    report.pages_failed += 1;
                    ::log::warn!("Skipping page: {}", failure);
                }
                PageResult::ParseFailed { offset } => {
                    report.pages_empty += 1;
                    ::log::warn!("Offset {} held no recognizable listings", offset);
                }
            }

            if report.records.len() >= target {
                break;
            }
        }

        report.records.truncate(target);
        self.fetcher.shutdown().await;

        if report.cancelled {
            ::log::info!(
                "Search cancelled after {} pages; store left unchanged",
                report.pages_attempted
            );
            return report;
        }

        if let Err(e) = self.store.save(&report.records) {
            ::log::error!("Failed to save search results: {}", e);
        }

        ::log::info!(
            "Search complete: {} records from {} pages ({} failed, {} empty)",
            report.records.len(),
            report.pages_attempted,
            report.pages_failed,
            report.pages_empty
        );
        report
    }

    /// Sleep for the politeness delay. Returns false if cancelled while waiting.
    async fn politeness_wait(&self, cancel: &CancellationToken) -> bool {
        if self.settings.politeness_delay.is_zero() {
            return true;
        }
        tokio::select! {
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(self.settings.politeness_delay) => true,
        }
    }
}
