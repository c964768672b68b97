pub mod extractors;

#[cfg(test)]
pub(crate) mod tests;

use crate::config::ListingSelectors;
use crate::error::SearchError;
use crate::results::{JobRecord, RawListing};
use extractors::{AttrOf, FieldExtractor, TextOf, compile_selector};
use scraper::{Html, Selector};
use url::Url;

/// One extractor per record field, applied to every listing item
pub struct ExtractionTable {
    pub href: Box<dyn FieldExtractor>,
    pub title: Box<dyn FieldExtractor>,
    pub company: Box<dyn FieldExtractor>,
    pub location: Box<dyn FieldExtractor>,
    pub date_posted: Box<dyn FieldExtractor>,
}

impl ExtractionTable {
    /// Build the table from configured selectors
    pub fn from_selectors(selectors: &ListingSelectors) -> Result<Self, SearchError> {
        Ok(Self {
            href: Box::new(AttrOf::new("anchor", &selectors.anchor, "href")?),
            title: Box::new(TextOf::new("title", &selectors.title)?),
            company: Box::new(TextOf::new("company", &selectors.company)?),
            location: Box::new(TextOf::new("location", &selectors.location)?),
            date_posted: Box::new(AttrOf::new("date_posted", &selectors.date_posted, "datetime")?),
        })
    }
}

/// Turns one page of search result markup into job records.
///
/// Parsing never fails: items that are not job listings are skipped and
/// missing optional fields fall back to `"unknown"`.
pub struct ListingParser {
    item: Selector,
    table: ExtractionTable,
    origin: Url,
    page_size: usize,
}

impl ListingParser {
    pub fn new(
        selectors: &ListingSelectors,
        site_origin: &str,
        page_size: usize,
    ) -> Result<Self, SearchError> {
        let origin = Url::parse(site_origin).map_err(|source| SearchError::InvalidUrl {
            what: "site origin",
            url: site_origin.to_string(),
            source,
        })?;

        Ok(Self {
            item: compile_selector("item", &selectors.item)?,
            table: ExtractionTable::from_selectors(selectors)?,
            origin,
            page_size,
        })
    }

    /// Replace the extraction table, keeping item selection, origin and page size
    pub fn with_table(mut self, table: ExtractionTable) -> Self {
        self.table = table;
        self
    }

    /// Extract at most `page_size` records, in document order
    pub fn parse(&self, markup: &str) -> Vec<JobRecord> {
        let doc = Html::parse_document(markup);

        let records = doc
            .select(&self.item)
            .filter_map(|item| {
                // No detail anchor means this list item is not a job listing
                let Some(href) = self.table.href.extract(item) else {
                    ::log::trace!("Skipping list item without a listing anchor");
                    return None;
                };

                let raw = RawListing {
                    title: self.table.title.extract(item),
                    company: self.table.company.extract(item),
                    location: self.table.location.extract(item),
                    date_posted: self.table.date_posted.extract(item),
                    href: Some(href),
                };
                let record = JobRecord::from_raw(raw, &self.origin);

                if record.url == crate::results::UNKNOWN {
                    ::log::debug!("Skipping listing with unresolvable link");
                    None
                } else {
                    Some(record)
                }
            })
            .take(self.page_size)
            .collect::<Vec<_>>();

        ::log::debug!("Listing parser found {} records", records.len());
        records
    }
}
