use super::fixtures::{listing_item, listing_page};
use crate::config::ListingSelectors;
use crate::parsers::extractors::{FieldExtractor, TextOf};
use crate::parsers::{ExtractionTable, ListingParser};
use crate::results::UNKNOWN;
use scraper::ElementRef;

fn parser() -> ListingParser {
    ListingParser::new(&ListingSelectors::default(), "https://www.linkedin.com", 10).unwrap()
}

#[test]
fn test_parse_well_formed_item() {
    let markup = listing_item(3920, "Backend Engineer", "Acme Corp", "Bengaluru, Karnataka, India");
    let records = parser().parse(&markup);

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.title, "Backend Engineer");
    assert_eq!(record.company, "Acme Corp");
    assert_eq!(record.location, "Bengaluru, Karnataka, India");
    assert_eq!(record.date_posted, "2024-05-01");
    assert_eq!(record.url, "https://www.linkedin.com/jobs/view/3920");
}

#[test]
fn test_absolute_href_passes_through() {
    let markup = r#"<li>
        <a href="https://in.linkedin.com/jobs/view/rust-dev-at-acme-77?position=1"
           data-tracking-control-name="public_jobs_jserp-result_search-card">x</a>
        <h3 class="base-search-card__title">Rust Developer</h3>
    </li>"#;
    let records = parser().parse(markup);

    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].url,
        "https://in.linkedin.com/jobs/view/rust-dev-at-acme-77?position=1"
    );
}

#[test]
fn test_missing_company_keeps_item() {
    let markup = r#"<li>
        <a href="/jobs/view/55" data-tracking-control-name="public_jobs_jserp-result_search-card"></a>
        <h3 class="base-search-card__title">Platform Engineer</h3>
        <span data-field="jobLocation">Pune, India</span>
        <time datetime="2024-06-02">1 day ago</time>
    </li>"#;
    let records = parser().parse(markup);

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.company, UNKNOWN);
    assert_eq!(record.title, "Platform Engineer");
    assert_eq!(record.location, "Pune, India");
    assert_eq!(record.date_posted, "2024-06-02");
    assert_eq!(record.url, "https://www.linkedin.com/jobs/view/55");
}

#[test]
fn test_only_anchor_present() {
    let markup = r#"<li><a href="/jobs/view/1" data-tracking-control-name="public_jobs_jserp-result_search-card"></a></li>"#;
    let records = parser().parse(markup);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, UNKNOWN);
    assert_eq!(records[0].company, UNKNOWN);
    assert_eq!(records[0].location, UNKNOWN);
    assert_eq!(records[0].date_posted, UNKNOWN);
}

#[test]
fn test_skips_items_without_listing_anchor() {
    let markup = format!(
        r#"<li><a href="/help">Help center</a></li>
        <li><a data-tracking-control-name="public_jobs_jserp-result_search-card">no href</a></li>
        {}
        <li>Sign in to see more jobs</li>"#,
        listing_item(8, "SRE", "Globex", "Remote")
    );
    let records = parser().parse(&markup);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "SRE");
}

#[test]
fn test_no_listing_items_yields_empty() {
    assert!(parser().parse("").is_empty());
    assert!(parser().parse("<html><body><p>Please verify you are human</p></body></html>").is_empty());
    assert!(parser().parse("<<<not really markup").is_empty());
}

#[test]
fn test_caps_yield_to_page_size() {
    let markup = listing_page(100, 14, "Remote");
    let records = parser().parse(&markup);

    assert_eq!(records.len(), 10);
    assert_eq!(records[0].url, "https://www.linkedin.com/jobs/view/100");
    assert_eq!(records[9].url, "https://www.linkedin.com/jobs/view/109");
}

#[test]
fn test_returns_duplicates_within_page() {
    let item = listing_item(7, "Data Engineer", "Initech", "Remote");
    let markup = format!("{item}\n{item}");
    assert_eq!(parser().parse(&markup).len(), 2);
}

#[test]
fn test_alternate_location_marker() {
    let markup = r#"<li>
        <a href="/jobs/view/2" data-tracking-control-name="public_jobs_jserp-result_search-card"></a>
        <span class="job-search-card__location"> Hyderabad,
            Telangana </span>
    </li>"#;
    let records = parser().parse(markup);
    assert_eq!(records[0].location, "Hyderabad, Telangana");
}

struct Constant(&'static str);

impl FieldExtractor for Constant {
    fn extract(&self, _item: ElementRef<'_>) -> Option<String> {
        Some(self.0.to_string())
    }
}

#[test]
fn test_custom_extraction_table() {
    let selectors = ListingSelectors::default();
    let table = ExtractionTable {
        company: Box::new(Constant("Fixed Co")),
        title: Box::new(TextOf::new("title", "h3").unwrap()),
        ..ExtractionTable::from_selectors(&selectors).unwrap()
    };
    let parser = parser().with_table(table);

    let records = parser.parse(&listing_item(4, "QA Engineer", "Umbrella", "Remote"));
    assert_eq!(records[0].company, "Fixed Co");
    assert_eq!(records[0].title, "QA Engineer");
}

#[test]
fn test_invalid_origin_is_rejected() {
    assert!(ListingParser::new(&ListingSelectors::default(), "not a url", 10).is_err());
}
