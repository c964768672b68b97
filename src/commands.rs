//! Inbound operations exposed to a calling host: search, list and filter,
//! each paired with the human-readable summary the host shows its user.

use crate::filter::RecordFilter;
use crate::results::JobRecord;
use crate::store::ResultStore;
use crate::utils::truncate_with_ellipsis;

const NO_JOBS_HINT: &str = "No jobs stored. Run a search first.";
const FILTER_PREVIEW_TITLES: usize = 5;
const FILTER_PREVIEW_TITLE_CHARS: usize = 50;

fn preview_line(number: usize, record: &JobRecord) -> String {
    format!(
        "{}. {} at {} ({})",
        number, record.title, record.company, record.location
    )
}

/// Count and numbered preview of a finished search, numbered from 1
pub fn search_summary(records: &[JobRecord]) -> String {
    let preview = records
        .iter()
        .enumerate()
        .map(|(i, r)| preview_line(i + 1, r))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Found {} jobs:\n{}", records.len(), preview)
}

/// Current store contents
pub fn list_jobs(store: &dyn ResultStore) -> Vec<JobRecord> {
    store.load()
}

/// Index-numbered listing of stored records, numbered from 0 so hosts can refer to them
pub fn list_summary(records: &[JobRecord]) -> String {
    if records.is_empty() {
        return NO_JOBS_HINT.to_string();
    }
    let preview = records
        .iter()
        .enumerate()
        .map(|(i, r)| preview_line(i, r))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Current jobs ({} total):\n{}", records.len(), preview)
}

/// Stored records that pass `filter`, or `None` when the store holds nothing.
///
/// The store is read once, so the emptiness check and the filtered result come
/// from the same snapshot.
pub fn filter_jobs(store: &dyn ResultStore, filter: &RecordFilter) -> Option<Vec<JobRecord>> {
    let records = store.load();
    if records.is_empty() {
        return None;
    }
    Some(filter.apply(&records))
}

/// Count and a short title preview of a location filter
pub fn filter_summary(location: &str, filtered: &[JobRecord]) -> String {
    let titles = filtered
        .iter()
        .take(FILTER_PREVIEW_TITLES)
        .map(|r| truncate_with_ellipsis(&r.title, FILTER_PREVIEW_TITLE_CHARS))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Filtered to {} jobs in/near '{}'. Titles: {}",
        filtered.len(),
        location,
        titles
    )
}

/// Summary for a store that has nothing to filter
pub fn empty_store_summary() -> &'static str {
    NO_JOBS_HINT
}
