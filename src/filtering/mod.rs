// Filter construction and application
//
// Filters narrow the corpus before any scoring happens:
// date range inclusive on both ends, participants and topics OR-matched
// by case-insensitive substring.

mod builder;
mod utils;

pub use builder::{build_filters, DatePhrase};
pub use utils::{contains_ignore_case, find_ignore_case};

use crate::model::{SearchFilters, SummaryRecord};

/// Whether a record survives every constraint present in `filters`
pub fn matches_filters(record: &SummaryRecord, filters: &SearchFilters) -> bool {
    if let Some(range) = &filters.date_range {
        if !range.contains(record.date) {
            return false;
        }
    }

    if let Some(people) = &filters.participants {
        let hit = people.iter().any(|person| {
            record
                .participants
                .iter()
                .any(|p| contains_ignore_case(p, person))
        });
        if !hit {
            return false;
        }
    }

    // Topic terms are keywords, not only tags: a hit in the title or body
    // also satisfies the filter
    if let Some(topics) = &filters.tags {
        let hit = topics.iter().any(|topic| {
            record.tags.iter().any(|t| contains_ignore_case(t, topic))
                || contains_ignore_case(&record.title, topic)
                || contains_ignore_case(&record.content, topic)
        });
        if !hit {
            return false;
        }
    }

    true
}

/// Keep only the records matching `filters`, preserving corpus order
pub fn apply_filters(records: Vec<SummaryRecord>, filters: &SearchFilters) -> Vec<SummaryRecord> {
    if filters.is_empty() {
        return records;
    }
    let before = records.len();
    let kept: Vec<SummaryRecord> = records
        .into_iter()
        .filter(|r| matches_filters(r, filters))
        .collect();
    tracing::debug!(before, after = kept.len(), "Applied search filters");
    kept
}
