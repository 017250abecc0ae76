//! Entity list → `SearchFilters`

use crate::model::{DateRange, EntityType, SearchEntity, SearchFilters};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Recognised date phrase, ordered by resolution priority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePhrase {
    Yesterday,
    LastWeekday(Weekday),
    ThisWeek,
    LastWeek,
    Today,
    Absolute(NaiveDate),
}

impl DatePhrase {
    /// Parse an extracted date value. Impossible calendar dates yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        match normalized.as_str() {
            "yesterday" => Some(Self::Yesterday),
            "today" => Some(Self::Today),
            "this week" => Some(Self::ThisWeek),
            "last week" => Some(Self::LastWeek),
            other => {
                if let Some(day) = other.strip_prefix("last ") {
                    return day.parse::<Weekday>().ok().map(Self::LastWeekday);
                }
                NaiveDate::parse_from_str(other, "%m/%d/%Y")
                    .ok()
                    .map(Self::Absolute)
            }
        }
    }

    /// Lower wins
    pub fn priority(&self) -> u8 {
        match self {
            Self::Yesterday => 0,
            Self::LastWeekday(_) => 1,
            Self::ThisWeek => 2,
            Self::LastWeek => 3,
            Self::Today => 4,
            Self::Absolute(_) => 5,
        }
    }

    /// Concrete inclusive range relative to `today`. Weeks run Monday to Sunday.
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        let week_start = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        match *self {
            Self::Yesterday => DateRange::single(today - Duration::days(1)),
            Self::Today => DateRange::single(today),
            Self::LastWeekday(target) => {
                let back = (today.weekday().num_days_from_monday() + 7
                    - target.num_days_from_monday())
                    % 7;
                let back = if back == 0 { 7 } else { back };
                DateRange::single(today - Duration::days(i64::from(back)))
            }
            Self::ThisWeek => DateRange::new(week_start, week_start + Duration::days(6)),
            Self::LastWeek => DateRange::new(
                week_start - Duration::days(7),
                week_start - Duration::days(1),
            ),
            Self::Absolute(day) => DateRange::single(day),
        }
    }
}

/// Build filters from extracted entities.
///
/// The highest-priority date phrase decides `date_range`; on equal priority
/// the earlier entity wins. People and topics pass through unchanged. Empty
/// groups stay `None` so they never constrain the corpus.
pub fn build_filters(entities: &[SearchEntity], today: NaiveDate) -> SearchFilters {
    let date_range = entities
        .iter()
        .filter(|e| e.kind == EntityType::Date)
        .filter_map(|e| DatePhrase::parse(&e.value))
        .min_by_key(DatePhrase::priority)
        .map(|phrase| phrase.resolve(today));

    SearchFilters {
        date_range,
        participants: collect_values(entities, EntityType::Person),
        tags: collect_values(entities, EntityType::Topic),
    }
}

fn collect_values(entities: &[SearchEntity], kind: EntityType) -> Option<Vec<String>> {
    let mut values: Vec<String> = Vec::new();
    for entity in entities.iter().filter(|e| e.kind == kind) {
        if !values.iter().any(|v| v.eq_ignore_ascii_case(&entity.value)) {
            values.push(entity.value.clone());
        }
    }
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
