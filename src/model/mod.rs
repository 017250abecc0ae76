//! Value types flowing through the query pipeline
//!
//! `SummaryRecord` is owned by the corpus; everything else is built fresh for
//! each search and discarded afterwards.

use crate::error::{RecollectError, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A previously generated summary, read-only to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: String,
}

impl SummaryRecord {
    /// Boundary check applied to every record fetched from the corpus
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(RecollectError::MalformedRecord {
                id: self.id.clone(),
                message: "id cannot be empty".to_string(),
            });
        }
        if self.title.trim().is_empty() {
            return Err(RecollectError::MalformedRecord {
                id: self.id.clone(),
                message: "title cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Intent categories, declared in classification order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentType {
    FindContent,
    FindDecisions,
    FindActionItems,
    FindParticipants,
    FindTimeframe,
    SummarizeTopic,
}

impl IntentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentType::FindContent => "find_content",
            IntentType::FindDecisions => "find_decisions",
            IntentType::FindActionItems => "find_action_items",
            IntentType::FindParticipants => "find_participants",
            IntentType::FindTimeframe => "find_timeframe",
            IntentType::SummarizeTopic => "summarize_topic",
        }
    }
}

impl fmt::Display for IntentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified purpose of a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIntent {
    #[serde(rename = "type")]
    pub kind: IntentType,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// Source of the pattern that matched, or "default"
    pub reasoning: String,
}

impl SearchIntent {
    pub const DEFAULT_CONFIDENCE: f32 = 0.6;

    pub fn fallback() -> Self {
        Self {
            kind: IntentType::FindContent,
            confidence: Self::DEFAULT_CONFIDENCE,
            reasoning: "default".to_string(),
        }
    }
}

/// Entity kinds. Only person, date and topic are produced by the extractors;
/// the rest are accepted from callers that build queries by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Person,
    Date,
    Topic,
    Project,
    Decision,
    Action,
    Location,
}

/// Structured fragment of the query text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntity {
    #[serde(rename = "type")]
    pub kind: EntityType,
    /// Matched substring of the original query
    pub value: String,
    pub confidence: f32,
    /// Byte offset of the first matched byte
    pub start_index: usize,
    /// Byte offset one past the last matched byte
    pub end_index: usize,
}

/// Inclusive calendar range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// Constraints derived from entities. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.date_range.is_none() && self.participants.is_none() && self.tags.is_none()
    }

    /// Window shown to the user. Falls back to the trailing `window_days`
    /// when no date was asked for; never used to drop candidates.
    pub fn display_range(&self, today: NaiveDate, window_days: u32) -> DateRange {
        self.date_range.unwrap_or_else(|| {
            let start = today
                .checked_sub_signed(Duration::days(i64::from(window_days)))
                .unwrap_or(NaiveDate::MIN);
            DateRange::new(start, today)
        })
    }
}

/// Parsed query, built once per search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub id: Uuid,
    pub user_id: String,
    pub query: String,
    pub intent: SearchIntent,
    pub entities: Vec<SearchEntity>,
    pub filters: SearchFilters,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    Semantic,
    Contextual,
}

/// Highlightable span of a summary's content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub text: String,
    pub start_index: usize,
    pub end_index: usize,
    pub match_type: MatchType,
    pub confidence: f32,
}

/// Source-record fields carried alongside a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMetadata {
    pub date: NaiveDate,
    pub participants: Vec<String>,
    pub tags: Vec<String>,
    pub category: String,
    pub priority: String,
}

impl From<&SummaryRecord> for ResultMetadata {
    fn from(record: &SummaryRecord) -> Self {
        Self {
            date: record.date,
            participants: record.participants.clone(),
            tags: record.tags.clone(),
            category: record.category.clone(),
            priority: record.priority.clone(),
        }
    }
}

/// One ranked summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub summary_id: String,
    pub title: String,
    pub content: String,
    pub relevance_score: f32,
    pub matched_segments: Vec<SearchMatch>,
    pub metadata: ResultMetadata,
    pub reasoning: String,
}

/// Final output of a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationalResponse {
    pub answer: String,
    pub results: Vec<SearchResult>,
    pub suggested_questions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarification_needed: Option<String>,
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str) -> SummaryRecord {
        SummaryRecord {
            id: id.to_string(),
            title: title.to_string(),
            content: "content".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            participants: vec![],
            tags: vec![],
            category: "meeting".to_string(),
            priority: "medium".to_string(),
        }
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        assert!(record("", "Weekly sync").validate().is_err());
        assert!(record("s1", "  ").validate().is_err());
        assert!(record("s1", "Weekly sync").validate().is_ok());
    }

    #[test]
    fn test_record_deserializes_camel_case() {
        let json = r#"{
            "id": "s1",
            "title": "Planning",
            "content": "We agreed on the budget.",
            "date": "2024-03-04",
            "participants": ["Ana Lopez"],
            "tags": ["budget"]
        }"#;
        let rec: SummaryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.participants, vec!["Ana Lopez"]);
        assert_eq!(rec.category, "");
    }

    #[test]
    fn test_display_range_fallback() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let filters = SearchFilters::default();
        let range = filters.display_range(today, 30);
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(range.end, today);

        let explicit = SearchFilters {
            date_range: Some(DateRange::single(today)),
            ..Default::default()
        };
        assert_eq!(explicit.display_range(today, 30), DateRange::single(today));
    }

    #[test]
    fn test_display_range_saturates() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let range = SearchFilters::default().display_range(today, u32::MAX);
        assert_eq!(range.start, NaiveDate::MIN);
        assert_eq!(range.end, today);
    }

    #[test]
    fn test_intent_serializes_snake_case() {
        let intent = SearchIntent::fallback();
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["type"], "find_content");
        assert_eq!(json["reasoning"], "default");
    }
}
