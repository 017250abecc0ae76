//! Summary corpus access
//!
//! The engine only reads summaries. Stores hand back every record visible
//! to a user, in no particular order.

mod file;

pub use file::JsonFileStore;

use crate::error::Result;
use crate::model::SummaryRecord;
use async_trait::async_trait;
use std::collections::HashMap;

/// Read-only source of a user's summaries
#[async_trait]
pub trait SummaryStore: Send + Sync {
    async fn get_user_summaries(&self, user_id: &str) -> Result<Vec<SummaryRecord>>;
}

/// Per-user in-memory corpus
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    summaries: HashMap<String, Vec<SummaryRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_summaries(user_id: impl Into<String>, summaries: Vec<SummaryRecord>) -> Self {
        let mut store = Self::new();
        store.insert(user_id, summaries);
        store
    }

    pub fn insert(&mut self, user_id: impl Into<String>, summaries: Vec<SummaryRecord>) {
        self.summaries
            .entry(user_id.into())
            .or_default()
            .extend(summaries);
    }
}

#[async_trait]
impl SummaryStore for InMemoryStore {
    async fn get_user_summaries(&self, user_id: &str) -> Result<Vec<SummaryRecord>> {
        Ok(self.summaries.get(user_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: &str) -> SummaryRecord {
        SummaryRecord {
            id: id.to_string(),
            title: id.to_string(),
            content: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            participants: vec![],
            tags: vec![],
            category: String::new(),
            priority: String::new(),
        }
    }

    #[tokio::test]
    async fn test_in_memory_per_user() {
        let mut store = InMemoryStore::with_summaries("alice", vec![record("a1")]);
        store.insert("alice", vec![record("a2")]);
        store.insert("bob", vec![record("b1")]);

        assert_eq!(store.get_user_summaries("alice").await.unwrap().len(), 2);
        assert_eq!(store.get_user_summaries("bob").await.unwrap().len(), 1);
        assert!(store.get_user_summaries("carol").await.unwrap().is_empty());
    }
}
