//! JSON file corpus: `{ "<user id>": [ SummaryRecord, ... ] }`

use crate::corpus::SummaryStore;
use crate::error::{RecollectError, Result};
use crate::model::SummaryRecord;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

/// Reads the corpus file on every fetch so edits show up without a restart
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn decode_user(user_id: &str, records: Vec<Value>) -> Result<Vec<SummaryRecord>> {
        records
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| {
                let id = raw
                    .get("id")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{}#{}", user_id, idx));
                serde_json::from_value::<SummaryRecord>(raw).map_err(|e| {
                    RecollectError::MalformedRecord {
                        id,
                        message: e.to_string(),
                    }
                })
            })
            .collect()
    }
}

#[async_trait]
impl SummaryStore for JsonFileStore {
    async fn get_user_summaries(&self, user_id: &str) -> Result<Vec<SummaryRecord>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| RecollectError::Io {
                source: e,
                context: format!("Failed to read corpus file: {:?}", self.path),
            })?;

        let mut users: HashMap<String, Vec<Value>> =
            serde_json::from_str(&content).map_err(|e| RecollectError::Json {
                source: e,
                context: format!("Failed to parse corpus file: {:?}", self.path),
            })?;

        let records = users.remove(user_id).unwrap_or_default();
        tracing::debug!(user_id, count = records.len(), "Loaded summaries from file");
        Self::decode_user(user_id, records)
    }
}
