//! Fire-and-forget search analytics
//!
//! The engine hands each event to a sink on a detached task. Nothing waits
//! for the sink and its failures are only logged.

use crate::error::{RecollectError, Result};
use crate::model::IntentType;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// One completed search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub query: String,
    pub intent_type: IntentType,
    pub result_count: usize,
    pub timestamp: DateTime<Utc>,
}

#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn record(&self, event: AnalyticsEvent) -> Result<()>;
}

/// Emits events as structured log lines
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[async_trait]
impl AnalyticsSink for TracingSink {
    async fn record(&self, event: AnalyticsEvent) -> Result<()> {
        tracing::info!(
            target: "recollect::analytics",
            query = %event.query,
            intent = %event.intent_type,
            results = event.result_count,
            timestamp = %event.timestamp.to_rfc3339(),
            "Search completed"
        );
        Ok(())
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

#[async_trait]
impl AnalyticsSink for NoopSink {
    async fn record(&self, _event: AnalyticsEvent) -> Result<()> {
        Ok(())
    }
}

/// Forwards events into a bounded channel without blocking.
/// A full or closed channel is reported as an error.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<AnalyticsEvent>,
}

impl ChannelSink {
    pub fn new(buffer_size: usize) -> (Self, mpsc::Receiver<AnalyticsEvent>) {
        let (tx, rx) = mpsc::channel(buffer_size);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl AnalyticsSink for ChannelSink {
    async fn record(&self, event: AnalyticsEvent) -> Result<()> {
        self.tx
            .try_send(event)
            .map_err(|e| RecollectError::Analytics(e.to_string()))
    }
}
