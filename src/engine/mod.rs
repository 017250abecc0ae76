//! Query orchestration
//!
//! `search` wires the pipeline together:
//! parse (intent, entities, filters) → fetch corpus → filter → rank →
//! compose → detached analytics. Any failure along the way turns into the
//! fallback response instead of an error.

use crate::analytics::{AnalyticsEvent, AnalyticsSink};
use crate::config::{ConfigValidator, EngineConfig};
use crate::corpus::SummaryStore;
use crate::entities::EntityExtractor;
use crate::error::Result;
use crate::filtering::{apply_filters, build_filters};
use crate::intent::IntentClassifier;
use crate::model::{ConversationalResponse, SearchQuery};
use crate::patterns::PatternRegistry;
use crate::response::{fallback_response, suggestions, ResponseComposer};
use crate::retrieval::Ranker;
use chrono::{Local, NaiveDate, Utc};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Number of questions returned by `get_search_suggestions`
pub const SUGGESTION_LIMIT: usize = 4;

/// Natural-language query engine over a user's summaries
pub struct QueryEngine {
    store: Arc<dyn SummaryStore>,
    analytics: Arc<dyn AnalyticsSink>,
    patterns: Arc<PatternRegistry>,
    config: EngineConfig,
    reference_date: Option<NaiveDate>,
}

impl QueryEngine {
    /// Create an engine using the built-in pattern table
    pub fn new(
        store: Arc<dyn SummaryStore>,
        analytics: Arc<dyn AnalyticsSink>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            analytics,
            patterns: Arc::new(PatternRegistry::builtin().clone()),
            config,
            reference_date: None,
        }
    }

    /// Create an engine from a validated config, loading
    /// `config.patterns_file` when set
    pub fn from_config(
        store: Arc<dyn SummaryStore>,
        analytics: Arc<dyn AnalyticsSink>,
        config: EngineConfig,
    ) -> Result<Self> {
        ConfigValidator::validate(&config)?;
        let patterns = match &config.patterns_file {
            Some(path) => Some(Arc::new(PatternRegistry::from_file(path)?)),
            None => None,
        };
        let engine = Self::new(store, analytics, config);
        Ok(match patterns {
            Some(patterns) => engine.with_patterns(patterns),
            None => engine,
        })
    }

    pub fn with_patterns(mut self, patterns: Arc<PatternRegistry>) -> Self {
        self.patterns = patterns;
        self
    }

    /// Pin "today" for relative date phrases
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.reference_date = Some(today);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Classify, extract and build filters for `query`
    pub fn parse_query(&self, query: &str, user_id: &str) -> SearchQuery {
        let intent = IntentClassifier::new(&self.patterns).classify(query);
        let entities = EntityExtractor::new(&self.patterns).extract(query);
        let filters = build_filters(&entities, self.today());

        SearchQuery {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            query: query.to_string(),
            intent,
            entities,
            filters,
            timestamp: Utc::now(),
        }
    }

    /// Answer `query` from the summaries of `user_id`. Never fails.
    pub async fn search(&self, query: &str, user_id: &str) -> ConversationalResponse {
        let start = Instant::now();

        match self.try_search(query, user_id).await {
            Ok((parsed, response)) => {
                tracing::info!(
                    user_id,
                    intent = %parsed.intent.kind,
                    results = response.results.len(),
                    confidence = response.confidence,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Search completed"
                );
                self.emit(AnalyticsEvent {
                    query: parsed.query,
                    intent_type: parsed.intent.kind,
                    result_count: response.results.len(),
                    timestamp: parsed.timestamp,
                });
                response
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Search failed, returning fallback response");
                fallback_response(self.config.response.suggestion_count)
            }
        }
    }

    async fn try_search(
        &self,
        query: &str,
        user_id: &str,
    ) -> Result<(SearchQuery, ConversationalResponse)> {
        let parsed = self.parse_query(query, user_id);
        tracing::debug!(
            intent = %parsed.intent.kind,
            entities = parsed.entities.len(),
            filters = ?parsed.filters,
            "Parsed query"
        );

        let corpus = self.store.get_user_summaries(user_id).await?;
        for record in &corpus {
            record.validate()?;
        }

        let candidates = apply_filters(corpus, &parsed.filters);
        let ranker = Ranker::new(&self.config.ranking);
        let results = ranker.rank(&parsed, &candidates);
        tracing::debug!(
            candidates = candidates.len(),
            ranked = results.len(),
            threshold = ranker.threshold(),
            "Ranked candidates"
        );

        let composer =
            ResponseComposer::new(self.config.response.clone(), self.config.ranking.max_results);
        let response = composer.compose(&parsed, results);

        Ok((parsed, response))
    }

    /// Hand the event to the sink on a detached task
    fn emit(&self, event: AnalyticsEvent) {
        if !self.config.analytics.enabled {
            return;
        }

        let sink = Arc::clone(&self.analytics);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = sink.record(event).await {
                        tracing::warn!(error = %e, "Failed to record analytics event");
                    }
                });
            }
            Err(_) => tracing::warn!("No async runtime, dropping analytics event"),
        }
    }

    /// Query-independent suggestions from the user's most common tags and
    /// most recent participants
    pub async fn get_search_suggestions(&self, user_id: &str) -> Vec<String> {
        match self.store.get_user_summaries(user_id).await {
            Ok(corpus) => suggestions::personalized(&corpus, SUGGESTION_LIMIT),
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Failed to load corpus for suggestions");
                suggestions::generic(SUGGESTION_LIMIT)
            }
        }
    }
}
