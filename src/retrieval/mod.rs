//! Relevance ranking of filtered summaries
//!
//! Scores every candidate, drops anything at or below the relevance
//! threshold, and orders the rest by descending score.

mod scorer;

pub use scorer::{Relevance, RelevanceScorer, ScoreComponents};

use crate::config::RankingConfig;
use crate::model::{ResultMetadata, SearchQuery, SearchResult, SummaryRecord};
use std::cmp::Ordering;

/// Scores above this value are kept
pub const DEFAULT_RELEVANCE_THRESHOLD: f32 = 0.3;

pub struct Ranker {
    scorer: RelevanceScorer,
    threshold: f32,
}

impl Default for Ranker {
    fn default() -> Self {
        Self {
            scorer: RelevanceScorer::default(),
            threshold: DEFAULT_RELEVANCE_THRESHOLD,
        }
    }
}

impl Ranker {
    pub fn new(config: &RankingConfig) -> Self {
        Self {
            scorer: RelevanceScorer::new(config.keyword_weight, config.entity_weight),
            threshold: config.relevance_threshold,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Rank candidates that already passed the filters.
    ///
    /// Equal scores fall back to newest date, then summary id, so the output
    /// does not depend on corpus order.
    pub fn rank(&self, query: &SearchQuery, candidates: &[SummaryRecord]) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = candidates
            .iter()
            .filter_map(|summary| {
                let relevance = self.scorer.score(query, summary);
                if relevance.relevance_score > self.threshold {
                    Some(to_result(summary, relevance))
                } else {
                    None
                }
            })
            .collect();

        results.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.metadata.date.cmp(&a.metadata.date))
                .then_with(|| a.summary_id.cmp(&b.summary_id))
        });

        tracing::debug!(
            candidates = candidates.len(),
            kept = results.len(),
            threshold = self.threshold,
            "Ranked summaries"
        );
        results
    }
}

fn to_result(summary: &SummaryRecord, relevance: Relevance) -> SearchResult {
    SearchResult {
        summary_id: summary.id.clone(),
        title: summary.title.clone(),
        content: summary.content.clone(),
        relevance_score: relevance.relevance_score,
        matched_segments: relevance.matches,
        metadata: ResultMetadata::from(summary),
        reasoning: relevance.components.explain(),
    }
}
