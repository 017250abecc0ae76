//! Intent classification over the ordered pattern table

use crate::model::SearchIntent;
use crate::patterns::PatternRegistry;

/// Confidence assigned to any pattern hit
pub const MATCH_CONFIDENCE: f32 = 0.8;

/// First-match intent classifier
pub struct IntentClassifier<'a> {
    registry: &'a PatternRegistry,
}

impl<'a> IntentClassifier<'a> {
    pub fn new(registry: &'a PatternRegistry) -> Self {
        Self { registry }
    }

    /// Walks categories in declaration order, patterns in definition order,
    /// and returns the first hit. Falls back to `find_content` at 0.6.
    pub fn classify(&self, query: &str) -> SearchIntent {
        self.registry
            .intents
            .iter()
            .find(|pattern| pattern.regex.is_match(query))
            .map(|pattern| {
                tracing::debug!(intent = %pattern.intent, pattern = %pattern.source, "Intent matched");
                SearchIntent {
                    kind: pattern.intent,
                    confidence: MATCH_CONFIDENCE,
                    reasoning: pattern.source.clone(),
                }
            })
            .unwrap_or_else(SearchIntent::fallback)
    }
}
