//! Keyword-overlap plus entity-presence relevance scoring

use crate::filtering::{contains_ignore_case, find_ignore_case};
use crate::model::{MatchType, SearchMatch, SearchQuery, SummaryRecord};

/// Breakdown of score components for transparency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreComponents {
    /// Weighted share of query terms found in the content
    pub keyword: f32,
    /// Sum of weighted confidences of entities found in the content
    pub entity: f32,
    pub matched_terms: usize,
    pub total_terms: usize,
    pub matched_entities: usize,
}

impl ScoreComponents {
    /// Sum clamped to 1.0
    pub fn total(&self) -> f32 {
        (self.keyword + self.entity).min(1.0)
    }

    pub fn explain(&self) -> String {
        format!(
            "Matched {}/{} query terms (keyword {:.2}) and {} entities (entity {:.2})",
            self.matched_terms, self.total_terms, self.keyword, self.matched_entities, self.entity
        )
    }
}

/// Score of one summary against one query
#[derive(Debug, Clone)]
pub struct Relevance {
    pub relevance_score: f32,
    pub matches: Vec<SearchMatch>,
    pub components: ScoreComponents,
}

#[derive(Debug, Clone, Copy)]
pub struct RelevanceScorer {
    keyword_weight: f32,
    entity_weight: f32,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(0.6, 0.4)
    }
}

impl RelevanceScorer {
    pub fn new(keyword_weight: f32, entity_weight: f32) -> Self {
        Self {
            keyword_weight,
            entity_weight,
        }
    }

    /// Score `summary` against `query`.
    ///
    /// Keyword part: share of whitespace-split, lower-cased query tokens that
    /// are a substring of some content token, times the keyword weight.
    /// Entity part: for every entity whose value occurs in the content,
    /// confidence times the entity weight, summed without normalisation.
    /// The total is clamped to 1.0 before any threshold is applied.
    pub fn score(&self, query: &SearchQuery, summary: &SummaryRecord) -> Relevance {
        let query_tokens: Vec<String> = query
            .query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        let content_tokens: Vec<String> = summary
            .content
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();

        let matched_terms = query_tokens
            .iter()
            .filter(|qt| content_tokens.iter().any(|ct| ct.contains(qt.as_str())))
            .count();
        let keyword = if query_tokens.is_empty() {
            0.0
        } else {
            matched_terms as f32 / query_tokens.len() as f32 * self.keyword_weight
        };

        let mut entity = 0.0;
        let mut matched_entities = 0;
        for e in &query.entities {
            if contains_ignore_case(&summary.content, &e.value) {
                entity += e.confidence * self.entity_weight;
                matched_entities += 1;
            }
        }

        let components = ScoreComponents {
            keyword,
            entity,
            matched_terms,
            total_terms: query_tokens.len(),
            matched_entities,
        };

        Relevance {
            relevance_score: components.total(),
            matches: exact_matches(&query_tokens, &summary.content),
            components,
        }
    }
}

/// One exact match per distinct query token, at its first occurrence
fn exact_matches(query_tokens: &[String], content: &str) -> Vec<SearchMatch> {
    let mut seen: Vec<&str> = Vec::new();
    let mut matches = Vec::new();

    for token in query_tokens {
        if seen.contains(&token.as_str()) {
            continue;
        }
        seen.push(token);

        if let Some((start, end)) = find_ignore_case(content, token) {
            matches.push(SearchMatch {
                text: content[start..end].to_string(),
                start_index: start,
                end_index: end,
                match_type: MatchType::Exact,
                confidence: 1.0,
            });
        }
    }
    matches
}
