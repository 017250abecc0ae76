//! Date, person and topic extractors
//!
//! Each extractor is a pure function over the raw query. Spans are byte
//! offsets into the unmodified input.

use crate::model::{EntityType, SearchEntity};
use crate::patterns::{CompiledEntityPattern, PatternRegistry};

/// Relative days, relative weeks and MM/DD/YYYY dates
pub fn extract_dates(query: &str, registry: &PatternRegistry) -> Vec<SearchEntity> {
    let mut entities: Vec<SearchEntity> = registry
        .dates
        .iter()
        .flat_map(|pattern| matches(query, pattern, EntityType::Date))
        .collect();
    entities.sort_by_key(|e| e.start_index);
    entities
}

/// Two consecutive capitalised words. Sentence-initial common nouns
/// ("Product Roadmap") are picked up too.
pub fn extract_people(query: &str, registry: &PatternRegistry) -> Vec<SearchEntity> {
    matches(query, &registry.person, EntityType::Person).collect()
}

/// Whole-word, case-insensitive hits from the topic vocabulary
pub fn extract_topics(query: &str, registry: &PatternRegistry) -> Vec<SearchEntity> {
    matches(query, &registry.topic, EntityType::Topic).collect()
}

fn matches<'a>(
    query: &'a str,
    pattern: &'a CompiledEntityPattern,
    kind: EntityType,
) -> impl Iterator<Item = SearchEntity> + 'a {
    pattern.regex.find_iter(query).map(move |m| SearchEntity {
        kind,
        value: m.as_str().to_string(),
        confidence: pattern.confidence,
        start_index: m.start(),
        end_index: m.end(),
    })
}

/// Runs every extractor and concatenates their output
pub struct EntityExtractor<'a> {
    registry: &'a PatternRegistry,
}

impl<'a> EntityExtractor<'a> {
    pub fn new(registry: &'a PatternRegistry) -> Self {
        Self { registry }
    }

    /// Dates first, then people, then topics. No extractor suppresses another.
    pub fn extract(&self, query: &str) -> Vec<SearchEntity> {
        let mut entities = extract_dates(query, self.registry);
        entities.extend(extract_people(query, self.registry));
        entities.extend(extract_topics(query, self.registry));
        entities
    }
}
