//! Entity extraction from free-text queries
//!
//! Three independent extractors (dates, people, topics) backed by the
//! compiled `PatternRegistry`.

mod extractor;

pub use extractor::{extract_dates, extract_people, extract_topics, EntityExtractor};
