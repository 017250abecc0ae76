//! Ranked results + intent → conversational answer

use crate::config::ResponseConfig;
use crate::model::{ConversationalResponse, IntentType, SearchQuery, SearchResult};
use crate::response::suggestions;
use regex::Regex;
use std::sync::OnceLock;

pub const NO_RESULTS_ANSWER: &str = "I couldn't find any summaries matching your question. \
     Try rephrasing it or broadening the time range.";

pub const CLARIFICATION_PROMPT: &str =
    "Could you add a date, a person or a topic to narrow the search?";

fn decision_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)decided|agreed|concluded").expect("static regex"))
}

fn action_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)will|should|next steps").expect("static regex"))
}

pub struct ResponseComposer {
    config: ResponseConfig,
    max_results: usize,
}

impl ResponseComposer {
    pub fn new(config: ResponseConfig, max_results: usize) -> Self {
        Self {
            config,
            max_results,
        }
    }

    /// Build the answer for ranked `results` (sorted, above threshold).
    pub fn compose(&self, query: &SearchQuery, results: Vec<SearchResult>) -> ConversationalResponse {
        if results.is_empty() {
            return self.no_results(query);
        }

        let answer = match query.intent.kind {
            IntentType::FindDecisions => self.decisions_answer(&results),
            IntentType::FindActionItems => self.action_items_answer(&results),
            IntentType::FindParticipants => participants_answer(&results),
            IntentType::SummarizeTopic => self.topic_answer(&results),
            IntentType::FindContent | IntentType::FindTimeframe => self.default_answer(&results),
        };

        let confidence = results[0].relevance_score;
        let mut results = results;
        results.truncate(self.max_results);

        ConversationalResponse {
            answer,
            results,
            suggested_questions: suggestions::follow_ups(
                query.intent.kind,
                self.config.suggestion_count,
            ),
            clarification_needed: None,
            confidence,
        }
    }

    fn no_results(&self, query: &SearchQuery) -> ConversationalResponse {
        ConversationalResponse {
            answer: NO_RESULTS_ANSWER.to_string(),
            results: Vec::new(),
            suggested_questions: suggestions::generic(4),
            clarification_needed: if query.entities.is_empty() {
                Some(CLARIFICATION_PROMPT.to_string())
            } else {
                None
            },
            confidence: 0.0,
        }
    }

    fn decisions_answer(&self, results: &[SearchResult]) -> String {
        let sentences = self.sentences_matching(results, decision_marker());
        if sentences.is_empty() {
            return format!(
                "I found {} but no explicit decisions were recorded. The closest match is \"{}\".",
                count_phrase(results.len()),
                results[0].title
            );
        }
        format!("Here's what was decided: {}", sentences.join(" "))
    }

    fn action_items_answer(&self, results: &[SearchResult]) -> String {
        let sentences = self.sentences_matching(results, action_marker());
        if sentences.is_empty() {
            return format!(
                "I found {} but no explicit action items were recorded. The closest match is \"{}\".",
                count_phrase(results.len()),
                results[0].title
            );
        }
        format!("Here are the action items I found: {}", sentences.join(" "))
    }

    fn topic_answer(&self, results: &[SearchResult]) -> String {
        let top = &results[0];
        format!(
            "Here's an overview from \"{}\": {}",
            top.title,
            ellipsize(&top.content, self.config.summary_preview_chars)
        )
    }

    fn default_answer(&self, results: &[SearchResult]) -> String {
        let top = &results[0];
        format!(
            "I found {}. The most relevant is \"{}\" from {}: {}",
            count_phrase(results.len()),
            top.title,
            top.metadata.date,
            ellipsize(&top.content, self.config.default_preview_chars)
        )
    }

    /// Sentences containing `marker`, across results in rank order
    fn sentences_matching(&self, results: &[SearchResult], marker: &Regex) -> Vec<String> {
        results
            .iter()
            .flat_map(|r| split_sentences(&r.content))
            .filter(|s| marker.is_match(s))
            .take(self.config.max_extracted_sentences)
            .map(str::to_string)
            .collect()
    }
}

fn participants_answer(results: &[SearchResult]) -> String {
    let mut people: Vec<&str> = Vec::new();
    for person in results.iter().flat_map(|r| r.metadata.participants.iter()) {
        if !people.iter().any(|p| p.eq_ignore_ascii_case(person)) {
            people.push(person);
        }
    }

    if people.is_empty() {
        return format!(
            "I found {} but no participants were recorded.",
            count_phrase(results.len())
        );
    }
    format!("The people involved were: {}.", people.join(", "))
}

fn count_phrase(n: usize) -> String {
    if n == 1 {
        "1 relevant summary".to_string()
    } else {
        format!("{} relevant summaries", n)
    }
}

/// Trimmed sentences, terminal punctuation kept
pub fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// First `max_chars` characters, with "..." appended when cut
pub fn ellipsize(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", text[..byte_idx].trim_end()),
        None => text.to_string(),
    }
}
