//! Conversational answer composition and follow-up suggestions

mod composer;
pub mod suggestions;

pub use composer::{
    ellipsize, split_sentences, ResponseComposer, CLARIFICATION_PROMPT, NO_RESULTS_ANSWER,
};

use crate::model::ConversationalResponse;

pub const FALLBACK_ANSWER: &str =
    "Sorry, something went wrong while searching your summaries. Please try again.";

/// Response returned when the pipeline itself fails
pub fn fallback_response(suggestion_count: usize) -> ConversationalResponse {
    ConversationalResponse {
        answer: FALLBACK_ANSWER.to_string(),
        results: Vec::new(),
        suggested_questions: suggestions::random_generic(suggestion_count),
        clarification_needed: None,
        confidence: 0.0,
    }
}
