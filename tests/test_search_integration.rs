// Integration tests for the full search pipeline with realistic summaries
use chrono::NaiveDate;
use recollect::analytics::{ChannelSink, NoopSink};
use recollect::config::EngineConfig;
use recollect::corpus::InMemoryStore;
use recollect::model::{EntityType, IntentType, SummaryRecord};
use recollect::response::NO_RESULTS_ANSWER;
use recollect::QueryEngine;
use std::sync::Arc;
use std::time::Duration;

const USER: &str = "user-42";

// Wednesday; the most recent Monday is 2024-03-11
fn today() -> NaiveDate {
    ymd(2024, 3, 13)
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn summary(
    id: &str,
    title: &str,
    date: NaiveDate,
    content: &str,
    participants: &[&str],
    tags: &[&str],
) -> SummaryRecord {
    SummaryRecord {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        date,
        participants: participants.iter().map(|s| s.to_string()).collect(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        category: "meeting".to_string(),
        priority: "medium".to_string(),
    }
}

fn corpus() -> Vec<SummaryRecord> {
    vec![
        summary(
            "product-sync",
            "Product sync",
            ymd(2024, 3, 11),
            "In the product sync we discussed the Q4 roadmap and decided to prioritize the API \
             integration over the mobile redesign. Priya Natarajan will own the API integration work.",
            &["Priya Natarajan", "Sarah Chen"],
            &["product"],
        ),
        summary(
            "old-roadmap",
            "Roadmap kickoff",
            ymd(2024, 3, 4),
            "We discussed the Q4 roadmap and decided to prioritize the API integration.",
            &["Sarah Chen"],
            &["roadmap"],
        ),
        summary(
            "hiring",
            "Hiring plan",
            ymd(2024, 3, 12),
            "Tom Reed will interview two backend candidates. We agreed on a final round next week.",
            &["Tom Reed"],
            &["hiring"],
        ),
    ]
}

fn engine_with(records: Vec<SummaryRecord>) -> QueryEngine {
    QueryEngine::new(
        Arc::new(InMemoryStore::with_summaries(USER, records)),
        Arc::new(NoopSink),
        EngineConfig::default(),
    )
    .with_reference_date(today())
}

#[tokio::test]
async fn test_decision_about_roadmap_last_monday() {
    let engine = engine_with(corpus());
    let question = "What did we decide about the product roadmap last Monday?";

    let parsed = engine.parse_query(question, USER);
    assert_eq!(parsed.intent.kind, IntentType::FindDecisions);
    let range = parsed.filters.date_range.expect("date range");
    assert_eq!(range.start, ymd(2024, 3, 11));
    assert_eq!(range.end, ymd(2024, 3, 11));

    let response = engine.search(question, USER).await;
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].summary_id, "product-sync");
    assert!(response.results[0].relevance_score > 0.3);
    assert!(response.answer.starts_with("Here's what was decided:"));
    assert!(response.answer.contains("decided to prioritize the API"));
    assert_eq!(response.confidence, response.results[0].relevance_score);
    assert_eq!(response.suggested_questions.len(), 3);
}

#[tokio::test]
async fn test_who_was_assigned_api_integration() {
    let engine = engine_with(corpus());
    let question = "Who was assigned to work on the API integration?";

    let parsed = engine.parse_query(question, USER);
    assert!(matches!(
        parsed.intent.kind,
        IntentType::FindActionItems | IntentType::FindContent
    ));
    assert!(parsed
        .entities
        .iter()
        .any(|e| e.kind == EntityType::Topic && e.value.eq_ignore_ascii_case("api")));

    let response = engine.search(question, USER).await;
    assert!(!response.results.is_empty());
    for result in &response.results {
        assert!(result.content.to_lowercase().contains("api"));
    }
    assert!(response.results.iter().all(|r| r.summary_id != "hiring"));
    assert!(response.answer.contains("Priya Natarajan will own the API integration work."));
}

#[tokio::test]
async fn test_unrecognized_query_returns_apology() {
    let engine = engine_with(corpus());
    let response = engine.search("xyzzy plugh", USER).await;

    assert!(response.results.is_empty());
    assert_eq!(response.answer, NO_RESULTS_ANSWER);
    assert_eq!(response.confidence, 0.0);
    assert_eq!(response.suggested_questions.len(), 4);
    assert!(response.clarification_needed.is_some());
}

#[tokio::test]
async fn test_results_ordered_by_relevance() {
    let question = "alpha bravo charlie delta echo foxtrot golf hotel india budget";
    let weak = summary(
        "weak",
        "Weak match",
        ymd(2024, 3, 12),
        "alpha bravo charlie delta echo foxtrot",
        &[],
        &["budget"],
    );
    let strong = summary(
        "strong",
        "Strong match",
        ymd(2024, 3, 1),
        "alpha bravo charlie delta echo foxtrot golf hotel india budget",
        &[],
        &[],
    );
    // Weak first in corpus order
    let engine = engine_with(vec![weak, strong]);

    let response = engine.search(question, USER).await;
    let ids: Vec<&str> = response
        .results
        .iter()
        .map(|r| r.summary_id.as_str())
        .collect();
    assert_eq!(ids, vec!["strong", "weak"]);
    assert!((response.results[0].relevance_score - 0.92).abs() < 1e-4);
    assert!((response.results[1].relevance_score - 0.36).abs() < 1e-4);
}

#[tokio::test]
async fn test_empty_corpus_never_fails() {
    let engine = engine_with(vec![]);
    for question in [
        "",
        "What did we decide yesterday?",
        "Who attended the standup?",
        "   ",
    ] {
        let response = engine.search(question, USER).await;
        assert!(response.results.is_empty());
        assert_eq!(response.confidence, 0.0);
    }
}

#[tokio::test]
async fn test_scores_sorted_and_above_threshold() {
    let engine = engine_with(corpus());
    for question in [
        "roadmap API integration decided",
        "What was agreed on hiring?",
        "Tell me about the roadmap",
        "Who joined the product sync with Sarah Chen?",
        "we discussed the",
    ] {
        let response = engine.search(question, USER).await;
        assert!(response.results.len() <= 5);
        assert!(response
            .results
            .windows(2)
            .all(|w| w[0].relevance_score >= w[1].relevance_score));
        assert!(response.results.iter().all(|r| r.relevance_score > 0.3));
    }
}

#[tokio::test]
async fn test_filtered_out_summaries_never_returned() {
    // Perfect keyword overlap, but dated outside "yesterday"
    let question = "roadmap decided yesterday";
    let outside = summary(
        "outside",
        "Outside range",
        ymd(2024, 3, 1),
        "roadmap decided yesterday",
        &[],
        &["roadmap"],
    );
    let inside = summary(
        "inside",
        "Inside range",
        ymd(2024, 3, 12),
        "the roadmap was decided",
        &[],
        &[],
    );
    let engine = engine_with(vec![outside, inside]);

    let response = engine.search(question, USER).await;
    let ids: Vec<&str> = response
        .results
        .iter()
        .map(|r| r.summary_id.as_str())
        .collect();
    assert_eq!(ids, vec!["inside"]);
}

#[tokio::test]
async fn test_search_is_idempotent() {
    let engine = engine_with(corpus());
    let question = "What did we decide about the roadmap?";

    let first = engine.search(question, USER).await;
    let second = engine.search(question, USER).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_participants_answer() {
    let engine = engine_with(corpus());
    let response = engine
        .search("Who attended the roadmap meetings?", USER)
        .await;

    assert!(!response.results.is_empty());
    assert!(response.answer.starts_with("The people involved were:"));
    assert!(response.answer.contains("Sarah Chen"));
}

#[tokio::test]
async fn test_analytics_event_per_search() {
    let (sink, mut rx) = ChannelSink::new(16);
    let engine = QueryEngine::new(
        Arc::new(InMemoryStore::with_summaries(USER, corpus())),
        Arc::new(sink),
        EngineConfig::default(),
    )
    .with_reference_date(today());

    engine
        .search("What did we decide about the roadmap?", USER)
        .await;
    engine.search("xyzzy plugh", USER).await;

    let first = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .unwrap()
        .unwrap();
    let second = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .unwrap()
        .unwrap();

    let mut events = vec![first, second];
    events.sort_by(|a, b| a.query.cmp(&b.query));
    assert_eq!(events[0].intent_type, IntentType::FindDecisions);
    assert_eq!(events[0].result_count, 2);
    assert_eq!(events[1].query, "xyzzy plugh");
    assert_eq!(events[1].result_count, 0);
}

#[tokio::test]
async fn test_concurrent_searches() {
    let engine = Arc::new(engine_with(corpus()));
    let mut handles = Vec::new();
    for _ in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            engine
                .search("What did we decide about the roadmap?", USER)
                .await
        }));
    }

    let mut responses = Vec::new();
    for handle in handles {
        responses.push(handle.await.unwrap());
    }
    assert!(responses.windows(2).all(|w| w[0] == w[1]));
}
