//! Follow-up question pools

use crate::model::{IntentType, SummaryRecord};
use ahash::AHashMap;
use rand::seq::SliceRandom;

/// Questions that make sense for any corpus
pub const GENERIC_QUESTIONS: &[&str] = &[
    "What decisions were made this week?",
    "What are my action items from recent meetings?",
    "Who attended the last planning meeting?",
    "Summarize the latest roadmap discussions",
    "What deadlines are coming up?",
    "What was discussed about the budget last week?",
];

const DECISION_FOLLOW_UPS: &[&str] = &[
    "Who was involved in making these decisions?",
    "What action items came out of these decisions?",
    "Were there any decisions that were postponed?",
    "What alternatives were considered?",
];

const ACTION_FOLLOW_UPS: &[&str] = &[
    "Which of these action items are overdue?",
    "Who owns the most action items right now?",
    "What decisions led to these action items?",
    "What are the next steps after these tasks?",
];

const PARTICIPANT_FOLLOW_UPS: &[&str] = &[
    "What did these people decide together?",
    "What action items were assigned to them?",
    "When did they last meet?",
    "What topics do they discuss most often?",
];

const TIMEFRAME_FOLLOW_UPS: &[&str] = &[
    "What happened in the week before that?",
    "What decisions were made during that period?",
    "Who was most active in that timeframe?",
    "What follow-ups were scheduled afterwards?",
];

const TOPIC_FOLLOW_UPS: &[&str] = &[
    "What decisions were made about this topic?",
    "Who usually leads discussions on this topic?",
    "What are the open action items for this topic?",
    "How has this topic evolved over the last month?",
];

const CONTENT_FOLLOW_UPS: &[&str] = &[
    "Can you summarize the most relevant meeting?",
    "What decisions were made in these meetings?",
    "Who took part in these discussions?",
    "Were there any action items?",
];

/// Static follow-ups for an intent, first `count` of its pool
pub fn follow_ups(intent: IntentType, count: usize) -> Vec<String> {
    let pool = match intent {
        IntentType::FindDecisions => DECISION_FOLLOW_UPS,
        IntentType::FindActionItems => ACTION_FOLLOW_UPS,
        IntentType::FindParticipants => PARTICIPANT_FOLLOW_UPS,
        IntentType::FindTimeframe => TIMEFRAME_FOLLOW_UPS,
        IntentType::SummarizeTopic => TOPIC_FOLLOW_UPS,
        IntentType::FindContent => CONTENT_FOLLOW_UPS,
    };
    take(pool, count)
}

/// Deterministic head of the generic pool
pub fn generic(count: usize) -> Vec<String> {
    take(GENERIC_QUESTIONS, count)
}

/// Random sample of the generic pool, used by the failure fallback
pub fn random_generic(count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    GENERIC_QUESTIONS
        .choose_multiple(&mut rng, count)
        .map(|q| q.to_string())
        .collect()
}

/// Questions built from a user's corpus: the two most frequent tags and the
/// participants of the newest summary, padded from the generic pool.
pub fn personalized(corpus: &[SummaryRecord], count: usize) -> Vec<String> {
    let mut questions: Vec<String> = Vec::new();

    let mut tag_counts: AHashMap<String, usize> = AHashMap::new();
    for tag in corpus.iter().flat_map(|r| r.tags.iter()) {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() {
            *tag_counts.entry(tag).or_insert(0) += 1;
        }
    }
    let mut tags: Vec<(String, usize)> = tag_counts.into_iter().collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (tag, _) in tags.into_iter().take(2) {
        questions.push(format!("What was discussed about {}?", tag));
    }

    let newest = corpus
        .iter()
        .max_by(|a, b| a.date.cmp(&b.date).then_with(|| b.id.cmp(&a.id)));
    if let Some(record) = newest {
        for person in record.participants.iter().take(2) {
            questions.push(format!("What did {} work on recently?", person));
        }
    }

    for q in GENERIC_QUESTIONS {
        if questions.len() >= count {
            break;
        }
        if !questions.iter().any(|existing| existing == q) {
            questions.push(q.to_string());
        }
    }

    questions.truncate(count);
    questions
}

fn take(pool: &[&str], count: usize) -> Vec<String> {
    pool.iter().take(count).map(|q| q.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: &str, day: u32, tags: &[&str], participants: &[&str]) -> SummaryRecord {
        SummaryRecord {
            id: id.to_string(),
            title: id.to_string(),
            content: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            participants: participants.iter().map(|s| s.to_string()).collect(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            category: String::new(),
            priority: String::new(),
        }
    }

    #[test]
    fn test_follow_ups_per_intent() {
        let decisions = follow_ups(IntentType::FindDecisions, 3);
        assert_eq!(decisions.len(), 3);
        assert_eq!(decisions[0], DECISION_FOLLOW_UPS[0]);
        assert_ne!(decisions, follow_ups(IntentType::FindActionItems, 3));
    }

    #[test]
    fn test_random_generic_samples_pool() {
        let picked = random_generic(3);
        assert_eq!(picked.len(), 3);
        assert!(picked.iter().all(|q| GENERIC_QUESTIONS.contains(&q.as_str())));
    }

    #[test]
    fn test_personalized_uses_tags_and_recent_people() {
        let corpus = vec![
            record("a", 1, &["Budget", "hiring"], &["Old Person"]),
            record("b", 9, &["budget"], &["Sarah Chen", "Tom Reed"]),
            record("c", 5, &["roadmap"], &[]),
        ];

        let questions = personalized(&corpus, 4);
        assert_eq!(
            questions,
            vec![
                "What was discussed about budget?",
                "What was discussed about hiring?",
                "What did Sarah Chen work on recently?",
                "What did Tom Reed work on recently?",
            ]
        );
    }

    #[test]
    fn test_personalized_pads_from_generic() {
        let questions = personalized(&[], 4);
        assert_eq!(questions, generic(4));
    }
}
