//! Pattern registry for intent classification and entity extraction
//!
//! This module provides:
//! - The ordered intent pattern table (first match wins)
//! - Date phrase patterns (relative days, relative weeks, MM/DD/YYYY)
//! - The full-name heuristic for person extraction
//! - The closed topic vocabulary
//!
//! Tables are plain serde structs so they can be replaced from a TOML file;
//! everything is compiled once into a `PatternRegistry`.

use crate::error::{RecollectError, Result};
use crate::model::IntentType;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Ordered patterns for one intent category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentConfig {
    #[serde(rename = "type")]
    pub intent: IntentType,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedPattern {
    pub name: String,
    pub pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateConfig {
    pub confidence: f32,
    pub patterns: Vec<NamedPattern>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonConfig {
    pub confidence: f32,
    pub pattern: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicConfig {
    pub confidence: f32,
    pub keywords: Vec<String>,
}

/// Pattern table file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternsConfig {
    pub intent: Vec<IntentConfig>,
    pub date: DateConfig,
    pub person: PersonConfig,
    pub topic: TopicConfig,
}

impl Default for PatternsConfig {
    fn default() -> Self {
        fn intent(kind: IntentType, patterns: &[&str]) -> IntentConfig {
            IntentConfig {
                intent: kind,
                patterns: patterns.iter().map(|p| p.to_string()).collect(),
            }
        }
        fn named(name: &str, pattern: &str) -> NamedPattern {
            NamedPattern {
                name: name.to_string(),
                pattern: pattern.to_string(),
            }
        }

        Self {
            intent: vec![
                intent(
                    IntentType::FindDecisions,
                    &[
                        r"what.*decide",
                        r"decisions?.*made",
                        r"agreed.*on",
                        r"concluded.*that",
                        r"final.*decision",
                        r"\bdecisions?\b",
                    ],
                ),
                intent(
                    IntentType::FindActionItems,
                    &[
                        r"action items?",
                        r"next steps?",
                        r"\bto-?dos?\b",
                        r"who.*assigned",
                        r"assigned.*to",
                        r"follow.?ups?",
                        r"\btasks?\b",
                    ],
                ),
                intent(
                    IntentType::FindParticipants,
                    &[
                        r"who.*(attended|joined|participated|was there)",
                        r"\bparticipants?\b",
                        r"\battendees?\b",
                        r"who.*(meeting|call)",
                    ],
                ),
                intent(
                    IntentType::FindTimeframe,
                    &[
                        r"when.*(did|was|were|is)",
                        r"what.*happened.*(last|this|yesterday|today)",
                        r"\btimeline\b",
                        r"\bschedule\b",
                    ],
                ),
                intent(
                    IntentType::SummarizeTopic,
                    &[
                        r"summar(y|ize|ise)",
                        r"\boverview\b",
                        r"tell me about",
                        r"what.*(discussed|know).*about",
                    ],
                ),
            ],
            date: DateConfig {
                confidence: 0.9,
                patterns: vec![
                    named(
                        "last_weekday",
                        r"\blast\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
                    ),
                    named("relative_day", r"\b(yesterday|today)\b"),
                    named("relative_week", r"\b(this|last)\s+week\b"),
                    named("absolute", r"\b\d{1,2}/\d{1,2}/\d{4}\b"),
                ],
            },
            person: PersonConfig {
                confidence: 0.7,
                pattern: r"\b[A-Z][a-z]+ [A-Z][a-z]+\b".to_string(),
            },
            topic: TopicConfig {
                confidence: 0.8,
                keywords: [
                    "roadmap",
                    "budget",
                    "hiring",
                    "api",
                    "deadline",
                    "milestone",
                    "retrospective",
                    "standup",
                    "sprint",
                    "release",
                    "launch",
                    "onboarding",
                    "strategy",
                    "revenue",
                    "marketing",
                ]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            },
        }
    }
}

/// Compiled intent pattern, remembering its source for `reasoning`
#[derive(Debug, Clone)]
pub struct CompiledIntentPattern {
    pub intent: IntentType,
    pub source: String,
    pub regex: Regex,
}

/// Compiled entity pattern with its fixed confidence
#[derive(Debug, Clone)]
pub struct CompiledEntityPattern {
    pub name: String,
    pub regex: Regex,
    pub confidence: f32,
}

/// Registry with every pattern pre-compiled
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    /// Intent patterns flattened in category order, then definition order
    pub intents: Vec<CompiledIntentPattern>,
    pub dates: Vec<CompiledEntityPattern>,
    pub person: CompiledEntityPattern,
    pub topic: CompiledEntityPattern,
    pub topic_vocabulary: Vec<String>,
}

impl PatternRegistry {
    /// Process-wide registry built from the default tables
    pub fn builtin() -> &'static PatternRegistry {
        static BUILTIN: OnceLock<PatternRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Self::from_config(PatternsConfig::default())
                .expect("built-in pattern table must compile")
        })
    }

    /// Load a pattern table from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RecollectError::Io {
            source: e,
            context: format!("Failed to read patterns file: {:?}", path),
        })?;
        let config: PatternsConfig = toml::from_str(&content)?;
        Self::from_config(config)
    }

    /// Compile a parsed pattern table
    pub fn from_config(config: PatternsConfig) -> Result<Self> {
        let mut intents = Vec::new();
        for category in &config.intent {
            for source in &category.patterns {
                let regex = compile(&format!("intent.{}", category.intent), source, true)?;
                intents.push(CompiledIntentPattern {
                    intent: category.intent,
                    source: source.clone(),
                    regex,
                });
            }
        }

        let dates = config
            .date
            .patterns
            .iter()
            .map(|np| {
                compile(&format!("date.{}", np.name), &np.pattern, true).map(|regex| {
                    CompiledEntityPattern {
                        name: np.name.clone(),
                        regex,
                        confidence: config.date.confidence,
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        // Full-name heuristic relies on capitalisation
        let person = CompiledEntityPattern {
            name: "person".to_string(),
            regex: compile("person", &config.person.pattern, false)?,
            confidence: config.person.confidence,
        };

        let topic_vocabulary: Vec<String> = config
            .topic
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if topic_vocabulary.is_empty() {
            return Err(RecollectError::Pattern {
                name: "topic".to_string(),
                message: "topic vocabulary cannot be empty".to_string(),
            });
        }
        let alternation = topic_vocabulary
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let topic = CompiledEntityPattern {
            name: "topic".to_string(),
            regex: compile("topic", &format!(r"\b(?:{})\b", alternation), true)?,
            confidence: config.topic.confidence,
        };

        Ok(Self {
            intents,
            dates,
            person,
            topic,
            topic_vocabulary,
        })
    }
}

fn compile(name: &str, pattern: &str, case_insensitive: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| RecollectError::Pattern {
            name: name.to_string(),
            message: e.to_string(),
        })
}
