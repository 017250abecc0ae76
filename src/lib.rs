//! Recollect - conversational search over meeting and document summaries
//!
//! Takes a free-text question, classifies its intent, extracts dates, people
//! and topics, turns them into filters over a user's summary corpus, ranks the
//! surviving summaries and composes a conversational answer with follow-up
//! suggestions. Every stage is deterministic and rule-based.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod entities;
pub mod error;
pub mod filtering;
pub mod intent;
pub mod model;
pub mod patterns;
pub mod response;
pub mod retrieval;

pub use engine::QueryEngine;
pub use error::{RecollectError, Result};
