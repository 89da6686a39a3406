//! Core kana trainer library shared by every front end.
//!
//! Provides:
//! - The fixed kana catalog and category filtering
//! - Per-item statistics and mastery scoring
//! - Weighted, recency-aware question selection (with distractors)
//! - Answer evaluation for multiple-choice and typed modes

pub mod catalog;
pub mod error;
pub mod mastery;
pub mod matching;
pub mod recency;
pub mod selection;
pub mod stats;
pub mod types;

pub use error::{CoreError, Result};
pub use mastery::{mastery_score, MasteryTier};
pub use matching::{evaluate, normalize_romaji, Answer, Evaluation};
pub use recency::{RecencyQueue, DEFAULT_RECENT_WINDOW};
pub use selection::{get_policy, policy_for, Selector, WeightPolicy, DEFAULT_DISTRACTORS};
pub use stats::{StatisticsStore, StatsEntry};
pub use types::{
    Category, Example, Glyphs, KanaItem, Mode, Outcome, Preferences, QuizType, ScriptMode,
    WeightingPolicy,
};
