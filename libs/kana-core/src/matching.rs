//! Answer evaluation for quiz and listening questions.
//!
//! Typed answers are compared after normalization only; there is no fuzzy or
//! edit-distance tolerance, so "kaa" never matches "ka".

use crate::types::KanaItem;
use serde::{Deserialize, Serialize};

/// A learner's answer, tagged by how it was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Answer {
    /// Id of the chosen multiple-choice option.
    Choice(String),
    /// Romaji typed by the learner.
    Typed(String),
}

/// Result of evaluating an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub is_correct: bool,
    /// Normalized learner input (for display).
    pub given_normalized: String,
    /// Normalized expected answer (for display).
    pub expected_normalized: String,
}

/// Evaluate an answer against the target item.
pub fn evaluate(answer: &Answer, target: &KanaItem) -> Evaluation {
    match answer {
        Answer::Choice(id) => Evaluation {
            is_correct: *id == target.id,
            given_normalized: id.clone(),
            expected_normalized: target.id.clone(),
        },
        Answer::Typed(text) => {
            let given_normalized = normalize_romaji(text);
            let expected_normalized = normalize_romaji(&target.transliteration);
            Evaluation {
                is_correct: given_normalized == expected_normalized,
                given_normalized,
                expected_normalized,
            }
        }
    }
}

/// Trim, lower-case and collapse internal whitespace.
pub fn normalize_romaji(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
