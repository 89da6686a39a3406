//! Commands invoked by the front end.
//!
//! Each command takes the session state, performs one logical event
//! (draw a question, answer it, change a preference) and returns a plain
//! serializable value for rendering.

pub mod learning;
pub mod listening;
pub mod quiz;
pub mod settings;
pub mod stats;

pub use learning::{kana_table, show_example, speak_item, ExampleView, TableCell, TableSection};
pub use listening::{next_listening_question, replay};
pub use quiz::{next_question, submit_answer, AnswerFeedback, Question, QuestionKind, QuestionOption};
pub use settings::{
    reset_progress, set_categories, set_mode, set_quiz_type, set_script_mode, set_speech_rate,
    toggle_category,
};
pub use stats::{progress_summary, ProgressSummary, TierCount, WeakItem};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandError {}

impl From<crate::db::DbError> for CommandError {
    fn from(e: crate::db::DbError) -> Self {
        Self { message: e.to_string() }
    }
}

impl From<kana_core::CoreError> for CommandError {
    fn from(e: kana_core::CoreError) -> Self {
        Self { message: e.to_string() }
    }
}
