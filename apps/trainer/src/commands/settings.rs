//! Preference commands.
//!
//! Every change is persisted immediately. Changing what can be asked
//! (categories, quiz type) also forgets the recently shown items.

use super::CommandError;
use crate::db::StatsRepository;
use crate::state::AppState;
use kana_core::types::clamp_speech_rate;
use kana_core::{Category, Mode, QuizType, ScriptMode};
use std::collections::BTreeSet;

pub fn set_mode(state: &mut AppState, mode: Mode) {
    state.prefs.last_mode = mode;
    state.persist_preferences();
}

pub fn set_script_mode(state: &mut AppState, script: ScriptMode) {
    state.prefs.script_mode = script;
    state.persist_preferences();
}

/// Replace the selected categories. An empty selection is rejected.
pub fn set_categories(
    state: &mut AppState,
    categories: BTreeSet<Category>,
) -> Result<(), CommandError> {
    if categories.is_empty() {
        return Err(CommandError::new("select at least one category"));
    }
    state.prefs.selected_categories = categories;
    state.recent.clear();
    state.persist_preferences();
    Ok(())
}

/// Add or remove one category; the last selected category cannot be removed.
///
/// Returns whether the category is selected afterwards.
pub fn toggle_category(state: &mut AppState, category: Category) -> Result<bool, CommandError> {
    let mut categories = state.prefs.selected_categories.clone();
    let selected = if categories.remove(&category) {
        false
    } else {
        categories.insert(category);
        true
    };
    set_categories(state, categories)?;
    Ok(selected)
}

pub fn set_quiz_type(state: &mut AppState, quiz_type: QuizType) {
    if state.prefs.quiz_type != quiz_type {
        state.recent.clear();
    }
    state.prefs.quiz_type = quiz_type;
    state.persist_preferences();
}

/// Store a speech rate, clamped to the accepted range. Returns the stored value.
pub fn set_speech_rate(state: &mut AppState, rate: f64) -> f64 {
    state.prefs.speech_rate = clamp_speech_rate(rate);
    state.persist_preferences();
    state.prefs.speech_rate
}

/// Forget all statistics. Preferences are kept.
pub fn reset_progress(state: &mut AppState) {
    state.stats = state.stats.reset();
    state.recent.clear();
    if let Err(e) = state.repository.clear_stats() {
        tracing::warn!(error = %e, "failed to clear stored statistics");
    }
    tracing::info!("progress reset");
}
