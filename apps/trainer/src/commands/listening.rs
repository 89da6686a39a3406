//! Listening commands: hear a kana, pick its glyph.

use super::quiz::{draw_target, glyph_options, Question, QuestionKind};
use super::CommandError;
use crate::state::AppState;
use kana_core::{catalog, CoreError};

/// Draw a listening question and speak its target.
///
/// Without speech the question is still built; the front end shows the
/// options only.
pub fn next_listening_question(state: &mut AppState) -> Result<Question, CommandError> {
    let pool = state.pool();
    let target = draw_target(state, &pool)?;
    let options = glyph_options(state, target, &pool);
    state.speak(&target.glyphs.hiragana);

    Ok(Question {
        kind: QuestionKind::Listening,
        target_id: target.id.clone(),
        prompt: String::new(),
        options,
    })
}

/// Speak the question's target again.
pub fn replay(state: &mut AppState, question: &Question) -> Result<(), CommandError> {
    let target = catalog::get(&question.target_id)
        .ok_or_else(|| CoreError::UnknownItem(question.target_id.clone()))?;
    state.speak(&target.glyphs.hiragana);
    Ok(())
}
