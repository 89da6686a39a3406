//! Quiz commands: draw a question, answer it.

use super::CommandError;
use crate::state::AppState;
use chrono::Utc;
use kana_core::{
    catalog, evaluate, Answer, CoreError, KanaItem, MasteryTier, Outcome, QuizType,
    DEFAULT_DISTRACTORS,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Romaji prompt, kana options.
    MultipleChoice,
    /// Kana prompt, romaji typed.
    Typed,
    /// Spoken prompt, kana options.
    Listening,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub kind: QuestionKind,
    pub target_id: String,
    /// Empty for listening questions.
    pub prompt: String,
    /// Empty for typed questions.
    pub options: Vec<QuestionOption>,
}

impl Question {
    /// Id of the option shown at 1-based position `n`.
    pub fn option_id(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.options.get(i))
            .map(|o| o.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub correct_romaji: String,
    pub correct_glyph: String,
    pub mastery: f64,
    pub tier: MasteryTier,
}

/// Draw the next quiz question according to the preferred quiz type.
pub fn next_question(state: &mut AppState) -> Result<Question, CommandError> {
    let pool = state.pool();
    let target = draw_target(state, &pool)?;
    let script = state.prefs.script_mode;

    let question = match state.prefs.quiz_type {
        QuizType::MultipleChoice => Question {
            kind: QuestionKind::MultipleChoice,
            target_id: target.id.clone(),
            prompt: target.transliteration.clone(),
            options: glyph_options(state, target, &pool),
        },
        QuizType::Input => Question {
            kind: QuestionKind::Typed,
            target_id: target.id.clone(),
            prompt: state.selector.choose_glyph(target, script).to_string(),
            options: Vec::new(),
        },
    };

    tracing::debug!(item = %question.target_id, kind = ?question.kind, "question drawn");
    Ok(question)
}

/// Select a target from `pool` and remember it as recently shown.
pub(crate) fn draw_target(
    state: &mut AppState,
    pool: &[&'static KanaItem],
) -> Result<&'static KanaItem, CommandError> {
    let target = state
        .selector
        .select_next(pool, &state.stats, &state.recent)?;
    state.recent.push(target.id.clone());
    Ok(target)
}

/// The target and its distractors, labelled with glyphs in the current script.
pub(crate) fn glyph_options(
    state: &mut AppState,
    target: &'static KanaItem,
    pool: &[&'static KanaItem],
) -> Vec<QuestionOption> {
    let script = state.prefs.script_mode;
    state
        .selector
        .build_options(target, pool, DEFAULT_DISTRACTORS)
        .into_iter()
        .map(|item| QuestionOption {
            id: item.id.clone(),
            label: state.selector.choose_glyph(item, script).to_string(),
        })
        .collect()
}

/// Evaluate an answer, record the outcome and persist statistics.
///
/// Quiz questions speak the answer only when it was right; listening
/// questions always replay it.
pub fn submit_answer(
    state: &mut AppState,
    question: &Question,
    answer: &Answer,
) -> Result<AnswerFeedback, CommandError> {
    let target = catalog::get(&question.target_id)
        .ok_or_else(|| CoreError::UnknownItem(question.target_id.clone()))?;

    let evaluation = evaluate(answer, target);
    let outcome = Outcome::from_correct(evaluation.is_correct);
    state.stats = state.stats.record_outcome(&target.id, outcome, Utc::now());
    state.persist_stats();

    tracing::debug!(
        item = %target.id,
        given = %evaluation.given_normalized,
        correct = evaluation.is_correct,
        "answer recorded"
    );

    if evaluation.is_correct || question.kind == QuestionKind::Listening {
        state.speak(&target.glyphs.hiragana);
    }

    let entry = state.stats.get(&target.id);
    Ok(AnswerFeedback {
        is_correct: evaluation.is_correct,
        correct_romaji: target.transliteration.clone(),
        correct_glyph: state
            .selector
            .choose_glyph(target, state.prefs.script_mode)
            .to_string(),
        mastery: kana_core::mastery_score(entry),
        tier: MasteryTier::for_entry(entry),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::StatsRepository;
    use crate::state::testing::test_state;
    use kana_core::{Category, ScriptMode};
    use std::collections::BTreeSet;

    #[test]
    fn multiple_choice_question_shape() {
        let (mut state, _) = test_state();
        let question = next_question(&mut state).unwrap();
        assert_eq!(question.kind, QuestionKind::MultipleChoice);
        assert_eq!(question.options.len(), 4);
        let target = catalog::get(&question.target_id).unwrap();
        assert_eq!(question.prompt, target.transliteration);
        assert!(question.options.iter().any(|o| o.id == question.target_id));
        assert_eq!(state.recent.last(), Some(question.target_id.as_str()));
    }

    #[test]
    fn typed_question_uses_glyph_prompt() {
        let (mut state, _) = test_state();
        state.prefs.quiz_type = QuizType::Input;
        state.prefs.script_mode = ScriptMode::Katakana;
        let question = next_question(&mut state).unwrap();
        assert_eq!(question.kind, QuestionKind::Typed);
        assert!(question.options.is_empty());
        let target = catalog::get(&question.target_id).unwrap();
        assert_eq!(question.prompt, target.glyphs.katakana);
    }

    #[test]
    fn empty_pool_reports_category_message() {
        let (mut state, _) = test_state();
        state.prefs.selected_categories = BTreeSet::new();
        let err = next_question(&mut state).unwrap_err();
        assert!(err.message.contains("select at least one category"));
    }

    #[test]
    fn questions_come_from_selected_categories() {
        let (mut state, _) = test_state();
        state.prefs.selected_categories = BTreeSet::from([Category::SemiVoiced]);
        for _ in 0..20 {
            let question = next_question(&mut state).unwrap();
            assert_eq!(question.options.len(), 4);
            let target = catalog::get(&question.target_id).unwrap();
            assert_eq!(target.category, Category::SemiVoiced);
        }
    }

    #[test]
    fn correct_answer_is_recorded_persisted_and_spoken() {
        let (mut state, speaker) = test_state();
        let question = next_question(&mut state).unwrap();
        let answer = Answer::Choice(question.target_id.clone());

        let feedback = submit_answer(&mut state, &question, &answer).unwrap();

        assert!(feedback.is_correct);
        assert_eq!(feedback.mastery, 0.5);
        let entry = state.stats.get(&question.target_id).unwrap();
        assert_eq!((entry.correct, entry.wrong), (1, 0));
        assert_eq!(state.repository.load_stats(), state.stats);

        let target = catalog::get(&question.target_id).unwrap();
        assert_eq!(speaker.spoken.borrow().as_slice(), &[(target.glyphs.hiragana.clone(), 1.0)]);
    }

    #[test]
    fn wrong_typed_answer_is_not_spoken() {
        let (mut state, speaker) = test_state();
        state.prefs.quiz_type = QuizType::Input;
        let question = next_question(&mut state).unwrap();

        let feedback =
            submit_answer(&mut state, &question, &Answer::Typed("xx".into())).unwrap();

        assert!(!feedback.is_correct);
        assert_eq!(feedback.tier, MasteryTier::NeedsWork);
        assert_eq!(state.stats.get(&question.target_id).unwrap().wrong, 1);
        assert!(speaker.spoken.borrow().is_empty());
    }

    #[test]
    fn typed_answer_tolerates_case_and_spacing() {
        let (mut state, _) = test_state();
        state.prefs.quiz_type = QuizType::Input;
        let question = next_question(&mut state).unwrap();
        let romaji = catalog::get(&question.target_id).unwrap().transliteration.to_uppercase();

        let feedback =
            submit_answer(&mut state, &question, &Answer::Typed(format!("  {romaji} "))).unwrap();
        assert!(feedback.is_correct);
    }

    #[test]
    fn failed_save_keeps_progress_in_memory() {
        let (mut state, _) = test_state();
        state.repository.break_storage();
        let question = next_question(&mut state).unwrap();
        let answer = Answer::Choice(question.target_id.clone());

        let feedback = submit_answer(&mut state, &question, &answer).unwrap();

        assert!(feedback.is_correct);
        let entry = state.stats.get(&question.target_id).unwrap();
        assert_eq!((entry.correct, entry.wrong), (1, 0));
    }

    #[test]
    fn unknown_target_is_an_error() {
        let (mut state, _) = test_state();
        let question = Question {
            kind: QuestionKind::Typed,
            target_id: "xyz".into(),
            prompt: String::new(),
            options: vec![],
        };
        let err = submit_answer(&mut state, &question, &Answer::Typed("x".into())).unwrap_err();
        assert_eq!(err.message, "unknown kana id: xyz");
    }

    #[test]
    fn option_id_is_one_based() {
        let question = Question {
            kind: QuestionKind::MultipleChoice,
            target_id: "ka".into(),
            prompt: "ka".into(),
            options: vec![
                QuestionOption { id: "ka".into(), label: "か".into() },
                QuestionOption { id: "ki".into(), label: "き".into() },
            ],
        };
        assert_eq!(question.option_id(0), None);
        assert_eq!(question.option_id(2), Some("ki"));
        assert_eq!(question.option_id(3), None);
    }
}
