//! Learning mode: browse the kana table, look at examples.

use super::CommandError;
use crate::state::AppState;
use kana_core::{catalog, mastery_score, Category, CoreError, KanaItem, MasteryTier, ScriptMode};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub id: String,
    pub glyph: String,
    pub romaji: String,
    pub mastery: f64,
    pub tier: MasteryTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSection {
    pub category: Category,
    /// Gaps in the syllabary are `None`.
    pub rows: Vec<Vec<Option<TableCell>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleView {
    pub id: String,
    pub glyph: String,
    pub romaji: String,
    pub word: String,
    pub reading: String,
    pub meaning: String,
}

/// One section per selected category, in catalog order.
pub fn kana_table(state: &AppState) -> Vec<TableSection> {
    Category::ALL
        .into_iter()
        .filter(|c| state.prefs.selected_categories.contains(c))
        .map(|category| TableSection {
            category,
            rows: catalog::grid(category)
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|cell| cell.map(|item| table_cell(state, item)))
                        .collect()
                })
                .collect(),
        })
        .collect()
}

fn table_cell(state: &AppState, item: &KanaItem) -> TableCell {
    let entry = state.stats.get(&item.id);
    TableCell {
        id: item.id.clone(),
        glyph: table_glyph(item, state.prefs.script_mode),
        romaji: item.transliteration.clone(),
        mastery: mastery_score(entry),
        tier: MasteryTier::for_entry(entry),
    }
}

/// The table is a reference, so mixed mode shows both scripts side by side.
fn table_glyph(item: &KanaItem, mode: ScriptMode) -> String {
    match mode {
        ScriptMode::Hiragana => item.glyphs.hiragana.clone(),
        ScriptMode::Katakana => item.glyphs.katakana.clone(),
        ScriptMode::Mixed => format!("{} {}", item.glyphs.hiragana, item.glyphs.katakana),
    }
}

/// Example word for an item; speaks the word.
pub fn show_example(state: &mut AppState, id: &str) -> Result<ExampleView, CommandError> {
    let item = lookup(id)?;
    state.speak(&item.example.word);
    Ok(ExampleView {
        id: item.id.clone(),
        glyph: table_glyph(item, state.prefs.script_mode),
        romaji: item.transliteration.clone(),
        word: item.example.word.clone(),
        reading: item.example.reading.clone(),
        meaning: item.example.meaning.clone(),
    })
}

/// Speak a single item.
pub fn speak_item(state: &mut AppState, id: &str) -> Result<(), CommandError> {
    let item = lookup(id)?;
    state.speak(&item.glyphs.hiragana);
    Ok(())
}

fn lookup(id: &str) -> Result<&'static KanaItem, CommandError> {
    let id = id.trim().to_lowercase();
    catalog::get(&id).ok_or_else(|| CoreError::UnknownItem(id).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::test_state;
    use chrono::Utc;
    use kana_core::Outcome;
    use std::collections::BTreeSet;

    #[test]
    fn table_has_selected_sections_only() {
        let (mut state, _) = test_state();
        state.prefs.selected_categories = BTreeSet::from([Category::Contracted, Category::Basic]);
        let table = kana_table(&state);
        let cats: Vec<Category> = table.iter().map(|s| s.category).collect();
        assert_eq!(cats, vec![Category::Basic, Category::Contracted]);
        assert_eq!(table[1].rows[0].len(), 3);
    }

    #[test]
    fn cells_carry_mastery() {
        let (mut state, _) = test_state();
        let now = Utc::now();
        for _ in 0..9 {
            state.stats = state.stats.record_outcome("ka", Outcome::Correct, now);
        }
        let table = kana_table(&state);
        let ka = table[0].rows[1][0].as_ref().unwrap();
        assert_eq!(ka.id, "ka");
        assert_eq!(ka.glyph, "か");
        assert_eq!(ka.tier, MasteryTier::Mastered);

        let ki = table[0].rows[1][1].as_ref().unwrap();
        assert_eq!(ki.tier, MasteryTier::NeedsWork);
        assert!(table[0].rows[7][1].is_none());
    }

    #[test]
    fn mixed_mode_shows_both_scripts() {
        let (mut state, _) = test_state();
        state.prefs.script_mode = ScriptMode::Mixed;
        let table = kana_table(&state);
        assert_eq!(table[0].rows[0][0].as_ref().unwrap().glyph, "あ ア");
    }

    #[test]
    fn example_is_shown_and_spoken() {
        let (mut state, speaker) = test_state();
        let view = show_example(&mut state, " NE ").unwrap();
        assert_eq!(view.word, "ねこ");
        assert_eq!(view.meaning, "cat");
        assert_eq!(speaker.spoken.borrow()[0].0, "ねこ");
    }

    #[test]
    fn unknown_example_is_an_error() {
        let (mut state, _) = test_state();
        assert!(show_example(&mut state, "qq").is_err());
        assert!(speak_item(&mut state, "qq").is_err());
    }

    #[test]
    fn speak_item_uses_hiragana() {
        let (mut state, speaker) = test_state();
        state.prefs.speech_rate = 0.8;
        speak_item(&mut state, "shi").unwrap();
        assert_eq!(speaker.spoken.borrow()[0], ("し".to_string(), 0.8));
    }
}
