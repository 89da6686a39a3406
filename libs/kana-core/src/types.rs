//! Core types for the kana trainer.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Kana grouping used for filtering the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Plain gojūon.
    Basic,
    /// Dakuten row (が, ざ, だ, ば).
    #[serde(alias = "dakuten")]
    Voiced,
    /// Handakuten row (ぱ).
    #[serde(alias = "handakuten")]
    SemiVoiced,
    /// Yōon combinations (きゃ, しゅ, ...).
    #[serde(alias = "youon")]
    Contracted,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Self::Basic,
        Self::Voiced,
        Self::SemiVoiced,
        Self::Contracted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Voiced => "voiced",
            Self::SemiVoiced => "semi-voiced",
            Self::Contracted => "contracted",
        }
    }

    /// Parse from string. Accepts the Japanese grouping names as well.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" | "gojuon" => Some(Self::Basic),
            "voiced" | "dakuten" => Some(Self::Voiced),
            "semi-voiced" | "semivoiced" | "handakuten" => Some(Self::SemiVoiced),
            "contracted" | "youon" => Some(Self::Contracted),
            _ => None,
        }
    }
}

/// Which script is shown for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptMode {
    Hiragana,
    Katakana,
    /// Either script, chosen per rendering.
    Mixed,
}

impl Default for ScriptMode {
    fn default() -> Self {
        Self::Hiragana
    }
}

impl ScriptMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hiragana => "hiragana",
            Self::Katakana => "katakana",
            Self::Mixed => "mixed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hiragana" | "hira" => Some(Self::Hiragana),
            "katakana" | "kata" => Some(Self::Katakana),
            "mixed" | "both" => Some(Self::Mixed),
            _ => None,
        }
    }
}

/// How quiz questions are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizType {
    MultipleChoice,
    Input,
}

impl Default for QuizType {
    fn default() -> Self {
        Self::MultipleChoice
    }
}

impl QuizType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple-choice",
            Self::Input => "input",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "multiple-choice" | "mc" | "choice" => Some(Self::MultipleChoice),
            "input" | "typed" | "type" => Some(Self::Input),
            _ => None,
        }
    }
}

/// Top-level activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Learning,
    Quiz,
    Listening,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Learning
    }
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learning => "learning",
            Self::Quiz => "quiz",
            Self::Listening => "listening",
        }
    }
}

/// Result of a single answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Wrong,
}

impl Outcome {
    pub fn from_correct(correct: bool) -> Self {
        if correct { Self::Correct } else { Self::Wrong }
    }

    pub fn is_correct(self) -> bool {
        self == Self::Correct
    }
}

/// Weight curve used by the selection engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightingPolicy {
    InverseMastery,
    WrongRatio,
    Linear,
}

impl Default for WeightingPolicy {
    fn default() -> Self {
        Self::InverseMastery
    }
}

impl WeightingPolicy {
    /// Get the policy name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InverseMastery => "inverse-mastery",
            Self::WrongRatio => "wrong-ratio",
            Self::Linear => "linear",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "inverse-mastery" => Some(Self::InverseMastery),
            "wrong-ratio" => Some(Self::WrongRatio),
            "linear" => Some(Self::Linear),
            _ => None,
        }
    }
}

/// The two equivalent written forms of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyphs {
    pub hiragana: String,
    pub katakana: String,
}

/// Example word shown alongside an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub word: String,
    pub reading: String,
    pub meaning: String,
}

/// One syllabary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanaItem {
    pub id: String,
    pub category: Category,
    pub glyphs: Glyphs,
    /// Romaji reading; the typed-answer target.
    pub transliteration: String,
    pub example: Example,
    /// Position in the category's browse grid.
    pub row: usize,
    pub col: usize,
}

impl KanaItem {
    /// Glyph for a fixed script. `Mixed` needs a coin flip, see
    /// `Selector::choose_glyph`.
    pub fn glyph(&self, katakana: bool) -> &str {
        if katakana {
            &self.glyphs.katakana
        } else {
            &self.glyphs.hiragana
        }
    }
}

/// Lowest accepted speech rate.
pub const MIN_SPEECH_RATE: f64 = 0.7;
/// Highest accepted speech rate.
pub const MAX_SPEECH_RATE: f64 = 1.3;

/// Persisted UI preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub last_mode: Mode,
    pub script_mode: ScriptMode,
    /// Unknown category names are dropped on load.
    #[serde(deserialize_with = "known_categories")]
    pub selected_categories: BTreeSet<Category>,
    pub quiz_type: QuizType,
    pub speech_rate: f64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            last_mode: Mode::default(),
            script_mode: ScriptMode::default(),
            selected_categories: BTreeSet::from([Category::Basic]),
            quiz_type: QuizType::default(),
            speech_rate: 1.0,
        }
    }
}

impl Preferences {
    /// Repair values that may have been written by an older or hand-edited store.
    pub fn sanitized(mut self) -> Self {
        if self.selected_categories.is_empty() {
            self.selected_categories = Preferences::default().selected_categories;
        }
        self.speech_rate = clamp_speech_rate(self.speech_rate);
        self
    }
}

fn known_categories<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeSet<Category>, D::Error> {
    let names = Vec::<String>::deserialize(d)?;
    Ok(names.iter().filter_map(|n| Category::from_str(n)).collect())
}

/// Clamp a speech rate into the accepted range; non-finite values reset to 1.0.
pub fn clamp_speech_rate(rate: f64) -> f64 {
    if rate.is_finite() {
        rate.clamp(MIN_SPEECH_RATE, MAX_SPEECH_RATE)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_accepts_grouping_names() {
        assert_eq!(Category::from_str("dakuten"), Some(Category::Voiced));
        assert_eq!(Category::from_str("Semi-Voiced"), Some(Category::SemiVoiced));
        assert_eq!(Category::from_str("youon"), Some(Category::Contracted));
        assert_eq!(Category::from_str("kanji"), None);
    }

    #[test]
    fn category_deserializes_legacy_names() {
        let cats: Vec<Category> = serde_json::from_str(r#"["basic","dakuten","handakuten","youon"]"#).unwrap();
        assert_eq!(cats, Category::ALL.to_vec());
    }

    #[test]
    fn preferences_round_trip_camel_case() {
        let prefs = Preferences::default();
        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains("\"scriptMode\":\"hiragana\""));
        assert!(json.contains("\"quizType\":\"multiple-choice\""));
        let back: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefs);
    }

    #[test]
    fn partial_preferences_fill_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"scriptMode":"katakana"}"#).unwrap();
        assert_eq!(prefs.script_mode, ScriptMode::Katakana);
        assert_eq!(prefs.selected_categories, BTreeSet::from([Category::Basic]));
    }

    #[test]
    fn unknown_categories_are_dropped() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"selectedCategories":["kanji","dakuten","voiced"]}"#).unwrap();
        assert_eq!(prefs.selected_categories, BTreeSet::from([Category::Voiced]));
    }

    #[test]
    fn sanitized_repairs_empty_categories_and_rate() {
        let prefs = Preferences {
            selected_categories: BTreeSet::new(),
            speech_rate: 4.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(prefs.selected_categories, BTreeSet::from([Category::Basic]));
        assert_eq!(prefs.speech_rate, MAX_SPEECH_RATE);
    }

    #[test]
    fn speech_rate_nan_resets() {
        assert_eq!(clamp_speech_rate(f64::NAN), 1.0);
        assert_eq!(clamp_speech_rate(0.1), MIN_SPEECH_RATE);
    }
}
