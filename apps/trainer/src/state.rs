//! Application state.

use crate::db::{PreferencesRepository, SqliteRepository, StatsRepository};
use crate::speech::Speaker;
use kana_core::{catalog, KanaItem, Preferences, RecencyQueue, Selector, StatisticsStore};

/// Everything one trainer session owns. The app is single-threaded, so
/// commands take `&mut AppState` directly.
pub struct AppState {
    pub repository: SqliteRepository,
    pub speaker: Box<dyn Speaker>,
    pub selector: Selector,
    pub stats: StatisticsStore,
    pub prefs: Preferences,
    pub recent: RecencyQueue,
}

impl AppState {
    /// Build state, loading statistics and preferences from the repository.
    pub fn new(
        repository: SqliteRepository,
        speaker: Box<dyn Speaker>,
        selector: Selector,
        recent_window: usize,
    ) -> Self {
        let stats = repository.load_stats();
        let prefs = repository.load_preferences();
        tracing::debug!(entries = stats.len(), mode = prefs.last_mode.as_str(), "state loaded");
        Self {
            repository,
            speaker,
            selector,
            stats,
            prefs,
            recent: RecencyQueue::new(recent_window),
        }
    }

    /// Catalog items in the selected categories.
    pub fn pool(&self) -> Vec<&'static KanaItem> {
        catalog::filter_by_categories(&self.prefs.selected_categories)
    }

    pub fn speech_available(&self) -> bool {
        self.speaker.is_available()
    }

    /// Speak at the preferred rate; a no-op when speech is unavailable.
    pub fn speak(&mut self, text: &str) {
        if self.speaker.is_available() {
            self.speaker.speak(text, self.prefs.speech_rate);
        }
    }

    /// Save statistics. Failures are logged and the session continues in memory.
    pub fn persist_stats(&self) {
        if let Err(e) = self.repository.save_stats(&self.stats) {
            tracing::warn!(error = %e, "failed to save statistics; progress kept in memory only");
        }
    }

    /// Save preferences. Failures are logged and ignored.
    pub fn persist_preferences(&self) {
        if let Err(e) = self.repository.save_preferences(&self.prefs) {
            tracing::warn!(error = %e, "failed to save preferences");
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use kana_core::WeightingPolicy;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Speaker that records what it was asked to say.
    #[derive(Clone, Default)]
    pub struct RecordingSpeaker {
        pub spoken: Rc<RefCell<Vec<(String, f64)>>>,
        pub unavailable: bool,
    }

    impl Speaker for RecordingSpeaker {
        fn is_available(&self) -> bool {
            !self.unavailable
        }

        fn speak(&mut self, text: &str, rate: f64) {
            self.spoken.borrow_mut().push((text.to_string(), rate));
        }
    }

    /// In-memory state with a fixed seed.
    pub fn test_state() -> (AppState, RecordingSpeaker) {
        let speaker = RecordingSpeaker::default();
        let state = AppState::new(
            SqliteRepository::open_in_memory().unwrap(),
            Box::new(speaker.clone()),
            Selector::seeded(WeightingPolicy::InverseMastery, 1234),
            6,
        );
        (state, speaker)
    }
}
