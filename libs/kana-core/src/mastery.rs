//! Mastery scoring and presentation tiers.

use crate::stats::StatsEntry;
use serde::{Deserialize, Serialize};

/// Laplace-smoothed accuracy in [0, 1). Unseen items score 0.
pub fn mastery_score(entry: Option<&StatsEntry>) -> f64 {
    match entry {
        None => 0.0,
        Some(e) => e.correct as f64 / (e.correct as f64 + e.wrong as f64 + 1.0),
    }
}

/// Ordered presentation buckets for a mastery score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryTier {
    NeedsWork,
    Basic,
    Improving,
    Proficient,
    Mastered,
}

impl MasteryTier {
    /// All tiers from weakest to strongest.
    pub fn legend() -> [MasteryTier; 5] {
        [
            Self::NeedsWork,
            Self::Basic,
            Self::Improving,
            Self::Proficient,
            Self::Mastered,
        ]
    }

    /// Bucket a score. Lower bounds are exclusive, so the tiers partition [0, 1].
    pub fn from_score(score: f64) -> Self {
        if score > 0.85 {
            Self::Mastered
        } else if score > 0.65 {
            Self::Proficient
        } else if score > 0.45 {
            Self::Improving
        } else if score > 0.25 {
            Self::Basic
        } else {
            Self::NeedsWork
        }
    }

    pub fn for_entry(entry: Option<&StatsEntry>) -> Self {
        Self::from_score(mastery_score(entry))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NeedsWork => "needs work",
            Self::Basic => "basic",
            Self::Improving => "improving",
            Self::Proficient => "proficient",
            Self::Mastered => "mastered",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(correct: u32, wrong: u32) -> StatsEntry {
        StatsEntry { correct, wrong, last_seen_at: 0 }
    }

    #[test]
    fn absent_scores_zero() {
        assert_eq!(mastery_score(None), 0.0);
    }

    #[test]
    fn single_correct_is_not_full_mastery() {
        assert_eq!(mastery_score(Some(&entry(1, 0))), 0.5);
    }

    #[test]
    fn score_is_monotonic() {
        assert!(mastery_score(Some(&entry(5, 0))) > mastery_score(Some(&entry(4, 0))));
        assert!(mastery_score(Some(&entry(5, 1))) < mastery_score(Some(&entry(5, 0))));
    }

    #[test]
    fn score_stays_in_unit_interval() {
        for (c, w) in [(0, 0), (0, 50), (50, 0), (u32::MAX, 0), (7, 3)] {
            let s = mastery_score(Some(&entry(c, w)));
            assert!((0.0..=1.0).contains(&s), "{c}/{w} -> {s}");
        }
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(MasteryTier::from_score(0.0), MasteryTier::NeedsWork);
        assert_eq!(MasteryTier::from_score(0.25), MasteryTier::NeedsWork);
        assert_eq!(MasteryTier::from_score(0.26), MasteryTier::Basic);
        assert_eq!(MasteryTier::from_score(0.5), MasteryTier::Improving);
        assert_eq!(MasteryTier::from_score(0.7), MasteryTier::Proficient);
        assert_eq!(MasteryTier::from_score(0.86), MasteryTier::Mastered);
        assert_eq!(MasteryTier::from_score(1.0), MasteryTier::Mastered);
    }

    #[test]
    fn tiers_never_decrease_with_score() {
        let mut last = MasteryTier::NeedsWork;
        for step in 0..=1000 {
            let tier = MasteryTier::from_score(step as f64 / 1000.0);
            assert!(tier >= last);
            last = tier;
        }
    }

    #[test]
    fn legend_is_ascending() {
        let legend = MasteryTier::legend();
        assert!(legend.windows(2).all(|w| w[0] < w[1]));
    }
}
