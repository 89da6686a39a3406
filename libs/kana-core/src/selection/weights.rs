//! Draw-weight curves.
//!
//! Every curve maps an item's history to a positive weight; larger means
//! "show this sooner". The curves differ only in how steeply they favor
//! wrong answers.

use super::WeightPolicy;
use crate::stats::StatsEntry;

/// Smallest weight any candidate can have.
pub const WEIGHT_FLOOR: f64 = 0.05;

/// Weight of an item that has never been answered. Neutral is 1.0.
pub const UNSEEN_WEIGHT: f64 = 1.1;

/// Replace NaN, infinite, negative and too-small weights with the floor.
pub fn clamp_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > WEIGHT_FLOOR {
        weight
    } else {
        WEIGHT_FLOOR
    }
}

/// Laplace-smoothed miss rate, scaled so an even record sits at neutral.
#[derive(Debug, Clone)]
pub struct InverseMastery {
    pub scale: f64,
    pub unseen: f64,
}

impl Default for InverseMastery {
    fn default() -> Self {
        Self {
            scale: 2.0,
            unseen: UNSEEN_WEIGHT,
        }
    }
}

impl WeightPolicy for InverseMastery {
    fn name(&self) -> &'static str {
        "inverse-mastery"
    }

    fn weight(&self, entry: Option<&StatsEntry>) -> f64 {
        match entry {
            None => self.unseen,
            Some(e) => {
                let wrong = e.wrong as f64;
                let correct = e.correct as f64;
                self.scale * (wrong + 1.0) / (correct + wrong + 2.0)
            }
        }
    }
}

/// (wrong + 1) / (correct + 1).
#[derive(Debug, Clone)]
pub struct WrongRatio {
    pub unseen: f64,
}

impl Default for WrongRatio {
    fn default() -> Self {
        Self { unseen: UNSEEN_WEIGHT }
    }
}

impl WeightPolicy for WrongRatio {
    fn name(&self) -> &'static str {
        "wrong-ratio"
    }

    fn weight(&self, entry: Option<&StatsEntry>) -> f64 {
        match entry {
            None => self.unseen,
            Some(e) => (e.wrong as f64 + 1.0) / (e.correct as f64 + 1.0),
        }
    }
}

/// 1 + wrong × wrong_factor − correct × correct_factor.
#[derive(Debug, Clone)]
pub struct Linear {
    pub wrong_factor: f64,
    pub correct_factor: f64,
    pub unseen: f64,
}

impl Default for Linear {
    fn default() -> Self {
        Self {
            wrong_factor: 2.0,
            correct_factor: 0.2,
            unseen: UNSEEN_WEIGHT,
        }
    }
}

impl WeightPolicy for Linear {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn weight(&self, entry: Option<&StatsEntry>) -> f64 {
        match entry {
            None => self.unseen,
            Some(e) => {
                1.0 + e.wrong as f64 * self.wrong_factor - e.correct as f64 * self.correct_factor
            }
        }
    }
}
