//! Adaptive item selection.
//!
//! The next item is drawn from the pool with probability proportional to a
//! weight that grows with wrong answers. Items in the recency queue are left
//! out of the draw unless that would leave nothing to draw from.

pub mod weights;

use crate::error::{CoreError, Result};
use crate::recency::RecencyQueue;
use crate::stats::{StatisticsStore, StatsEntry};
use crate::types::{KanaItem, ScriptMode, WeightingPolicy};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

pub use weights::{clamp_weight, InverseMastery, Linear, WrongRatio, UNSEEN_WEIGHT, WEIGHT_FLOOR};

/// Number of wrong options shown next to the correct one.
pub const DEFAULT_DISTRACTORS: usize = 3;

/// Trait for draw-weight curves.
pub trait WeightPolicy: Send + Sync {
    /// Policy identifier.
    fn name(&self) -> &'static str;

    /// Raw weight for an item's history; `None` means never answered.
    /// Callers clamp the result with `clamp_weight`.
    fn weight(&self, entry: Option<&StatsEntry>) -> f64;
}

/// Build the policy for a configured curve.
pub fn policy_for(kind: WeightingPolicy) -> Box<dyn WeightPolicy> {
    match kind {
        WeightingPolicy::InverseMastery => Box::new(InverseMastery::default()),
        WeightingPolicy::WrongRatio => Box::new(WrongRatio::default()),
        WeightingPolicy::Linear => Box::new(Linear::default()),
    }
}

/// Get policy by name.
pub fn get_policy(name: &str) -> Option<Box<dyn WeightPolicy>> {
    WeightingPolicy::from_str(name).map(policy_for)
}

/// Draws questions. Owns the weight policy and the random source.
pub struct Selector<R = ChaCha8Rng> {
    policy: Box<dyn WeightPolicy>,
    rng: R,
}

impl Selector<ChaCha8Rng> {
    /// Deterministic selector for reproducible sessions and tests.
    pub fn seeded(kind: WeightingPolicy, seed: u64) -> Self {
        Self::new(policy_for(kind), ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy(kind: WeightingPolicy) -> Self {
        Self::new(policy_for(kind), ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> Selector<R> {
    pub fn new(policy: Box<dyn WeightPolicy>, rng: R) -> Self {
        Self { policy, rng }
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Clamped draw weight for each pool item, in pool order.
    pub fn weights(&self, pool: &[&KanaItem], stats: &StatisticsStore) -> Vec<f64> {
        pool.iter()
            .map(|item| clamp_weight(self.policy.weight(stats.get(&item.id))))
            .collect()
    }

    /// Draw the next target. The caller pushes the result into `recent`.
    pub fn select_next<'a>(
        &mut self,
        pool: &[&'a KanaItem],
        stats: &StatisticsStore,
        recent: &RecencyQueue,
    ) -> Result<&'a KanaItem> {
        if pool.is_empty() {
            return Err(CoreError::EmptyPool);
        }

        let fresh: Vec<&'a KanaItem> = pool
            .iter()
            .copied()
            .filter(|item| !recent.contains(&item.id))
            .collect();
        let candidates: &[&'a KanaItem] = if fresh.is_empty() { pool } else { &fresh };

        let weights = self.weights(candidates, stats);
        match WeightedIndex::new(&weights) {
            Ok(dist) => Ok(candidates[dist.sample(&mut self.rng)]),
            // weights are clamped positive, so this is only reachable on float overflow
            Err(_) => candidates
                .choose(&mut self.rng)
                .copied()
                .ok_or(CoreError::EmptyPool),
        }
    }

    /// The target plus up to `count` distinct other pool items, shuffled.
    /// Small pools yield fewer options rather than failing.
    pub fn build_options<'a>(
        &mut self,
        target: &'a KanaItem,
        pool: &[&'a KanaItem],
        count: usize,
    ) -> Vec<&'a KanaItem> {
        let mut seen = HashSet::from([target.id.as_str()]);
        let mut others: Vec<&'a KanaItem> = pool
            .iter()
            .copied()
            .filter(|&item| seen.insert(item.id.as_str()))
            .collect();

        others.shuffle(&mut self.rng);
        others.truncate(count);
        others.push(target);
        others.shuffle(&mut self.rng);
        others
    }

    /// Glyph to display for `item`. Mixed mode picks a script at random.
    pub fn choose_glyph<'a>(&mut self, item: &'a KanaItem, mode: ScriptMode) -> &'a str {
        match mode {
            ScriptMode::Hiragana => item.glyph(false),
            ScriptMode::Katakana => item.glyph(true),
            ScriptMode::Mixed => item.glyph(self.rng.gen_bool(0.5)),
        }
    }
}
