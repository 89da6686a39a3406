//! Progress overview for the selected categories.

use crate::state::AppState;
use kana_core::{mastery_score, MasteryTier};
use serde::Serialize;

/// How many items the weakest list holds.
const WEAKEST_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierCount {
    pub tier: MasteryTier,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeakItem {
    pub id: String,
    pub romaji: String,
    pub mastery: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub pool_size: usize,
    pub seen: usize,
    pub total_correct: u64,
    pub total_wrong: u64,
    /// Mean mastery over the pool, unseen items counting as zero.
    pub average_mastery: f64,
    /// One entry per tier, weakest first.
    pub tiers: Vec<TierCount>,
    /// Lowest mastery first; ties keep catalog order.
    pub weakest: Vec<WeakItem>,
}

pub fn progress_summary(state: &AppState) -> ProgressSummary {
    let pool = state.pool();
    let mut tiers: Vec<TierCount> = MasteryTier::legend()
        .into_iter()
        .map(|tier| TierCount {
            tier,
            label: tier.label(),
            count: 0,
        })
        .collect();

    let mut seen = 0;
    let mut total_correct = 0u64;
    let mut total_wrong = 0u64;
    let mut scored = Vec::with_capacity(pool.len());

    for item in &pool {
        let entry = state.stats.get(&item.id);
        if let Some(e) = entry {
            seen += 1;
            total_correct += u64::from(e.correct);
            total_wrong += u64::from(e.wrong);
        }
        let score = mastery_score(entry);
        let tier = MasteryTier::from_score(score);
        if let Some(slot) = tiers.iter_mut().find(|t| t.tier == tier) {
            slot.count += 1;
        }
        scored.push((*item, score));
    }

    let average_mastery = if pool.is_empty() {
        0.0
    } else {
        scored.iter().map(|(_, s)| s).sum::<f64>() / pool.len() as f64
    };

    scored.sort_by(|a, b| a.1.total_cmp(&b.1));
    let weakest = scored
        .into_iter()
        .take(WEAKEST_COUNT)
        .map(|(item, mastery)| WeakItem {
            id: item.id.clone(),
            romaji: item.transliteration.clone(),
            mastery,
        })
        .collect();

    ProgressSummary {
        pool_size: pool.len(),
        seen,
        total_correct,
        total_wrong,
        average_mastery,
        tiers,
        weakest,
    }
}
