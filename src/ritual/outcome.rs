use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PotError, Result};
use crate::models::OutcomeTier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeEntry {
    pub tier: OutcomeTier,
    /// Relative weight at full strength.
    pub chance: f64,
}

/// Quality-to-outcome table.
///
/// At quality `q` a positive tier weighs `chance * q` and a negative tier
/// `chance * (1 - q)`, so better rituals shift weight towards the good tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeTable {
    pub entries: Vec<OutcomeEntry>,
}

impl Default for OutcomeTable {
    fn default() -> Self {
        let entry = |tier, chance| OutcomeEntry { tier, chance };
        Self {
            entries: vec![
                entry(OutcomeTier::Terrible, 0.1),
                entry(OutcomeTier::Boring, 0.3),
                entry(OutcomeTier::Fun, 0.4),
                entry(OutcomeTier::Unforgettable, 0.2),
            ],
        }
    }
}

impl OutcomeTable {
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(PotError::InvalidConfig(
                "outcome table has no entries".to_string(),
            ));
        }
        if let Some(bad) = self.entries.iter().find(|e| e.chance.is_nan() || e.chance < 0.0) {
            return Err(PotError::InvalidConfig(format!(
                "outcome '{}' has invalid chance {}",
                bad.tier.label(),
                bad.chance
            )));
        }
        Ok(())
    }

    /// Weight of one entry at the given quality.
    pub fn weight_at_quality(entry: &OutcomeEntry, quality: f64) -> f64 {
        if entry.tier.is_positive() {
            entry.chance * quality.max(0.0)
        } else {
            entry.chance * (1.0 - quality).max(0.0)
        }
    }

    /// Normalized probability of each tier at the given quality.
    pub fn chances_at_quality(&self, quality: f64) -> Vec<(OutcomeTier, f64)> {
        let weights: Vec<(OutcomeTier, f64)> = self
            .entries
            .iter()
            .map(|e| (e.tier, Self::weight_at_quality(e, quality)))
            .collect();
        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        if total <= 0.0 {
            return weights.into_iter().map(|(t, _)| (t, 0.0)).collect();
        }
        weights.into_iter().map(|(t, w)| (t, w / total)).collect()
    }

    /// Weighted pick. None when every weight is zero.
    pub fn select<R: Rng>(&self, quality: f64, rng: &mut R) -> Option<OutcomeTier> {
        let weights: Vec<f64> = self
            .entries
            .iter()
            .map(|e| Self::weight_at_quality(e, quality))
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return None;
        }

        let mut roll = rng.gen_range(0.0..total);
        for (entry, weight) in self.entries.iter().zip(&weights) {
            if roll < *weight {
                debug!(quality, tier = entry.tier.label(), "selected ritual outcome");
                return Some(entry.tier);
            }
            roll -= weight;
        }
        // Rounding can leave a sliver past the last bucket.
        self.entries
            .iter()
            .zip(&weights)
            .rev()
            .find(|(_, w)| **w > 0.0)
            .map(|(e, _)| e.tier)
    }
}

/// Picks the outcome tier for a finished ritual.
pub trait OutcomeSelector {
    fn select_outcome(&mut self, quality: f64) -> Option<OutcomeTier>;
}

/// Random selection from a table with a caller-owned RNG.
pub struct TableSelector<'a, R: Rng> {
    pub table: &'a OutcomeTable,
    pub rng: R,
}

impl<R: Rng> OutcomeSelector for TableSelector<'_, R> {
    fn select_outcome(&mut self, quality: f64) -> Option<OutcomeTier> {
        self.table.select(quality, &mut self.rng)
    }
}

/// Always the same tier, regardless of quality.
pub struct FixedOutcome(pub OutcomeTier);

impl OutcomeSelector for FixedOutcome {
    fn select_outcome(&mut self, _quality: f64) -> Option<OutcomeTier> {
        Some(self.0)
    }
}
