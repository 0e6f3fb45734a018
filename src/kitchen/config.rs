use serde::{Deserialize, Serialize};

use crate::error::{PotError, Result};
use crate::kitchen::constants::*;
use crate::models::StewType;

/// Nutrition drawn from the pool for one serving of each stew.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StewCosts {
    pub vegetable: f64,
    pub meat: f64,
    pub mixed: f64,
}

impl Default for StewCosts {
    fn default() -> Self {
        Self {
            vegetable: FALLBACK_NUTRITION_PER_UNIT,
            meat: FALLBACK_NUTRITION_PER_UNIT,
            mixed: FALLBACK_NUTRITION_PER_UNIT,
        }
    }
}

impl StewCosts {
    /// Cost of one serving. Hot water and None are free.
    pub fn cost_of(&self, stew: StewType) -> f64 {
        match stew {
            StewType::Vegetable => self.vegetable,
            StewType::Meat => self.meat,
            StewType::Mixed => self.mixed,
            StewType::HotWater | StewType::None => 0.0,
        }
    }

    /// Most any single serving draws.
    pub fn max_cost(&self) -> f64 {
        self.vegetable.max(self.meat).max(self.mixed)
    }
}

/// Construction-time settings of a cooking pot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PotConfig {
    /// Capacity of each pool.
    pub capacity: f64,
    pub ticks_to_complete: f64,
    /// Only dispense once cooking reaches the ready fraction.
    pub requires_full_cook: bool,
    /// An empty pot still boils hot water.
    pub always_produces: bool,
    /// Fraction of capacity pre-filled into the vegetable pool on construction.
    pub initial_nutrition_percent: f64,
    /// Fraction of total nutrition lost to spoilage per fueled tick.
    pub decay_per_tick: Option<f64>,
    /// Total nutrition batch fills stop at. Capacity less one serving when unset.
    pub target_nutrition_level: Option<f64>,
    pub costs: StewCosts,
}

impl Default for PotConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            ticks_to_complete: DEFAULT_TICKS_TO_COMPLETE,
            requires_full_cook: true,
            always_produces: false,
            initial_nutrition_percent: 0.0,
            decay_per_tick: None,
            target_nutrition_level: None,
            costs: StewCosts::default(),
        }
    }
}

impl PotConfig {
    /// Reject settings that would break the pool invariants.
    pub fn validate(&self) -> Result<()> {
        if !(self.capacity.is_finite() && self.capacity > 0.0) {
            return Err(PotError::InvalidConfig(format!(
                "capacity must be positive, got {}",
                self.capacity
            )));
        }
        if !(self.ticks_to_complete.is_finite() && self.ticks_to_complete > 0.0) {
            return Err(PotError::InvalidConfig(format!(
                "ticks_to_complete must be positive, got {}",
                self.ticks_to_complete
            )));
        }
        if !(0.0..=1.0).contains(&self.initial_nutrition_percent) {
            return Err(PotError::InvalidConfig(format!(
                "initial_nutrition_percent must be within [0, 1], got {}",
                self.initial_nutrition_percent
            )));
        }
        if let Some(decay) = self.decay_per_tick {
            if !(0.0..1.0).contains(&decay) {
                return Err(PotError::InvalidConfig(format!(
                    "decay_per_tick must be within [0, 1), got {}",
                    decay
                )));
            }
        }
        if let Some(target) = self.target_nutrition_level {
            if !(target.is_finite() && (0.0..=self.capacity * 2.0).contains(&target)) {
                return Err(PotError::InvalidConfig(format!(
                    "target_nutrition_level must be within [0, {}], got {}",
                    self.capacity * 2.0,
                    target
                )));
            }
        }
        let costs = &self.costs;
        if [costs.vegetable, costs.meat, costs.mixed]
            .iter()
            .any(|c| !c.is_finite() || *c < 0.0)
        {
            return Err(PotError::InvalidConfig(
                "stew costs must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PotConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let config = PotConfig {
            capacity: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_full_decay() {
        let config = PotConfig {
            decay_per_tick: Some(1.0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_target_past_both_pools() {
        let config = PotConfig {
            target_nutrition_level: Some(DEFAULT_CAPACITY * 2.0 + 1.0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hot_water_is_free() {
        let costs = StewCosts::default();
        assert_eq!(costs.cost_of(StewType::HotWater), 0.0);
        assert_eq!(costs.cost_of(StewType::None), 0.0);
        assert_eq!(costs.cost_of(StewType::Mixed), FALLBACK_NUTRITION_PER_UNIT);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PotConfig = serde_json::from_str(r#"{"capacity": 20}"#).unwrap();
        assert_eq!(config.capacity, 20.0);
        assert_eq!(config.ticks_to_complete, DEFAULT_TICKS_TO_COMPLETE);
        assert!(config.requires_full_cook);
    }
}
