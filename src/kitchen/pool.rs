use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::kitchen::config::PotConfig;
use crate::kitchen::constants::*;
use crate::kitchen::fuel::FuelSource;
use crate::models::{Dispense, FoodKind, ItemKind, StewType};

/// Capability surface a container binds to.
pub trait NutritionStore {
    fn classify_available(&self) -> StewType;
    fn tick(&mut self, fuel: &mut dyn FuelSource);
    fn add_nutrition(&mut self, amount: f64, is_protein: bool) -> f64;
    fn consume_nutrition(&mut self, stew: StewType);
}

/// Saved form of a pool. Floats are stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub veg_amount: f64,
    pub protein_amount: f64,
    pub cooking_progress: f64,
    #[serde(default)]
    pub currently_cooking: StewType,
    #[serde(default)]
    pub ingredients_seen: Vec<ItemKind>,
}

/// Vegetable and protein nutrition held by one pot, plus its cooking progress.
///
/// Invariants after every mutation:
/// `0 <= veg, protein <= capacity` and `0 <= cooking_progress <= ticks_to_complete`.
#[derive(Debug, Clone)]
pub struct NutritionPool {
    config: PotConfig,
    veg: f64,
    protein: f64,
    cooking_progress: f64,
    /// Stew the current cook started as; None when idle.
    currently_cooking: StewType,
    /// Distinct ingredient kinds added since the last full clear, in insertion order.
    ingredients_seen: Vec<ItemKind>,
}

impl NutritionPool {
    pub fn new(config: PotConfig) -> Self {
        let initial = (config.capacity * config.initial_nutrition_percent).clamp(0.0, config.capacity);
        Self {
            config,
            veg: initial,
            protein: 0.0,
            cooking_progress: 0.0,
            currently_cooking: StewType::None,
            ingredients_seen: Vec::new(),
        }
    }

    /// Rebuild a pool from a snapshot, verbatim.
    pub fn from_snapshot(config: PotConfig, snapshot: PoolSnapshot) -> Self {
        Self {
            config,
            veg: snapshot.veg_amount,
            protein: snapshot.protein_amount,
            cooking_progress: snapshot.cooking_progress,
            currently_cooking: snapshot.currently_cooking,
            ingredients_seen: snapshot.ingredients_seen,
        }
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            veg_amount: self.veg,
            protein_amount: self.protein,
            cooking_progress: self.cooking_progress,
            currently_cooking: self.currently_cooking,
            ingredients_seen: self.ingredients_seen.clone(),
        }
    }

    pub fn config(&self) -> &PotConfig {
        &self.config
    }

    pub fn veg_amount(&self) -> f64 {
        self.veg
    }

    pub fn protein_amount(&self) -> f64 {
        self.protein
    }

    pub fn total_nutrition(&self) -> f64 {
        self.veg + self.protein
    }

    pub fn veg_pct(&self) -> f64 {
        self.veg / self.config.capacity
    }

    pub fn protein_pct(&self) -> f64 {
        self.protein / self.config.capacity
    }

    pub fn cooking_progress(&self) -> f64 {
        self.cooking_progress
    }

    pub fn cooking_progress_pct(&self) -> f64 {
        self.cooking_progress / self.config.ticks_to_complete
    }

    pub fn currently_cooking(&self) -> StewType {
        self.currently_cooking
    }

    pub fn ingredients(&self) -> &[ItemKind] {
        &self.ingredients_seen
    }

    pub fn food_kind(&self) -> FoodKind {
        FoodKind::from_ingredients(&self.ingredients_seen)
    }

    /// Total nutrition batch fills top up to.
    pub fn target_level(&self) -> f64 {
        match self.config.target_nutrition_level {
            Some(level) => level,
            None => (self.config.capacity - self.config.costs.max_cost()).max(0.0),
        }
    }

    pub fn set_target_level(&mut self, level: Option<f64>) {
        self.config.target_nutrition_level = level;
    }

    pub fn below_target(&self) -> bool {
        self.total_nutrition() < self.target_level()
    }

    /// Draw a fixed amount, split between the pools by their current share.
    ///
    /// Returns the nutrition actually removed.
    pub fn consume_amount(&mut self, amount: f64) -> f64 {
        let before = self.total_nutrition();
        if amount.is_nan() || amount <= 0.0 || before <= 0.0 {
            return 0.0;
        }
        let veg_part = amount * (self.veg / before);
        self.veg = (self.veg - veg_part).max(0.0);
        self.protein = (self.protein - (amount - veg_part)).max(0.0);
        self.clear_if_empty();
        before - self.total_nutrition()
    }

    /// Classification for drawing; ignores trace amounts.
    pub fn display_stew_type(&self) -> StewType {
        StewType::display(self.veg, self.protein)
    }

    /// Remaining room in the pool an ingredient of this kind would go to.
    pub fn space_remaining(&self, is_protein: bool) -> f64 {
        let current = if is_protein { self.protein } else { self.veg };
        (self.config.capacity - current).max(0.0)
    }

    /// Remember an ingredient kind for labeling. Duplicates are ignored.
    pub fn register_ingredient(&mut self, kind: &ItemKind) {
        if !self.ingredients_seen.contains(kind) {
            self.ingredients_seen.push(kind.clone());
        }
    }

    /// Empty both pools and forget the ingredient memo. Progress is untouched.
    pub fn clear(&mut self) {
        self.veg = 0.0;
        self.protein = 0.0;
        self.ingredients_seen.clear();
    }

    pub fn can_dispense_now(&self, fuel: &dyn FuelSource) -> bool {
        if self.classify_available().is_none() || !fuel.has_fuel() {
            return false;
        }
        !self.config.requires_full_cook || self.cooking_progress_pct() >= DISPENSE_READY_FRACTION
    }

    /// Serve one portion of whatever is classified right now.
    ///
    /// Returns None without touching state when the pot is not ready.
    pub fn dispense_food(&mut self, fuel: &dyn FuelSource) -> Option<Dispense> {
        if !self.can_dispense_now(fuel) {
            return None;
        }
        let stew = self.classify_available();
        let before = self.total_nutrition();
        self.consume_nutrition(stew);
        let consumed = before - self.total_nutrition();
        debug!(%stew, consumed, remaining = self.total_nutrition(), "dispensed serving");
        Some(Dispense { stew, consumed })
    }

    fn clear_if_empty(&mut self) {
        if self.total_nutrition() <= 0.0 && !self.ingredients_seen.is_empty() {
            debug!("pot emptied, clearing ingredient memo");
            self.clear();
        }
    }

    fn apply_decay(&mut self) {
        let Some(fraction) = self.config.decay_per_tick else {
            return;
        };
        if fraction <= 0.0 {
            return;
        }
        let keep = 1.0 - fraction;
        self.veg = (self.veg * keep).max(0.0);
        self.protein = (self.protein * keep).max(0.0);
    }
}

impl NutritionStore for NutritionPool {
    fn classify_available(&self) -> StewType {
        StewType::classify(self.veg, self.protein, self.config.always_produces)
    }

    fn tick(&mut self, fuel: &mut dyn FuelSource) {
        if !fuel.has_fuel() {
            if self.cooking_progress > 0.0 {
                self.cooking_progress = (self.cooking_progress - UNFUELED_PROGRESS_DECAY).max(0.0);
            }
            return;
        }

        let available = self.classify_available();
        if available.is_none() {
            if !self.currently_cooking.is_none() {
                debug!(
                    was = %self.currently_cooking,
                    progress = self.cooking_progress,
                    "ingredients ran out mid-cook, restarting"
                );
                self.currently_cooking = StewType::None;
                self.cooking_progress = 0.0;
            }
        } else {
            if self.currently_cooking.is_none() {
                self.currently_cooking = available;
            }
            if self.cooking_progress < self.config.ticks_to_complete {
                self.cooking_progress =
                    (self.cooking_progress + PROGRESS_PER_TICK).min(self.config.ticks_to_complete);
                fuel.notify_consumed_this_tick();
            }
        }

        self.apply_decay();
    }

    fn add_nutrition(&mut self, amount: f64, is_protein: bool) -> f64 {
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        let space = self.space_remaining(is_protein);
        if space <= 0.0 {
            return 0.0;
        }
        let actual = amount.min(space);

        let old_total = self.total_nutrition();
        if is_protein {
            self.protein = (self.protein + actual).min(self.config.capacity);
        } else {
            self.veg = (self.veg + actual).min(self.config.capacity);
        }
        let new_total = self.total_nutrition();

        if self.cooking_progress > 0.0 && new_total > old_total {
            let before = self.cooking_progress;
            self.cooking_progress *= (old_total + 1.0) / (new_total + 1.0);
            debug!(before, after = self.cooking_progress, "raw ingredients diluted the cook");
        }
        trace!(actual, is_protein, "added nutrition");
        actual
    }

    fn consume_nutrition(&mut self, stew: StewType) {
        let cost = self.config.costs.cost_of(stew);
        match stew {
            StewType::Vegetable => self.veg -= cost,
            StewType::Meat => self.protein -= cost,
            StewType::Mixed => {
                let half = cost / 2.0;
                self.veg -= half;
                self.protein -= half;
            }
            StewType::HotWater | StewType::None => {}
        }
        self.veg = self.veg.max(0.0);
        self.protein = self.protein.max(0.0);
        self.clear_if_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kitchen::fuel::FuelTank;

    fn pool() -> NutritionPool {
        NutritionPool::new(PotConfig::default())
    }

    #[test]
    fn test_add_respects_capacity() {
        let mut p = pool();
        assert_eq!(p.add_nutrition(10.0, false), 10.0);
        assert_eq!(p.add_nutrition(10.0, false), 5.0);
        assert_eq!(p.veg_amount(), DEFAULT_CAPACITY);
        assert_eq!(p.add_nutrition(1.0, false), 0.0);
    }

    #[test]
    fn test_add_non_positive_is_noop() {
        let mut p = pool();
        assert_eq!(p.add_nutrition(0.0, true), 0.0);
        assert_eq!(p.add_nutrition(-3.0, true), 0.0);
        assert_eq!(p.add_nutrition(f64::NAN, true), 0.0);
        assert_eq!(p.total_nutrition(), 0.0);
    }

    #[test]
    fn test_dilution_is_damped() {
        let mut p = pool();
        let mut fuel = FuelTank::full();
        p.add_nutrition(10.0, false);
        for _ in 0..1000 {
            p.tick(&mut fuel);
        }
        assert_eq!(p.cooking_progress(), 1000.0);

        p.add_nutrition(5.0, true);
        // 1000 * (10 + 1) / (15 + 1)
        assert!((p.cooking_progress() - 687.5).abs() < 1e-9);
    }

    #[test]
    fn test_add_without_progress_leaves_progress_zero() {
        let mut p = pool();
        p.add_nutrition(5.0, false);
        assert_eq!(p.cooking_progress(), 0.0);
    }

    #[test]
    fn test_consume_mixed_takes_half_from_each() {
        let mut p = pool();
        p.add_nutrition(2.0, false);
        p.add_nutrition(2.0, true);
        p.consume_nutrition(StewType::Mixed);
        assert!((p.veg_amount() - 1.75).abs() < 1e-9);
        assert!((p.protein_amount() - 1.75).abs() < 1e-9);
    }

    #[test]
    fn test_consume_clamps_and_clears() {
        let mut p = pool();
        let kind = ItemKind::new("Rice", 0.05, crate::models::IngredientCategory::Plant);
        p.add_nutrition(0.2, false);
        p.register_ingredient(&kind);
        p.consume_nutrition(StewType::Vegetable);
        assert_eq!(p.veg_amount(), 0.0);
        assert!(p.ingredients().is_empty());
    }

    #[test]
    fn test_target_level_defaults_below_capacity() {
        let mut p = pool();
        assert!((p.target_level() - (DEFAULT_CAPACITY - FALLBACK_NUTRITION_PER_UNIT)).abs() < 1e-9);
        p.set_target_level(Some(4.0));
        assert_eq!(p.target_level(), 4.0);
        p.add_nutrition(4.0, false);
        assert!(!p.below_target());
    }

    #[test]
    fn test_consume_amount_splits_by_share() {
        let mut p = pool();
        p.add_nutrition(3.0, false);
        p.add_nutrition(1.0, true);
        let taken = p.consume_amount(2.0);
        assert!((taken - 2.0).abs() < 1e-9);
        assert!((p.veg_amount() - 1.5).abs() < 1e-9);
        assert!((p.protein_amount() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_consume_amount_empties_and_clears() {
        let mut p = pool();
        let kind = ItemKind::new("Rice", 0.05, crate::models::IngredientCategory::Plant);
        p.add_nutrition(1.0, false);
        p.register_ingredient(&kind);
        assert!((p.consume_amount(5.0) - 1.0).abs() < 1e-9);
        assert_eq!(p.total_nutrition(), 0.0);
        assert!(p.ingredients().is_empty());
        assert_eq!(p.consume_amount(1.0), 0.0);
    }

    #[test]
    fn test_hot_water_consumes_nothing() {
        let mut p = NutritionPool::new(PotConfig {
            always_produces: true,
            ..Default::default()
        });
        assert_eq!(p.classify_available(), StewType::HotWater);
        p.consume_nutrition(StewType::HotWater);
        assert_eq!(p.total_nutrition(), 0.0);
    }

    #[test]
    fn test_unfueled_tick_bleeds_progress() {
        let mut p = pool();
        let mut fuel = FuelTank::full();
        p.add_nutrition(3.0, false);
        for _ in 0..10 {
            p.tick(&mut fuel);
        }
        fuel.drain();
        for _ in 0..4 {
            p.tick(&mut fuel);
        }
        assert_eq!(p.cooking_progress(), 6.0);
        for _ in 0..20 {
            p.tick(&mut fuel);
        }
        assert_eq!(p.cooking_progress(), 0.0);
        // Nutrition untouched while cold
        assert_eq!(p.veg_amount(), 3.0);
    }

    #[test]
    fn test_running_out_restarts_cook() {
        let mut p = pool();
        let mut fuel = FuelTank::full();
        p.add_nutrition(0.5, true);
        for _ in 0..100 {
            p.tick(&mut fuel);
        }
        assert_eq!(p.currently_cooking(), StewType::Meat);
        p.consume_nutrition(StewType::Meat);
        p.tick(&mut fuel);
        assert_eq!(p.cooking_progress(), 0.0);
        assert_eq!(p.currently_cooking(), StewType::None);
    }

    #[test]
    fn test_running_out_with_hot_water_keeps_cooking() {
        let mut p = NutritionPool::new(PotConfig {
            always_produces: true,
            ..Default::default()
        });
        let mut fuel = FuelTank::full();
        p.add_nutrition(0.5, true);
        for _ in 0..100 {
            p.tick(&mut fuel);
        }
        p.consume_nutrition(StewType::Meat);
        assert_eq!(p.classify_available(), StewType::HotWater);

        p.tick(&mut fuel);
        assert_eq!(p.cooking_progress(), 101.0);
        assert_eq!(p.currently_cooking(), StewType::Meat);
    }

    #[test]
    fn test_progress_caps_at_completion() {
        let mut p = NutritionPool::new(PotConfig {
            ticks_to_complete: 10.0,
            ..Default::default()
        });
        let mut fuel = FuelTank::full();
        p.add_nutrition(1.0, false);
        for _ in 0..25 {
            p.tick(&mut fuel);
        }
        assert_eq!(p.cooking_progress(), 10.0);
        // Fuel only burns while progress advances
        let spent = FuelTank::full().fuel - fuel.fuel;
        assert!((spent - 10.0 * DEFAULT_FUEL_PER_TICK).abs() < 1e-9);
    }

    #[test]
    fn test_decay_shrinks_pools_proportionally() {
        let mut p = NutritionPool::new(PotConfig {
            decay_per_tick: Some(0.1),
            ..Default::default()
        });
        let mut fuel = FuelTank::full();
        p.add_nutrition(10.0, false);
        p.add_nutrition(5.0, true);
        p.tick(&mut fuel);
        assert!((p.veg_amount() - 9.0).abs() < 1e-9);
        assert!((p.protein_amount() - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_initial_fill() {
        let p = NutritionPool::new(PotConfig {
            initial_nutrition_percent: 0.5,
            ..Default::default()
        });
        assert_eq!(p.veg_amount(), DEFAULT_CAPACITY * 0.5);
        assert_eq!(p.protein_amount(), 0.0);
    }

    #[test]
    fn test_dispense_requires_fuel() {
        let mut p = NutritionPool::new(PotConfig {
            requires_full_cook: false,
            ..Default::default()
        });
        p.add_nutrition(2.0, false);
        let mut fuel = FuelTank::default();
        assert!(p.dispense_food(&fuel).is_none());
        fuel.refuel(1.0);
        let served = p.dispense_food(&fuel).unwrap();
        assert_eq!(served.stew, StewType::Vegetable);
        assert!((served.consumed - FALLBACK_NUTRITION_PER_UNIT).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_restores_verbatim() {
        let mut p = pool();
        let mut fuel = FuelTank::full();
        p.add_nutrition(4.0, false);
        p.add_nutrition(1.5, true);
        for _ in 0..42 {
            p.tick(&mut fuel);
        }
        let restored = NutritionPool::from_snapshot(PotConfig::default(), p.snapshot());
        assert_eq!(restored.snapshot(), p.snapshot());
        assert_eq!(restored.classify_available(), StewType::Mixed);
    }
}
