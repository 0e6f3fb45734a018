use tracing::{debug, warn};

use crate::kitchen::catalog::ItemFactory;
use crate::kitchen::config::PotConfig;
use crate::kitchen::fuel::{FuelSource, FuelTank};
use crate::kitchen::pool::{NutritionPool, NutritionStore};
use crate::models::{IngredientStack, MealItem, StewType};

/// A fueled cooking pot: owns its nutrition pool and its heat source.
#[derive(Debug, Clone)]
pub struct StewPot<F: FuelSource = FuelTank> {
    pool: NutritionPool,
    fuel: F,
}

impl<F: FuelSource> StewPot<F> {
    pub fn new(config: PotConfig, fuel: F) -> Self {
        Self {
            pool: NutritionPool::new(config),
            fuel,
        }
    }

    pub fn from_parts(pool: NutritionPool, fuel: F) -> Self {
        Self { pool, fuel }
    }

    pub fn pool(&self) -> &NutritionPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut NutritionPool {
        &mut self.pool
    }

    pub fn fuel(&self) -> &F {
        &self.fuel
    }

    pub fn fuel_mut(&mut self) -> &mut F {
        &mut self.fuel
    }

    pub fn tick(&mut self) {
        self.pool.tick(&mut self.fuel);
    }

    pub fn tick_n(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Load as much of a raw stack as fits and shrink the stack accordingly.
    ///
    /// Returns the nutrition absorbed.
    pub fn fill(&mut self, factory: &impl ItemFactory, stack: &mut IngredientStack) -> f64 {
        let info = factory.describe(stack);
        if info.nutrition_value <= 0.0 || info.stack_count == 0 {
            return 0.0;
        }
        let available = info.nutrition_value * info.stack_count as f64;
        let absorbed = self.pool.add_nutrition(available, info.is_protein);
        if absorbed <= 0.0 {
            return 0.0;
        }
        self.pool.register_ingredient(&stack.kind);

        // Partial items count as used.
        let items = ((absorbed / info.nutrition_value) - 1e-9).ceil().max(1.0) as u32;
        let items = items.min(stack.count);
        stack.count -= items;
        debug!(
            ingredient = %stack.kind.name,
            absorbed,
            items,
            left = stack.count,
            "filled pot"
        );
        absorbed
    }

    /// Add a fixed amount of nutrition delivered by several stacks at once.
    ///
    /// The amount is split between the pools in proportion to the vegetable and
    /// protein nutrition the stacks carry. Stacks are not modified. Nothing is
    /// stored once the pool has reached its target level.
    pub fn fill_batch(
        &mut self,
        factory: &impl ItemFactory,
        nutrition: f64,
        stacks: &[IngredientStack],
    ) -> f64 {
        if nutrition <= 0.0 || stacks.is_empty() {
            return 0.0;
        }
        if !self.pool.below_target() {
            debug!(
                total = self.pool.total_nutrition(),
                target = self.pool.target_level(),
                "pot at target level, batch skipped"
            );
            return 0.0;
        }
        let mut veg = 0.0;
        let mut protein = 0.0;
        for stack in stacks {
            let info = factory.describe(stack);
            let carried = info.nutrition_value * info.stack_count as f64;
            if carried <= 0.0 {
                continue;
            }
            if info.is_protein {
                protein += carried;
            } else {
                veg += carried;
            }
        }
        let carried = veg + protein;
        if carried <= 0.0 {
            return 0.0;
        }

        let veg_share = nutrition * (veg / carried);
        let mut added = 0.0;
        if veg_share > 0.0 {
            added += self.pool.add_nutrition(veg_share, false);
        }
        if nutrition - veg_share > 0.0 {
            added += self.pool.add_nutrition(nutrition - veg_share, true);
        }
        if added > 0.0 {
            for stack in stacks.iter().filter(|s| s.total_nutrition() > 0.0) {
                self.pool.register_ingredient(&stack.kind);
            }
        }
        added
    }

    pub fn classify_available(&self) -> StewType {
        self.pool.classify_available()
    }

    pub fn can_dispense_now(&self) -> bool {
        self.pool.can_dispense_now(&self.fuel)
    }

    /// Whether the pool holds at least one serving of the current stew.
    pub fn has_enough_feedstock(&self) -> bool {
        let stew = self.pool.classify_available();
        if stew.is_none() {
            return false;
        }
        self.pool.total_nutrition() >= self.pool.config().costs.cost_of(stew)
    }

    /// Draw nutrition without serving a meal.
    ///
    /// `Some(n)` takes exactly `n`, only when the pool holds that much. `None`
    /// takes one serving of the current stew, only with enough feedstock. Both
    /// require the pot to be ready to dispense. Returns whether anything was drawn.
    pub fn consume_amount(&mut self, amount: Option<f64>) -> bool {
        if !self.can_dispense_now() {
            return false;
        }
        match amount {
            Some(n) => {
                if !(n.is_finite() && n > 0.0) || self.pool.total_nutrition() < n {
                    return false;
                }
                self.pool.consume_amount(n);
            }
            None => {
                if !self.has_enough_feedstock() {
                    return false;
                }
                let stew = self.pool.classify_available();
                self.pool.consume_nutrition(stew);
            }
        }
        debug!(?amount, remaining = self.pool.total_nutrition(), "consumed nutrition");
        true
    }

    /// Serve one item. None when not ready or when the factory has no output
    /// for the current stew; the pool is left untouched in both cases.
    pub fn try_dispense_food(&mut self, factory: &impl ItemFactory) -> Option<MealItem> {
        if !self.can_dispense_now() {
            return None;
        }
        let stew = self.pool.classify_available();
        let Some(meal) = factory.make_meal(stew, self.pool.ingredients()) else {
            warn!(%stew, "no output item defined for stew");
            return None;
        };
        self.pool.dispense_food(&self.fuel)?;
        Some(meal)
    }

    /// Multi-line status for an inspect pane.
    pub fn inspect_string(&self) -> String {
        let pool = &self.pool;
        let capacity = pool.config().capacity;
        let mut lines = vec![
            format!("Vegetable nutrition: {:.1} / {:.0}", pool.veg_amount(), capacity),
            format!("Protein nutrition: {:.1} / {:.0}", pool.protein_amount(), capacity),
        ];

        if !pool.ingredients().is_empty() {
            let names: Vec<String> = pool
                .ingredients()
                .iter()
                .enumerate()
                .map(|(i, k)| if i == 0 { k.name.clone() } else { k.name.to_lowercase() })
                .collect();
            lines.push(format!("Ingredients: {}", names.join(", ")));
            lines.push(pool.food_kind().label().to_string());
        }

        let available = pool.classify_available();
        if !self.fuel.has_fuel() {
            lines.push("Needs fuel".to_string());
        } else if available.is_none() {
            lines.push("Needs ingredients".to_string());
        } else {
            lines.push(format!(
                "Cooking {}: {:.0}%",
                available,
                pool.cooking_progress_pct() * 100.0
            ));
        }
        lines.join("\n")
    }
}
