use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PotError, Result};
use crate::kitchen::{CatalogFile, FuelTank, IngredientCatalog, NutritionPool, PoolSnapshot, PotConfig, StewPot};

/// Everything needed to restore one pot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PotState {
    #[serde(default)]
    pub config: PotConfig,
    #[serde(default)]
    pub fuel: FuelTank,
    pub pool: PoolSnapshot,
}

impl PotState {
    pub fn capture(pot: &StewPot) -> Self {
        Self {
            config: pot.pool().config().clone(),
            fuel: pot.fuel().clone(),
            pool: pot.pool().snapshot(),
        }
    }

    /// Check the snapshot against the pool invariants before restoring it.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        let cap = self.config.capacity;
        let pool = &self.pool;
        for (name, value) in [("veg_amount", pool.veg_amount), ("protein_amount", pool.protein_amount)] {
            if !(0.0..=cap).contains(&value) {
                return Err(PotError::InvalidInput(format!(
                    "{} {} is outside [0, {}]",
                    name, value, cap
                )));
            }
        }
        if !(0.0..=self.config.ticks_to_complete).contains(&pool.cooking_progress) {
            return Err(PotError::InvalidInput(format!(
                "cooking_progress {} is outside [0, {}]",
                pool.cooking_progress, self.config.ticks_to_complete
            )));
        }
        if self.fuel.fuel < 0.0 || self.fuel.fuel > self.fuel.capacity {
            return Err(PotError::InvalidInput(format!(
                "fuel {} is outside [0, {}]",
                self.fuel.fuel, self.fuel.capacity
            )));
        }
        Ok(())
    }

    pub fn into_pot(self) -> StewPot {
        StewPot::from_parts(NutritionPool::from_snapshot(self.config, self.pool), self.fuel)
    }
}

/// Load and validate a saved pot.
pub fn load_pot<P: AsRef<Path>>(path: P) -> Result<StewPot> {
    let content = fs::read_to_string(path)?;
    let state: PotState = serde_json::from_str(&content)?;
    state.validate()?;
    Ok(state.into_pot())
}

pub fn save_pot<P: AsRef<Path>>(path: P, pot: &StewPot) -> Result<()> {
    let json = serde_json::to_string_pretty(&PotState::capture(pot))?;
    fs::write(path, json)?;
    Ok(())
}

/// Load an ingredient catalog.
///
/// Ingredient names are deduplicated case-insensitively (last occurrence wins).
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<IngredientCatalog> {
    let content = fs::read_to_string(path)?;
    let file: CatalogFile = serde_json::from_str(&content)?;
    if let Some(bad) = file.ingredients.iter().find(|k| !k.is_valid()) {
        return Err(PotError::InvalidInput(format!(
            "ingredient '{}' has invalid nutrition {}",
            bad.name, bad.nutrition
        )));
    }
    Ok(IngredientCatalog::new(file))
}

pub fn save_catalog<P: AsRef<Path>>(path: P, catalog: &IngredientCatalog) -> Result<()> {
    let json = serde_json::to_string_pretty(&catalog.to_file())?;
    fs::write(path, json)?;
    Ok(())
}
