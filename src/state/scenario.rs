use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PotError, Result};
use crate::kitchen::{CatalogFile, FuelTank, IngredientCatalog, PotConfig, StewPot};
use crate::models::{IngredientStack, MealItem, StewType};

/// One scripted action against a pot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Load `count` items of an ingredient from a fresh stack.
    Add { ingredient: String, count: u32 },
    /// Deliver a fixed nutrition amount carried by several ingredients.
    Batch {
        nutrition: f64,
        ingredients: Vec<String>,
    },
    Tick { count: u32 },
    /// Draw nutrition without serving. One serving of the current stew when
    /// `amount` is omitted.
    Consume {
        #[serde(default)]
        amount: Option<f64>,
    },
    /// Set the level batch fills stop at; omit `level` to restore the default.
    Target {
        #[serde(default)]
        level: Option<f64>,
    },
    Refuel { amount: f64 },
    Drain,
    Dispense,
    Clear,
    Inspect,
}

/// A pot setup plus the steps to run against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: PotConfig,
    /// Starts with a full tank when omitted.
    #[serde(default = "FuelTank::full")]
    pub fuel: FuelTank,
    /// Inline catalog; the stock catalog when omitted.
    #[serde(default)]
    pub catalog: Option<CatalogFile>,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&content)?;
        scenario.config.validate()?;
        Ok(scenario)
    }
}

/// What a step did.
#[derive(Debug, Clone, PartialEq)]
pub enum StepReport {
    Added {
        ingredient: String,
        absorbed: f64,
        used: u32,
        left: u32,
    },
    Batched {
        requested: f64,
        absorbed: f64,
    },
    Ticked {
        ticks: u32,
        progress_pct: f64,
        cooking: StewType,
    },
    Consumed {
        requested: Option<f64>,
        drawn: f64,
    },
    TargetSet {
        level: f64,
    },
    Refueled {
        accepted: f64,
    },
    Drained,
    Dispensed(Option<MealItem>),
    Cleared,
    Inspected(String),
}

/// Drives a pot through scenario steps and collects what happened.
pub struct ScenarioRunner {
    pot: StewPot,
    catalog: IngredientCatalog,
    served: Vec<MealItem>,
}

impl ScenarioRunner {
    pub fn new(pot: StewPot, catalog: IngredientCatalog) -> Self {
        Self {
            pot,
            catalog,
            served: Vec::new(),
        }
    }

    pub fn from_scenario(scenario: &Scenario) -> Self {
        let catalog = match &scenario.catalog {
            Some(file) => IngredientCatalog::new(file.clone()),
            None => IngredientCatalog::standard(),
        };
        Self::new(
            StewPot::new(scenario.config.clone(), scenario.fuel.clone()),
            catalog,
        )
    }

    pub fn pot(&self) -> &StewPot {
        &self.pot
    }

    pub fn catalog(&self) -> &IngredientCatalog {
        &self.catalog
    }

    /// Items dispensed so far.
    pub fn served(&self) -> &[MealItem] {
        &self.served
    }

    pub fn apply(&mut self, step: &Step) -> Result<StepReport> {
        debug!(?step, "applying step");
        let report = match step {
            Step::Add { ingredient, count } => {
                let kind = self.catalog.require(ingredient)?.clone();
                let mut stack = IngredientStack::new(kind, *count);
                let absorbed = self.pot.fill(&self.catalog, &mut stack);
                StepReport::Added {
                    ingredient: stack.kind.name.clone(),
                    absorbed,
                    used: count - stack.count,
                    left: stack.count,
                }
            }
            Step::Batch {
                nutrition,
                ingredients,
            } => {
                if ingredients.is_empty() {
                    return Err(PotError::InvalidInput(
                        "batch needs at least one ingredient".to_string(),
                    ));
                }
                let stacks = ingredients
                    .iter()
                    .map(|name| {
                        self.catalog
                            .require(name)
                            .map(|k| IngredientStack::new(k.clone(), 1))
                    })
                    .collect::<Result<Vec<_>>>()?;
                let absorbed = self.pot.fill_batch(&self.catalog, *nutrition, &stacks);
                StepReport::Batched {
                    requested: *nutrition,
                    absorbed,
                }
            }
            Step::Tick { count } => {
                self.pot.tick_n(*count);
                StepReport::Ticked {
                    ticks: *count,
                    progress_pct: self.pot.pool().cooking_progress_pct(),
                    cooking: self.pot.pool().currently_cooking(),
                }
            }
            Step::Consume { amount } => {
                let before = self.pot.pool().total_nutrition();
                let drawn = if self.pot.consume_amount(*amount) {
                    before - self.pot.pool().total_nutrition()
                } else {
                    0.0
                };
                StepReport::Consumed {
                    requested: *amount,
                    drawn,
                }
            }
            Step::Target { level } => {
                if let Some(l) = level {
                    let capacity = self.pot.pool().config().capacity;
                    if !(l.is_finite() && (0.0..=capacity * 2.0).contains(l)) {
                        return Err(PotError::InvalidInput(format!(
                            "target level {} outside [0, {}]",
                            l,
                            capacity * 2.0
                        )));
                    }
                }
                self.pot.pool_mut().set_target_level(*level);
                StepReport::TargetSet {
                    level: self.pot.pool().target_level(),
                }
            }
            Step::Refuel { amount } => StepReport::Refueled {
                accepted: self.pot.fuel_mut().refuel(*amount),
            },
            Step::Drain => {
                self.pot.fuel_mut().drain();
                StepReport::Drained
            }
            Step::Dispense => {
                let meal = self.pot.try_dispense_food(&self.catalog);
                if let Some(item) = &meal {
                    info!(item = %item.name, "served");
                    self.served.push(item.clone());
                }
                StepReport::Dispensed(meal)
            }
            Step::Clear => {
                self.pot.pool_mut().clear();
                StepReport::Cleared
            }
            Step::Inspect => StepReport::Inspected(self.pot.inspect_string()),
        };
        Ok(report)
    }

    /// Run every step in order, stopping at the first failing one.
    pub fn run(&mut self, steps: &[Step]) -> Result<Vec<StepReport>> {
        steps.iter().map(|s| self.apply(s)).collect()
    }

    pub fn into_pot(self) -> StewPot {
        self.pot
    }
}
