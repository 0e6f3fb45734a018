use serde::{Deserialize, Serialize};

use crate::kitchen::constants::DISPLAY_EPSILON;

/// What a pot can currently produce, derived from its pool levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StewType {
    #[default]
    None,
    Vegetable,
    Meat,
    Mixed,
    HotWater,
}

impl StewType {
    /// Classify from pool levels.
    ///
    /// Both pools present gives Mixed, a single pool gives its own stew, and an
    /// empty pot gives HotWater when `always_produces` is set, None otherwise.
    pub fn classify(veg: f64, protein: f64, always_produces: bool) -> Self {
        Self::classify_above(veg, protein, 0.0, always_produces)
    }

    /// Classification used for drawing: trace amounts do not count
    /// and an empty pot is always None.
    pub fn display(veg: f64, protein: f64) -> Self {
        Self::classify_above(veg, protein, DISPLAY_EPSILON, false)
    }

    fn classify_above(veg: f64, protein: f64, threshold: f64, always_produces: bool) -> Self {
        let has_veg = veg > threshold;
        let has_protein = protein > threshold;
        match (has_veg, has_protein) {
            (true, true) => StewType::Mixed,
            (true, false) => StewType::Vegetable,
            (false, true) => StewType::Meat,
            (false, false) if always_produces => StewType::HotWater,
            (false, false) => StewType::None,
        }
    }

    pub fn is_none(self) -> bool {
        self == StewType::None
    }

    pub fn label(self) -> &'static str {
        match self {
            StewType::None => "nothing",
            StewType::Vegetable => "vegetable stew",
            StewType::Meat => "meat stew",
            StewType::Mixed => "mixed stew",
            StewType::HotWater => "hot water",
        }
    }
}

impl std::fmt::Display for StewType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a successful dispense: the stew type and the nutrition drawn
/// from the pool to make it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispense {
    pub stew: StewType,
    pub consumed: f64,
}

/// A concrete output item produced by an item factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    pub name: String,
    pub stew: StewType,
    pub nutrition: f64,
    pub ingredients: Vec<String>,
}
