mod ingredient;
mod ritual;
mod stew;

pub use ingredient::{FoodKind, IngredientCategory, IngredientStack, ItemKind};
pub use ritual::{OutcomeTier, Participant, QualityFactor, Role, SOCIAL_SKILL, XpDelta};
pub use stew::{Dispense, MealItem, StewType};
