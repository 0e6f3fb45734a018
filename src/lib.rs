pub mod cli;
pub mod error;
pub mod interface;
pub mod kitchen;
pub mod models;
pub mod ritual;
pub mod state;
pub mod sweep;

pub use error::{PotError, Result};
pub use kitchen::{NutritionPool, PotConfig, StewPot};
pub use models::{IngredientStack, ItemKind, StewType};
