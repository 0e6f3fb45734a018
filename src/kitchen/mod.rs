pub mod catalog;
pub mod config;
pub mod constants;
pub mod fuel;
pub mod pool;
pub mod pot;

pub use catalog::{CatalogFile, IngredientCatalog, IngredientInfo, ItemFactory, StewDef};
pub use config::{PotConfig, StewCosts};
pub use constants::*;
pub use fuel::{FuelSource, FuelTank};
pub use pool::{NutritionPool, NutritionStore, PoolSnapshot};
pub use pot::StewPot;
