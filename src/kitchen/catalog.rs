use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::{PotError, Result};
use crate::models::{IngredientStack, ItemKind, MealItem, StewType};

/// What a pot needs to know about a raw ingredient stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngredientInfo {
    /// Nutrition of a single item.
    pub nutrition_value: f64,
    pub is_protein: bool,
    pub stack_count: u32,
}

/// Turns stew classifications into concrete items and describes raw ingredients.
pub trait ItemFactory {
    /// Materialize one serving. None when no output is defined for this stew.
    fn make_meal(&self, stew: StewType, ingredients: &[ItemKind]) -> Option<MealItem>;

    fn describe(&self, stack: &IngredientStack) -> IngredientInfo {
        IngredientInfo {
            nutrition_value: stack.kind.nutrition,
            is_protein: stack.kind.is_protein(),
            stack_count: stack.count,
        }
    }
}

/// Output item definition for one stew classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StewDef {
    pub stew: StewType,
    pub name: String,
    pub nutrition: f64,
}

/// On-disk shape of a catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub ingredients: Vec<ItemKind>,
    #[serde(default)]
    pub stews: Vec<StewDef>,
}

/// Known ingredient kinds and stew outputs.
#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    /// Kinds keyed by lowercase name.
    kinds: HashMap<String, ItemKind>,
    stews: Vec<StewDef>,
}

impl IngredientCatalog {
    /// Build a catalog. Later duplicates of a name win.
    pub fn new(file: CatalogFile) -> Self {
        let mut kinds = HashMap::new();
        for kind in file.ingredients {
            kinds.insert(kind.key(), kind);
        }
        Self {
            kinds,
            stews: file.stews,
        }
    }

    /// Stock catalog with a handful of ingredients and the four stews.
    pub fn standard() -> Self {
        use crate::models::IngredientCategory::*;
        Self::new(CatalogFile {
            ingredients: vec![
                ItemKind::new("Potato", 0.05, Plant),
                ItemKind::new("Rice", 0.05, Plant),
                ItemKind::new("Corn", 0.05, Plant),
                ItemKind::new("Berries", 0.05, Plant),
                ItemKind::new("Milk", 0.05, AnimalProduct),
                ItemKind::new("Chicken egg", 0.25, Egg),
                ItemKind::new("Pork", 0.05, Meat),
                ItemKind::new("Fish", 0.05, Fish),
            ],
            stews: vec![
                StewDef {
                    stew: StewType::Vegetable,
                    name: "Vegetable stew".to_string(),
                    nutrition: 0.5,
                },
                StewDef {
                    stew: StewType::Meat,
                    name: "Meat stew".to_string(),
                    nutrition: 0.5,
                },
                StewDef {
                    stew: StewType::Mixed,
                    name: "Hearty stew".to_string(),
                    nutrition: 0.5,
                },
                StewDef {
                    stew: StewType::HotWater,
                    name: "Hot water".to_string(),
                    nutrition: 0.0,
                },
            ],
        })
    }

    /// Look up a kind by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&ItemKind> {
        self.kinds.get(&name.to_lowercase())
    }

    /// Like `get`, but fails with the closest known name as a hint.
    pub fn require(&self, name: &str) -> Result<&ItemKind> {
        self.get(name).ok_or_else(|| PotError::IngredientNotFound {
            name: name.to_string(),
            suggestion: self.closest(name).map(|k| k.name.clone()),
        })
    }

    /// Closest known kind by Jaro-Winkler similarity, if any is close enough.
    pub fn closest(&self, name: &str) -> Option<&ItemKind> {
        let needle = name.to_lowercase();
        self.kinds
            .iter()
            .map(|(key, kind)| (kind, jaro_winkler(key, &needle)))
            .filter(|(_, score)| *score > 0.7)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(kind, _)| kind)
    }

    pub fn stew_def(&self, stew: StewType) -> Option<&StewDef> {
        self.stews.iter().find(|d| d.stew == stew)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &ItemKind> {
        self.kinds.values()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn to_file(&self) -> CatalogFile {
        let mut ingredients: Vec<ItemKind> = self.kinds.values().cloned().collect();
        ingredients.sort_by_key(|k| k.key());
        CatalogFile {
            ingredients,
            stews: self.stews.clone(),
        }
    }
}

impl ItemFactory for IngredientCatalog {
    fn make_meal(&self, stew: StewType, ingredients: &[ItemKind]) -> Option<MealItem> {
        let def = self.stew_def(stew)?;
        Some(MealItem {
            name: def.name.clone(),
            stew,
            nutrition: def.nutrition,
            ingredients: ingredients.iter().map(|k| k.name.clone()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_case_insensitive() {
        let catalog = IngredientCatalog::standard();
        assert!(catalog.get("potato").is_some());
        assert!(catalog.get("POTATO").is_some());
        assert!(catalog.get("turnip").is_none());
    }

    #[test]
    fn test_require_suggests_close_name() {
        let catalog = IngredientCatalog::standard();
        match catalog.require("potatoe") {
            Err(PotError::IngredientNotFound { suggestion, .. }) => {
                assert_eq!(suggestion.as_deref(), Some("Potato"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_describe_stack() {
        let catalog = IngredientCatalog::standard();
        let stack = IngredientStack::new(catalog.get("pork").unwrap().clone(), 30);
        let info = catalog.describe(&stack);
        assert!(info.is_protein);
        assert_eq!(info.stack_count, 30);
        assert_eq!(info.nutrition_value, 0.05);
    }

    #[test]
    fn test_make_meal_lists_ingredients() {
        let catalog = IngredientCatalog::standard();
        let rice = catalog.get("rice").unwrap().clone();
        let meal = catalog.make_meal(StewType::Vegetable, &[rice]).unwrap();
        assert_eq!(meal.name, "Vegetable stew");
        assert_eq!(meal.ingredients, vec!["Rice".to_string()]);
        assert!(catalog.make_meal(StewType::None, &[]).is_none());
    }
}
