use serde::{Deserialize, Serialize};

/// Broad category of a raw ingredient.
///
/// Meat, eggs and fish feed the protein pool; everything else feeds the
/// vegetable pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngredientCategory {
    Plant,
    Meat,
    Egg,
    Fish,
    AnimalProduct,
}

impl IngredientCategory {
    #[inline]
    pub fn is_protein(self) -> bool {
        matches!(self, Self::Meat | Self::Egg | Self::Fish)
    }
}

/// A kind of raw ingredient, as defined in an ingredient catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemKind {
    #[serde(rename = "Name")]
    pub name: String,

    /// Nutrition carried by a single item of this kind.
    #[serde(rename = "Nutrition")]
    pub nutrition: f64,

    #[serde(rename = "Category")]
    pub category: IngredientCategory,
}

impl ItemKind {
    pub fn new(name: &str, nutrition: f64, category: IngredientCategory) -> Self {
        Self {
            name: name.to_string(),
            nutrition,
            category,
        }
    }

    #[inline]
    pub fn is_protein(&self) -> bool {
        self.category.is_protein()
    }

    /// Non-negative nutrition; anything else makes the kind unusable.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.nutrition.is_finite() && self.nutrition >= 0.0
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl PartialEq for ItemKind {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ItemKind {}

impl std::hash::Hash for ItemKind {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// A stack of identical raw ingredients waiting to go into a pot.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientStack {
    pub kind: ItemKind,
    pub count: u32,
}

impl IngredientStack {
    pub fn new(kind: ItemKind, count: u32) -> Self {
        Self { kind, count }
    }

    /// Total nutrition this stack can deliver.
    #[inline]
    pub fn total_nutrition(&self) -> f64 {
        self.kind.nutrition * self.count as f64
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Dietary kind of whatever is currently in a pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodKind {
    Meat,
    Vegetarian,
    Other,
}

impl FoodKind {
    /// Meat or fish anywhere makes the pot meat; other animal products make it
    /// "other"; an empty memo is "other" too.
    pub fn from_ingredients<'a>(kinds: impl IntoIterator<Item = &'a ItemKind>) -> Self {
        let mut any = false;
        let mut animal_product = false;
        for kind in kinds {
            any = true;
            match kind.category {
                IngredientCategory::Meat | IngredientCategory::Fish => return FoodKind::Meat,
                IngredientCategory::Egg | IngredientCategory::AnimalProduct => {
                    animal_product = true
                }
                IngredientCategory::Plant => {}
            }
        }
        if !any || animal_product {
            FoodKind::Other
        } else {
            FoodKind::Vegetarian
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FoodKind::Meat => "Meat meal",
            FoodKind::Vegetarian => "Vegetarian meal",
            FoodKind::Other => "Other meal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protein_categories() {
        assert!(IngredientCategory::Meat.is_protein());
        assert!(IngredientCategory::Egg.is_protein());
        assert!(IngredientCategory::Fish.is_protein());
        assert!(!IngredientCategory::Plant.is_protein());
        assert!(!IngredientCategory::AnimalProduct.is_protein());
    }

    #[test]
    fn test_stack_total_nutrition() {
        let stack = IngredientStack::new(ItemKind::new("Potato", 0.05, IngredientCategory::Plant), 20);
        assert!((stack.total_nutrition() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_equality_case_insensitive() {
        let a = ItemKind::new("Rice", 0.05, IngredientCategory::Plant);
        let b = ItemKind::new("RICE", 0.05, IngredientCategory::Plant);
        assert_eq!(a, b);
    }

    #[test]
    fn test_food_kind() {
        let rice = ItemKind::new("Rice", 0.05, IngredientCategory::Plant);
        let milk = ItemKind::new("Milk", 0.05, IngredientCategory::AnimalProduct);
        let pork = ItemKind::new("Pork", 0.05, IngredientCategory::Meat);

        assert_eq!(FoodKind::from_ingredients([] as [&ItemKind; 0]), FoodKind::Other);
        assert_eq!(FoodKind::from_ingredients([&rice]), FoodKind::Vegetarian);
        assert_eq!(FoodKind::from_ingredients([&rice, &milk]), FoodKind::Other);
        assert_eq!(FoodKind::from_ingredients([&milk, &pork]), FoodKind::Meat);
    }
}
