use serde::{Deserialize, Serialize};

use crate::models::Nutrients;

/// A cleaned catalog entry. Nutrient values are per 100 g.
///
/// Only the catalog normalizer builds these, so every instance holds the
/// invariants checked by [`FoodItem::is_valid`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub name: String,

    /// Lowercased name used for every keyword and allergen match.
    pub name_norm: String,

    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,

    pub grams_per_portion: f64,
    pub portion_unit: String,
}

impl FoodItem {
    /// Build an item from per-100g values, deriving the normalized name.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        per_100g: Nutrients,
        grams_per_portion: f64,
        portion_unit: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            name_norm: name.to_lowercase(),
            name,
            calories: per_100g.calories,
            protein: per_100g.protein,
            fat: per_100g.fat,
            carbs: per_100g.carbs,
            fiber: per_100g.fiber,
            grams_per_portion,
            portion_unit: portion_unit.into(),
        }
    }

    /// Nutrients per 100 g.
    pub fn per_100g(&self) -> Nutrients {
        Nutrients {
            calories: self.calories,
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
            fiber: self.fiber,
        }
    }

    /// Nutrients supplied by one standard portion.
    #[inline]
    pub fn per_portion(&self) -> Nutrients {
        self.per_100g().scale(self.grams_per_portion / 100.0)
    }

    /// Protein per calorie, used when ranking oversized pools.
    #[inline]
    pub fn protein_density(&self) -> f64 {
        self.protein / (self.calories + 1e-6)
    }

    /// Fiber per calorie, used when ranking oversized pools.
    #[inline]
    pub fn fiber_density(&self) -> f64 {
        self.fiber / (self.calories + 1e-6)
    }

    /// Whether the normalized name contains the given lowercase keyword.
    #[inline]
    pub fn mentions(&self, keyword: &str) -> bool {
        self.name_norm.contains(keyword)
    }

    /// Check the catalog bounds: positive calories and portion size,
    /// non-negative nutrients, each nutrient at or under its ceiling.
    pub fn is_valid(&self) -> bool {
        use crate::planner::constants::NUTRIENT_CEILINGS;

        self.calories > 0.0
            && self.grams_per_portion > 0.0
            && [self.protein, self.fat, self.carbs, self.fiber]
                .iter()
                .all(|&v| v >= 0.0)
            && self.calories <= NUTRIENT_CEILINGS.calories
            && self.protein <= NUTRIENT_CEILINGS.protein
            && self.fat <= NUTRIENT_CEILINGS.fat
            && self.carbs <= NUTRIENT_CEILINGS.carbs
            && self.fiber <= NUTRIENT_CEILINGS.fiber
    }
}
