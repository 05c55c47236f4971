use std::fmt;

use serde::{Deserialize, Serialize};

/// The five meal periods of a day, in planning order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MealSlot {
    Breakfast,
    MorningSnack,
    Lunch,
    AfternoonSnack,
    Dinner,
}

impl MealSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::MorningSnack => "morning-snack",
            MealSlot::Lunch => "lunch",
            MealSlot::AfternoonSnack => "afternoon-snack",
            MealSlot::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword rule set a slot draws its candidates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolCategory {
    Breakfast,
    Snack,
    Lunch,
    Dinner,
}

/// Fixed shape of one slot: its share of the day and how many foods it holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MealSlotSpec {
    pub slot: MealSlot,
    pub calorie_fraction: f64,
    pub min_items: usize,
    pub max_items: usize,
    pub category: PoolCategory,
}
