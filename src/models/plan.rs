use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::{MealSlot, Nutrients};

/// One food placed in a slot, with its resolved portion and contributions.
///
/// Nutrient fields are already rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedItem {
    pub id: String,
    pub name: String,
    pub portions: f64,
    pub portion_unit: String,
    pub grams: f64,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
}

impl SelectedItem {
    pub fn nutrients(&self) -> Nutrients {
        Nutrients {
            calories: self.calories,
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
            fiber: self.fiber,
        }
    }
}

/// Selections per slot, kept in planning order.
///
/// Serializes as a JSON object whose keys follow that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotMeals(Vec<(MealSlot, Vec<SelectedItem>)>);

impl SlotMeals {
    pub fn push(&mut self, slot: MealSlot, items: Vec<SelectedItem>) {
        self.0.push((slot, items));
    }

    pub fn get(&self, slot: MealSlot) -> Option<&[SelectedItem]> {
        self.0
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, items)| items.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (MealSlot, &[SelectedItem])> {
        self.0.iter().map(|(s, items)| (*s, items.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every selected item across all slots.
    pub fn all_items(&self) -> impl Iterator<Item = &SelectedItem> {
        self.0.iter().flat_map(|(_, items)| items.iter())
    }
}

impl Serialize for SlotMeals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (slot, items) in &self.0 {
            map.serialize_entry(slot.as_str(), items)?;
        }
        map.end()
    }
}

/// A planned day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub meals: SlotMeals,

    /// Sum of every selected item, rounded to two decimals.
    pub totals: Nutrients,

    /// Slot-level failures such as `EMPTY_POOL:lunch`, in slot order.
    pub warnings: Vec<String>,
}

impl DayPlan {
    /// Number of slots that received at least one food.
    pub fn filled_slots(&self) -> usize {
        self.meals.iter().filter(|(_, items)| !items.is_empty()).count()
    }
}

/// One numbered day of a multi-day plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedDay {
    pub day_number: usize,
    #[serde(flatten)]
    pub plan: DayPlan,
}

/// Several independently planned days with their aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyPlan {
    pub days: Vec<PlannedDay>,
    pub weekly_totals: Nutrients,
    pub daily_averages: Nutrients,
    pub warnings: Vec<String>,
}
