pub mod food;
pub mod nutrients;
pub mod plan;
pub mod slot;
pub mod targets;

pub use food::FoodItem;
pub use nutrients::{Nutrients, round_to};
pub use plan::{DayPlan, PlannedDay, SelectedItem, SlotMeals, WeeklyPlan};
pub use slot::{MealSlot, MealSlotSpec, PoolCategory};
pub use targets::NutrientTargets;
