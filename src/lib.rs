pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod profile;
pub mod solver;
pub mod storage;

pub use error::{PlanError, Result};
pub use models::{DayPlan, FoodItem, NutrientTargets, WeeklyPlan};
pub use planner::{MealPlanner, PlannerConfig};
