pub mod assembler;
pub mod config;
pub mod constants;
pub mod dietary;
pub mod optimizer;
pub mod pool;
pub mod weekly;

pub use assembler::{DietaryProfile, MealPlanner, SlotOutcome, UsedIdSet};
pub use config::PlannerConfig;
pub use constants::*;
pub use dietary::{KNOWN_ALLERGY_TAGS, filter_by_user, suggest_allergy_tag};
pub use optimizer::{SlotRequest, solve_slot};
pub use pool::select_pool;
pub use weekly::build_week;
