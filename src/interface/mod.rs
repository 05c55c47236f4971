pub mod prompts;
pub mod render;

pub use prompts::{
    collect_profile_inputs, prompt_allergies, prompt_choice, prompt_conditions, prompt_positive,
    prompt_yes_no,
};
pub use render::{display_day_plan, display_food_list, display_profile, display_weekly_plan};
