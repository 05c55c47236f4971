use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::profile::{ActivityLevel, Gender, Goal, Intensity};

/// meal_slot_planner: fills breakfast, snacks, lunch and dinner from a food
/// catalog so the day lands on your nutrient targets.
#[derive(Parser, Debug)]
#[command(name = "meal_slot_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log solver and pool details.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plan a single day.
    Plan(PlanArgs),

    /// Plan several independent days and aggregate them.
    Week {
        #[command(flatten)]
        plan: PlanArgs,

        /// Number of days to plan.
        #[arg(short, long, default_value_t = 7)]
        days: usize,
    },

    /// Compute daily targets from body metrics.
    Profile(ProfileArgs),

    /// List catalog foods, optionally filtered by name.
    Foods(FoodsArgs),
}

/// Options shared by `plan` and `week`.
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Food catalog, CSV or JSON.
    #[arg(short, long)]
    pub catalog: PathBuf,

    /// Targets JSON: bare targets or a saved profile.
    #[arg(short, long)]
    pub targets: PathBuf,

    /// Allergy tag to exclude (repeatable).
    #[arg(short, long = "allergy")]
    pub allergies: Vec<String>,

    /// Health condition, e.g. diabetes (repeatable).
    #[arg(long = "condition")]
    pub conditions: Vec<String>,

    /// Seed for reproducible pool sampling.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Seconds allowed per slot solve.
    #[arg(long, default_value_t = 10)]
    pub time_limit: u64,

    /// Largest candidate pool per slot.
    #[arg(long, default_value_t = 250)]
    pub max_candidates: usize,

    /// Write the plan as JSON to this path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct FoodsArgs {
    /// Food catalog, CSV or JSON.
    #[arg(short, long)]
    pub catalog: PathBuf,

    /// Case-insensitive name substring.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Most foods to list.
    #[arg(short, long, default_value_t = 100)]
    pub limit: usize,
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Prompt for every field instead of reading flags.
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(long, required_unless_present = "interactive")]
    pub age: Option<u32>,

    #[arg(long, value_enum, required_unless_present = "interactive")]
    pub gender: Option<Gender>,

    /// Height in centimetres.
    #[arg(long, required_unless_present = "interactive")]
    pub height: Option<f64>,

    /// Weight in kilograms.
    #[arg(long, required_unless_present = "interactive")]
    pub weight: Option<f64>,

    #[arg(long, value_enum, default_value_t = ActivityLevel::Moderate)]
    pub activity: ActivityLevel,

    #[arg(long, value_enum, default_value_t = Goal::Maintain)]
    pub goal: Goal,

    #[arg(long, value_enum, default_value_t = Intensity::Standard)]
    pub intensity: Intensity,

    #[arg(long = "condition")]
    pub conditions: Vec<String>,

    #[arg(long = "allergy")]
    pub allergies: Vec<String>,

    /// Write the profile as JSON to this path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan_with_repeated_allergies() {
        let cli = Cli::try_parse_from([
            "meal_slot_planner",
            "plan",
            "--catalog",
            "foods.csv",
            "--targets",
            "targets.json",
            "--allergy",
            "dairy",
            "--allergy",
            "peanut",
            "--seed",
            "7",
        ])
        .unwrap();

        match cli.command {
            Command::Plan(args) => {
                assert_eq!(args.allergies, vec!["dairy", "peanut"]);
                assert_eq!(args.seed, Some(7));
                assert_eq!(args.time_limit, 10);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_week_days() {
        let cli = Cli::try_parse_from([
            "meal_slot_planner",
            "-v",
            "week",
            "-c",
            "foods.json",
            "-t",
            "profile.json",
            "--days",
            "3",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Week { days: 3, .. }));
    }

    #[test]
    fn test_profile_requires_metrics_unless_interactive() {
        assert!(Cli::try_parse_from(["meal_slot_planner", "profile"]).is_err());
        assert!(Cli::try_parse_from(["meal_slot_planner", "profile", "--interactive"]).is_ok());
    }

    #[test]
    fn test_profile_goal_alias() {
        let cli = Cli::try_parse_from([
            "meal_slot_planner",
            "profile",
            "--age",
            "30",
            "--gender",
            "female",
            "--height",
            "165",
            "--weight",
            "60",
            "--goal",
            "fat_loss",
        ])
        .unwrap();

        match cli.command {
            Command::Profile(args) => assert_eq!(args.goal, Goal::WeightLoss),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_foods_defaults() {
        let cli = Cli::try_parse_from([
            "meal_slot_planner",
            "foods",
            "--catalog",
            "foods.csv",
            "--search",
            "rice",
        ])
        .unwrap();

        match cli.command {
            Command::Foods(args) => {
                assert_eq!(args.search.as_deref(), Some("rice"));
                assert_eq!(args.limit, 100);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
