use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use meal_slot_planner::catalog::{load_catalog, normalize_catalog, search_foods};
use meal_slot_planner::cli::{Cli, Command, FoodsArgs, PlanArgs, ProfileArgs};
use meal_slot_planner::error::{PlanError, Result};
use meal_slot_planner::interface::{
    collect_profile_inputs, display_day_plan, display_food_list, display_profile,
    display_weekly_plan,
};
use meal_slot_planner::models::FoodItem;
use meal_slot_planner::planner::{DietaryProfile, MealPlanner, PlannerConfig, build_week};
use meal_slot_planner::profile::{ProfileInputs, build_profile};
use meal_slot_planner::storage::{load_targets, save_json};

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Plan(args) => cmd_plan(&args),
        Command::Week { plan, days } => cmd_week(&plan, days),
        Command::Profile(args) => cmd_profile(args),
        Command::Foods(args) => cmd_foods(&args),
    }
}

/// Plan a single day and print it.
fn cmd_plan(args: &PlanArgs) -> Result<()> {
    let (planner, foods) = prepare(args)?;
    let targets = load_targets(&args.targets)?;
    let dietary = dietary_profile(args);

    let mut rng = planner.config().rng_for(1);
    let plan = planner.build_day(&foods, &targets, &dietary, &mut rng)?;

    display_day_plan(&plan);

    if let Some(path) = &args.output {
        save_json(path, &plan)?;
        println!("Plan saved to {}", path.display());
    }
    Ok(())
}

/// Plan `days` days and print each one plus the aggregates.
fn cmd_week(args: &PlanArgs, days: usize) -> Result<()> {
    let (planner, foods) = prepare(args)?;
    let targets = load_targets(&args.targets)?;
    let dietary = dietary_profile(args);

    let week = build_week(&planner, &foods, &targets, &dietary, days)?;

    display_weekly_plan(&week);

    if let Some(path) = &args.output {
        save_json(path, &week)?;
        println!("Weekly plan saved to {}", path.display());
    }
    Ok(())
}

/// Compute targets from flags or interactive prompts.
fn cmd_profile(args: ProfileArgs) -> Result<()> {
    let inputs = if args.interactive {
        collect_profile_inputs()?
    } else {
        ProfileInputs {
            age: args.age.ok_or_else(|| missing_flag("--age"))?,
            gender: args.gender.ok_or_else(|| missing_flag("--gender"))?,
            height_cm: args.height.ok_or_else(|| missing_flag("--height"))?,
            weight_kg: args.weight.ok_or_else(|| missing_flag("--weight"))?,
            activity: args.activity,
            goal: args.goal,
            intensity: args.intensity,
            conditions: args.conditions,
            allergies: args.allergies,
        }
    };

    let profile = build_profile(inputs)?;
    display_profile(&profile);

    if let Some(path) = &args.output {
        save_json(path, &profile)?;
        println!("Profile saved to {}", path.display());
    }
    Ok(())
}

/// List catalog foods matching an optional name search.
fn cmd_foods(args: &FoodsArgs) -> Result<()> {
    let foods = normalize_catalog(&load_catalog(&args.catalog)?)?;
    let found = search_foods(&foods, args.search.as_deref(), args.limit);
    display_food_list(&found, foods.len(), args.search.as_deref());
    Ok(())
}

/// Load and normalize the catalog and build a planner from the flags.
fn prepare(args: &PlanArgs) -> Result<(MealPlanner, Vec<FoodItem>)> {
    let raw = load_catalog(&args.catalog)?;
    let foods = normalize_catalog(&raw)?;
    info!(
        path = %args.catalog.display(),
        foods = foods.len(),
        "catalog ready"
    );

    let config = PlannerConfig {
        max_candidates: args.max_candidates,
        solve_time_limit: Duration::from_secs(args.time_limit),
        seed: args.seed,
    };
    Ok((MealPlanner::new(config), foods))
}

fn dietary_profile(args: &PlanArgs) -> DietaryProfile {
    DietaryProfile {
        allergies: args.allergies.clone(),
        conditions: args.conditions.clone(),
    }
}

fn missing_flag(flag: &str) -> PlanError {
    PlanError::InvalidInput(format!("{} is required without --interactive", flag))
}
