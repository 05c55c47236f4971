use crate::models::{DayPlan, FoodItem, Nutrients, WeeklyPlan};
use crate::profile::Profile;

/// Display one day as a table, slot by slot.
pub fn display_day_plan(plan: &DayPlan) {
    println!();
    println!("=== Day Plan ===");
    print_day(plan);
    print_warnings(&plan.warnings);
}

/// Display every day of a weekly plan followed by the aggregates.
pub fn display_weekly_plan(week: &WeeklyPlan) {
    for day in &week.days {
        println!();
        println!("=== Day {} ===", day.day_number);
        print_day(&day.plan);
    }

    println!();
    println!("=== Week ({} days) ===", week.days.len());
    print_totals("Weekly totals", &week.weekly_totals);
    print_totals("Daily average", &week.daily_averages);
    print_warnings(&week.warnings);
}

/// Display computed metrics and targets.
pub fn display_profile(profile: &Profile) {
    println!();
    println!("=== Profile ===");
    println!("BMI:  {:.2}", profile.metrics.bmi);
    println!("BMR:  {:.1} kcal", profile.metrics.bmr_kcal);
    println!("TDEE: {:.1} kcal", profile.metrics.tdee_kcal);
    println!();
    println!("--- Daily targets ---");
    println!("Calories: {:.1} kcal", profile.targets.calories);
    println!("Protein:  {:.1} g", profile.targets.protein_g);
    println!("Fat:      {:.1} g", profile.targets.fat_g);
    println!("Carbs:    {:.1} g", profile.targets.carbs_g);
    println!("Fiber:    {:.1} g", profile.targets.fiber_g);
    println!();
}

/// Display catalog foods with per-100g values and their portion size.
pub fn display_food_list(foods: &[&FoodItem], total: usize, search: Option<&str>) {
    println!();
    match search {
        Some(term) => println!("=== Foods matching \"{}\" ===", term),
        None => println!("=== Foods ==="),
    }

    if foods.is_empty() {
        println!("  (none)");
    }

    let name_width = foods.iter().map(|f| f.name.len()).max().unwrap_or(10).max(10);
    for food in foods {
        println!(
            "  {:<width$}  {:>6.1} kcal  P {:>5.1}  F {:>5.1}  C {:>5.1}  Fb {:>4.1} | {} g per {}",
            food.name,
            food.calories,
            food.protein,
            food.fat,
            food.carbs,
            food.fiber,
            food.grams_per_portion,
            food.portion_unit,
            width = name_width
        );
    }

    println!();
    println!("Showing {} of {} foods (values per 100 g)", foods.len(), total);
}

fn print_day(plan: &DayPlan) {
    let name_width = plan
        .meals
        .all_items()
        .map(|item| item.name.len())
        .max()
        .unwrap_or(10)
        .max(10);

    for (slot, items) in plan.meals.iter() {
        println!();
        println!("[{}]", slot);
        if items.is_empty() {
            println!("  (empty)");
            continue;
        }
        for item in items {
            println!(
                "  {:<width$}  {:>5.2} x {:<8} {:>6.1} g | {:>6.1} kcal  P {:>5.1}  F {:>5.1}  C {:>5.1}  Fb {:>4.1}",
                item.name,
                item.portions,
                item.portion_unit,
                item.grams,
                item.calories,
                item.protein,
                item.fat,
                item.carbs,
                item.fiber,
                width = name_width
            );
        }
    }

    println!();
    print_totals("Totals", &plan.totals);
}

fn print_totals(label: &str, totals: &Nutrients) {
    println!(
        "{}: {:.0} kcal | protein {:.1} g | fat {:.1} g | carbs {:.1} g | fiber {:.1} g",
        label, totals.calories, totals.protein, totals.fat, totals.carbs, totals.fiber
    );
}

fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    println!();
    println!("--- Warnings ---");
    for warning in warnings {
        println!("  {}", warning);
    }
    println!();
}
