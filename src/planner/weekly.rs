use tracing::info;

use crate::error::{PlanError, Result};
use crate::models::{FoodItem, NutrientTargets, Nutrients, PlannedDay, WeeklyPlan, round_to};
use crate::planner::assembler::{DietaryProfile, MealPlanner};

/// Plan `days` independent days and aggregate their totals.
///
/// Each day gets its own random source from the planner config, so a seeded
/// config reproduces the whole week. Foods may repeat across days.
pub fn build_week(
    planner: &MealPlanner,
    foods: &[FoodItem],
    targets: &NutrientTargets,
    dietary: &DietaryProfile,
    days: usize,
) -> Result<WeeklyPlan> {
    if days == 0 {
        return Err(PlanError::InvalidInput(
            "a weekly plan needs at least one day".to_string(),
        ));
    }

    let mut planned = Vec::with_capacity(days);
    let mut warnings = Vec::new();
    let mut sum = Nutrients::default();

    for day_number in 1..=days {
        let mut rng = planner.config().rng_for(day_number as u64);
        let plan = planner.build_day(foods, targets, dietary, &mut rng)?;

        sum += plan.totals;
        warnings.extend(
            plan.warnings
                .iter()
                .map(|w| format!("Day {}: {}", day_number, w)),
        );
        planned.push(PlannedDay { day_number, plan });
    }

    let weekly_totals = sum.rounded(2);
    let weekly = WeeklyPlan {
        days: planned,
        weekly_totals,
        daily_averages: daily_averages(&weekly_totals, days),
        warnings,
    };

    info!(
        days,
        avg_calories = weekly.daily_averages.calories,
        warnings = weekly.warnings.len(),
        "built weekly plan"
    );
    Ok(weekly)
}

/// Per-day mean of the rounded weekly totals, rounded to two decimals.
fn daily_averages(weekly_totals: &Nutrients, days: usize) -> Nutrients {
    let days = days as f64;
    Nutrients {
        calories: round_to(weekly_totals.calories / days, 2),
        protein: round_to(weekly_totals.protein / days, 2),
        fat: round_to(weekly_totals.fat / days, 2),
        carbs: round_to(weekly_totals.carbs / days, 2),
        fiber: round_to(weekly_totals.fiber / days, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_averages_divide_totals() {
        let totals = Nutrients {
            calories: 6000.0,
            protein: 361.0,
            fat: 195.5,
            carbs: 660.0,
            fiber: 84.1,
        };
        let avg = daily_averages(&totals, 3);
        assert_eq!(avg.calories, 2000.0);
        assert_eq!(avg.protein, 120.33);
        assert_eq!(avg.fat, 65.17);
        assert_eq!(avg.fiber, 28.03);
    }
}
