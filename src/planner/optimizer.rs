use std::time::Duration;

use tracing::debug;

use crate::models::{FoodItem, NutrientTargets, Nutrients, SelectedItem, round_to};
use crate::planner::constants::*;
use crate::solver::{LinearModel, MilpBackend, Relation, SolveStatus, Variable};

/// What one slot must achieve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotRequest {
    /// Slot-scaled targets; `calories` is the slot calorie target.
    pub targets: NutrientTargets,
    pub min_items: usize,
    pub max_items: usize,
}

/// Over/under slack pair for one soft target.
struct Deviation {
    over: Option<Variable>,
    under: Variable,
}

/// Choose foods and portions for one slot.
///
/// Portions are continuous, gated by a binary "selected" flag: a selected
/// food takes `[MIN_PORTIONS, MAX_PORTIONS]`, an unselected one none.
/// Calories must land within the band around the target and fiber must
/// reach its floor; within that, weighted absolute deviation from every
/// nutrient target is minimized. Fiber is capped at its target.
///
/// The backend's incumbent is accepted when `time_limit` passes before
/// optimality is proven. Returns `None` when the pool is empty, the backend
/// finds no integer-feasible assignment in time, or fewer than `min_items`
/// foods keep a non-negligible portion.
pub fn solve_slot(
    pool: &[&FoodItem],
    request: &SlotRequest,
    backend: &dyn MilpBackend,
    time_limit: Duration,
) -> Option<Vec<SelectedItem>> {
    if pool.is_empty() {
        return None;
    }

    let per_portion: Vec<Nutrients> = pool.iter().map(|f| f.per_portion()).collect();
    let targets = &request.targets;
    let mut model = LinearModel::new();

    let portions: Vec<Variable> = pool
        .iter()
        .map(|_| model.add_continuous(0.0, MAX_PORTIONS, 0.0))
        .collect();
    let selected: Vec<Variable> = pool.iter().map(|_| model.add_binary(0.0)).collect();

    for (&x, &y) in portions.iter().zip(&selected) {
        model.add_constraint(vec![(x, 1.0), (y, -MAX_PORTIONS)], Relation::LessOrEqual, 0.0);
        model.add_constraint(vec![(x, 1.0), (y, -MIN_PORTIONS)], Relation::GreaterOrEqual, 0.0);
    }

    let count: Vec<(Variable, f64)> = selected.iter().map(|&y| (y, 1.0)).collect();
    model.add_constraint(count.clone(), Relation::GreaterOrEqual, request.min_items as f64);
    model.add_constraint(count, Relation::LessOrEqual, request.max_items as f64);

    let total = |pick: fn(&Nutrients) -> f64| -> Vec<(Variable, f64)> {
        portions
            .iter()
            .zip(&per_portion)
            .map(|(&x, n)| (x, pick(n)))
            .collect()
    };

    let calories = total(|n| n.calories);
    model.add_constraint(
        calories.clone(),
        Relation::GreaterOrEqual,
        targets.calories * CALORIE_BAND_LOW,
    );
    model.add_constraint(
        calories.clone(),
        Relation::LessOrEqual,
        targets.calories * CALORIE_BAND_HIGH,
    );

    let fiber = total(|n| n.fiber);
    model.add_constraint(
        fiber.clone(),
        Relation::GreaterOrEqual,
        targets.fiber_g * FIBER_FLOOR_FRACTION,
    );

    let deviations = [
        soft_target(&mut model, calories, targets.calories, CALORIE_WEIGHT, true),
        soft_target(&mut model, total(|n| n.protein), targets.protein_g, PROTEIN_WEIGHT, true),
        soft_target(&mut model, total(|n| n.fat), targets.fat_g, FAT_WEIGHT, true),
        soft_target(&mut model, total(|n| n.carbs), targets.carbs_g, CARBS_WEIGHT, true),
        soft_target(&mut model, fiber, targets.fiber_g, FIBER_WEIGHT, false),
    ];

    let assignment = match backend.solve(&model, time_limit) {
        SolveStatus::Optimal(assignment) => assignment,
        SolveStatus::Feasible(assignment) => {
            debug!(candidates = pool.len(), "time limit reached, using best pick found");
            assignment
        }
        status => {
            debug!(?status, candidates = pool.len(), "slot has no solution");
            return None;
        }
    };

    debug!(
        objective = assignment.objective(),
        calorie_over = ?deviations[0].over.map(|v| assignment.value(v)),
        calorie_under = assignment.value(deviations[0].under),
        "slot solved"
    );

    let items: Vec<SelectedItem> = pool
        .iter()
        .zip(&portions)
        .filter_map(|(food, &x)| {
            let amount = assignment.value(x);
            (amount >= MIN_PORTIONS - PORTION_TOLERANCE)
                .then(|| selected_item(food, amount.max(MIN_PORTIONS)))
        })
        .collect();

    if items.is_empty() || items.len() < request.min_items {
        debug!(kept = items.len(), min = request.min_items, "too few foods after dropping");
        return None;
    }
    Some(items)
}

/// Tie `achieved` to `target` through slack variables weighted in the
/// objective: `achieved = target + over - under`. Without `penalize_over`
/// only the shortfall is tracked.
fn soft_target(
    model: &mut LinearModel,
    achieved: Vec<(Variable, f64)>,
    target: f64,
    weight: f64,
    penalize_over: bool,
) -> Deviation {
    let under = model.add_continuous(0.0, f64::INFINITY, weight);
    let over = penalize_over.then(|| model.add_continuous(0.0, f64::INFINITY, weight));

    let mut terms = achieved;
    terms.push((under, 1.0));
    if let Some(over) = over {
        terms.push((over, -1.0));
    }
    model.add_constraint(terms, Relation::Equal, target);

    Deviation { over, under }
}

fn selected_item(food: &FoodItem, portions: f64) -> SelectedItem {
    let grams = food.grams_per_portion * portions;
    let eaten = food.per_100g().scale(grams / 100.0).rounded(1);

    SelectedItem {
        id: food.id.clone(),
        name: food.name.clone(),
        portions: round_to(portions, 2),
        portion_unit: food.portion_unit.clone(),
        grams: round_to(grams, 1),
        calories: eaten.calories,
        protein: eaten.protein,
        fat: eaten.fat,
        carbs: eaten.carbs,
        fiber: eaten.fiber,
    }
}
