use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{
    DayPlan, FoodItem, MealSlotSpec, NutrientTargets, Nutrients, SelectedItem, SlotMeals,
};
use crate::planner::config::PlannerConfig;
use crate::planner::constants::{MEAL_SLOTS, WARN_EMPTY_POOL, WARN_INFEASIBLE};
use crate::planner::dietary::filter_by_user;
use crate::planner::optimizer::{SlotRequest, solve_slot};
use crate::planner::pool::select_pool;
use crate::solver::{MicroLpBackend, MilpBackend};

/// Allergy and condition tags for one user. Case-insensitive, free-form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DietaryProfile {
    pub allergies: Vec<String>,
    pub conditions: Vec<String>,
}

/// Food ids already placed earlier in the day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedIdSet(HashSet<String>);

impl UsedIdSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Record every item of a finished slot.
    pub fn with_items(mut self, items: &[SelectedItem]) -> Self {
        self.0.extend(items.iter().map(|item| item.id.clone()));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// How one slot turned out.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotOutcome {
    Planned(Vec<SelectedItem>),
    EmptyPool,
    Infeasible,
}

/// Builds day plans against a catalog snapshot.
///
/// Holds no per-build state, so one planner can serve concurrent builds as
/// long as each brings its own random source.
#[derive(Clone)]
pub struct MealPlanner {
    config: PlannerConfig,
    backend: Arc<dyn MilpBackend>,
}

impl MealPlanner {
    /// Planner using the bundled `microlp` backend.
    pub fn new(config: PlannerConfig) -> Self {
        Self::with_backend(config, Arc::new(MicroLpBackend::new()))
    }

    pub fn with_backend(config: PlannerConfig, backend: Arc<dyn MilpBackend>) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan the five slots of one day.
    ///
    /// Slots are solved in order and each one's picks are excluded from the
    /// slots after it. A slot with no candidates or no solution is left
    /// empty with a warning; only invalid `targets` fail the build.
    pub fn build_day<R: Rng + ?Sized>(
        &self,
        foods: &[FoodItem],
        targets: &NutrientTargets,
        dietary: &DietaryProfile,
        rng: &mut R,
    ) -> Result<DayPlan> {
        targets.validate()?;

        let filtered = filter_by_user(foods, &dietary.allergies, &dietary.conditions);
        let mut meals = SlotMeals::default();
        let mut totals = Nutrients::default();
        let mut warnings = Vec::new();
        let mut used = UsedIdSet::new();

        for spec in &MEAL_SLOTS {
            let (outcome, next_used) = self.plan_slot(spec, &filtered, targets, used, rng);
            used = next_used;

            let items = match outcome {
                SlotOutcome::Planned(items) => items,
                SlotOutcome::EmptyPool => {
                    warn!(slot = %spec.slot, "no candidate foods for slot");
                    warnings.push(format!("{}:{}", WARN_EMPTY_POOL, spec.slot));
                    Vec::new()
                }
                SlotOutcome::Infeasible => {
                    warn!(slot = %spec.slot, "slot could not be solved");
                    warnings.push(format!("{}:{}", WARN_INFEASIBLE, spec.slot));
                    Vec::new()
                }
            };

            for item in &items {
                totals += item.nutrients();
            }
            meals.push(spec.slot, items);
        }

        let plan = DayPlan {
            meals,
            totals: totals.rounded(2),
            warnings,
        };

        info!(
            filled = plan.filled_slots(),
            calories = plan.totals.calories,
            warnings = plan.warnings.len(),
            "built day plan"
        );
        Ok(plan)
    }

    /// Solve one slot, taking the used-id set and handing it back updated.
    pub fn plan_slot<R: Rng + ?Sized>(
        &self,
        spec: &MealSlotSpec,
        foods: &[&FoodItem],
        daily: &NutrientTargets,
        used: UsedIdSet,
        rng: &mut R,
    ) -> (SlotOutcome, UsedIdSet) {
        let pool: Vec<&FoodItem> =
            select_pool(foods, spec.category, self.config.max_candidates, rng)
                .into_iter()
                .filter(|food| !used.contains(&food.id))
                .collect();

        debug!(slot = %spec.slot, candidates = pool.len(), "built slot pool");

        if pool.is_empty() {
            return (SlotOutcome::EmptyPool, used);
        }

        let request = SlotRequest {
            targets: daily.scaled(spec.calorie_fraction),
            min_items: spec.min_items,
            max_items: spec.max_items,
        };

        match solve_slot(
            &pool,
            &request,
            self.backend.as_ref(),
            self.config.solve_time_limit,
        ) {
            Some(items) => {
                let used = used.with_items(&items);
                (SlotOutcome::Planned(items), used)
            }
            None => (SlotOutcome::Infeasible, used),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealSlot;
    use crate::solver::{LinearModel, SolveStatus};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    struct AlwaysInfeasible;

    impl MilpBackend for AlwaysInfeasible {
        fn solve(&self, _model: &LinearModel, _time_limit: Duration) -> SolveStatus {
            SolveStatus::Infeasible
        }
    }

    fn targets() -> NutrientTargets {
        NutrientTargets {
            calories: 2000.0,
            protein_g: 120.0,
            fat_g: 65.0,
            carbs_g: 220.0,
            fiber_g: 28.0,
        }
    }

    fn food(id: &str, name: &str) -> FoodItem {
        FoodItem::new(
            id,
            name,
            Nutrients {
                calories: 150.0,
                protein: 8.0,
                fat: 5.0,
                carbs: 18.0,
                fiber: 3.0,
            },
            100.0,
            "portion",
        )
    }

    #[test]
    fn test_used_id_set_threads_items() {
        let used = UsedIdSet::new();
        let item = SelectedItem {
            id: "42".to_string(),
            name: "Lentil Soup".to_string(),
            portions: 1.0,
            portion_unit: "bowl".to_string(),
            grams: 250.0,
            calories: 230.0,
            protein: 18.0,
            fat: 1.0,
            carbs: 40.0,
            fiber: 15.0,
        };
        let used = used.with_items(&[item]);
        assert!(used.contains("42"));
        assert_eq!(used.len(), 1);
    }

    #[test]
    fn test_excluded_ids_empty_the_pool() {
        let planner = MealPlanner::new(PlannerConfig::default());
        let foods = vec![food("1", "Banana")];
        let refs: Vec<&FoodItem> = foods.iter().collect();
        let used = UsedIdSet::new().with_items(&[SelectedItem {
            id: "1".to_string(),
            name: "Banana".to_string(),
            portions: 1.0,
            portion_unit: "portion".to_string(),
            grams: 100.0,
            calories: 150.0,
            protein: 8.0,
            fat: 5.0,
            carbs: 18.0,
            fiber: 3.0,
        }]);

        let mut rng = StdRng::seed_from_u64(1);
        let (outcome, used) = planner.plan_slot(&MEAL_SLOTS[1], &refs, &targets(), used, &mut rng);
        assert_eq!(outcome, SlotOutcome::EmptyPool);
        assert_eq!(used.len(), 1);
    }

    #[test]
    fn test_infeasible_slots_become_warnings() {
        let planner = MealPlanner::with_backend(PlannerConfig::default(), Arc::new(AlwaysInfeasible));
        let foods = vec![food("1", "Banana"), food("2", "Rice and Beans")];
        let mut rng = StdRng::seed_from_u64(1);

        let plan = planner
            .build_day(&foods, &targets(), &DietaryProfile::default(), &mut rng)
            .unwrap();

        assert_eq!(plan.meals.len(), 5);
        assert_eq!(plan.filled_slots(), 0);
        assert_eq!(
            plan.warnings,
            vec![
                "INFEASIBLE:breakfast",
                "INFEASIBLE:morning-snack",
                "INFEASIBLE:lunch",
                "INFEASIBLE:afternoon-snack",
                "INFEASIBLE:dinner",
            ]
        );
        assert_eq!(plan.totals, Nutrients::default());
        assert_eq!(plan.meals.get(MealSlot::Lunch), Some(&[][..]));
    }

    #[test]
    fn test_invalid_targets_fail_fast() {
        let planner = MealPlanner::with_backend(PlannerConfig::default(), Arc::new(AlwaysInfeasible));
        let mut bad = targets();
        bad.calories = f64::NAN;
        let mut rng = StdRng::seed_from_u64(1);

        let result = planner.build_day(&[], &bad, &DietaryProfile::default(), &mut rng);
        assert!(result.is_err());
    }
}
