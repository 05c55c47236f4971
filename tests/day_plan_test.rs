use std::collections::HashSet;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use meal_slot_planner::catalog::{RawCatalog, RawCell, normalize_catalog};
use meal_slot_planner::error::PlanError;
use meal_slot_planner::models::{FoodItem, MealSlot, NutrientTargets, Nutrients};
use meal_slot_planner::planner::{
    CALORIE_BAND_HIGH, CALORIE_BAND_LOW, DietaryProfile, MEAL_SLOTS, MealPlanner, PlannerConfig,
    filter_by_user, select_pool,
};

fn targets() -> NutrientTargets {
    NutrientTargets {
        calories: 2000.0,
        protein_g: 120.0,
        fat_g: 65.0,
        carbs_g: 220.0,
        fiber_g: 28.0,
    }
}

fn planner() -> MealPlanner {
    MealPlanner::new(PlannerConfig {
        solve_time_limit: Duration::from_secs(5),
        seed: Some(42),
        ..PlannerConfig::default()
    })
}

fn sample_catalog() -> Vec<FoodItem> {
    let mut raw = RawCatalog::new(
        [
            "name",
            "calories",
            "protein",
            "fat",
            "carbs",
            "fiber",
            "grams_per_portion",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect(),
    );
    for i in 0..100 {
        let i = i as f64;
        raw.push_row(vec![
            RawCell::Text(format!("Sample Food {}", i)),
            RawCell::Number(10.0 * i),
            RawCell::Number(0.5 * i),
            RawCell::Number(0.3 * i),
            RawCell::Number(0.8 * i),
            RawCell::Number(0.1 * i),
            RawCell::Number(100.0),
        ]);
    }
    normalize_catalog(&raw).unwrap()
}

fn food(id: &str, name: &str, calories: f64, protein: f64, fat: f64, carbs: f64, fiber: f64) -> FoodItem {
    FoodItem::new(
        id,
        name,
        Nutrients {
            calories,
            protein,
            fat,
            carbs,
            fiber,
        },
        100.0,
        "portion",
    )
}

fn mixed_catalog() -> Vec<FoodItem> {
    vec![
        food("1", "Whole Milk", 61.0, 3.2, 3.3, 4.8, 0.0),
        food("2", "Plain Yogurt", 63.0, 5.3, 1.6, 7.0, 0.0),
        food("3", "Cheddar Cheese", 403.0, 25.0, 33.0, 1.3, 0.0),
        food("4", "Rolled Oats", 379.0, 13.2, 6.5, 67.7, 10.1),
        food("5", "Boiled Egg", 155.0, 12.6, 10.6, 1.1, 0.0),
        food("6", "Banana", 89.0, 1.1, 0.3, 22.8, 2.6),
        food("7", "Apple", 52.0, 0.3, 0.2, 13.8, 2.4),
        food("8", "Whole Wheat Bread", 247.0, 13.0, 3.4, 41.0, 7.0),
        food("9", "Brown Rice", 123.0, 2.7, 1.0, 25.6, 1.8),
        food("10", "Lentil Curry", 116.0, 9.0, 0.4, 20.0, 7.9),
        food("11", "Grilled Chicken Breast", 165.0, 31.0, 3.6, 0.0, 0.0),
        food("12", "Black Bean Stew", 132.0, 8.9, 0.5, 23.7, 8.7),
        food("13", "Steamed Broccoli", 35.0, 2.4, 0.4, 7.2, 3.3),
        food("14", "Baked Potato", 93.0, 2.5, 0.1, 21.2, 2.2),
        food("15", "Tofu Stir Fry", 144.0, 15.0, 8.0, 4.0, 2.3),
        food("16", "Baked Salmon", 206.0, 22.0, 12.0, 0.0, 0.0),
        food("17", "Chickpea Salad", 164.0, 8.9, 2.6, 27.4, 7.6),
        food("18", "Mixed Berry Bowl", 57.0, 0.7, 0.3, 14.5, 2.4),
        food("19", "Almond Handful", 579.0, 21.2, 49.9, 21.6, 12.5),
        food("20", "Orange", 47.0, 0.9, 0.1, 11.8, 2.4),
        food("21", "Spinach Dal", 120.0, 7.5, 3.0, 16.0, 6.0),
        food("22", "Mushroom Rice", 140.0, 3.5, 2.5, 26.0, 1.5),
    ]
}

#[test]
fn test_synthetic_catalog_day() {
    let foods = sample_catalog();
    // "Sample Food 0" has no calories and is dropped
    assert_eq!(foods.len(), 99);

    let breakfast = &MEAL_SLOTS[0];
    assert_eq!(breakfast.slot, MealSlot::Breakfast);
    assert_eq!(targets().scaled(breakfast.calorie_fraction).calories, 500.0);

    let mut rng = StdRng::seed_from_u64(7);
    let plan = planner()
        .build_day(&foods, &targets(), &DietaryProfile::default(), &mut rng)
        .unwrap();

    assert_eq!(plan.meals.len(), 5);
    assert!(plan.totals.calories > 0.0 || !plan.warnings.is_empty());

    let items = plan.meals.get(MealSlot::Breakfast).expect("breakfast slot");
    assert!(
        (breakfast.min_items..=breakfast.max_items).contains(&items.len()),
        "breakfast has {} items, warnings {:?}",
        items.len(),
        plan.warnings
    );
    assert!(!plan.warnings.iter().any(|w| w.ends_with(":breakfast")));

    let calories: f64 = items.iter().map(|i| i.calories).sum();
    // item calories are rounded to 0.1 each
    assert!(calories >= 500.0 * CALORIE_BAND_LOW - 0.5, "{}", calories);
    assert!(calories <= 500.0 * CALORIE_BAND_HIGH + 0.5, "{}", calories);
}

#[test]
fn test_synthetic_catalog_counts_across_seeds() {
    let foods = sample_catalog();
    let planner = MealPlanner::new(PlannerConfig {
        solve_time_limit: Duration::from_secs(1),
        ..PlannerConfig::default()
    });

    for seed in 1..=3 {
        let mut rng = StdRng::seed_from_u64(seed);
        let plan = planner
            .build_day(&foods, &targets(), &DietaryProfile::default(), &mut rng)
            .unwrap();

        assert!(plan.filled_slots() > 0, "seed {}: {:?}", seed, plan.warnings);
        for spec in &MEAL_SLOTS {
            let items = plan.meals.get(spec.slot).unwrap_or(&[]);
            if items.is_empty() {
                continue;
            }
            assert!(
                (spec.min_items..=spec.max_items).contains(&items.len()),
                "seed {}: {} has {} items",
                seed,
                spec.slot,
                items.len()
            );
            assert!(items.iter().all(|i| i.portions >= 0.01));
        }
    }
}

#[test]
fn test_dairy_allergy_clears_every_pool() {
    let foods = mixed_catalog();
    let dairy = ["Whole Milk", "Plain Yogurt", "Cheddar Cheese"];
    let allergies = vec!["dairy".to_string()];

    let filtered = filter_by_user(&foods, &allergies, &[]);
    assert!(filtered.iter().all(|f| !dairy.contains(&f.name.as_str())));

    let mut rng = StdRng::seed_from_u64(3);
    for spec in &MEAL_SLOTS {
        let pool = select_pool(&filtered, spec.category, 250, &mut rng);
        assert!(pool.iter().all(|f| !dairy.contains(&f.name.as_str())));
    }

    let dietary = DietaryProfile {
        allergies,
        conditions: vec![],
    };
    let plan = planner()
        .build_day(&foods, &targets(), &dietary, &mut rng)
        .unwrap();
    assert!(plan.meals.all_items().all(|i| !dairy.contains(&i.name.as_str())));
}

#[test]
fn test_empty_catalog_gives_empty_slots() {
    let mut rng = StdRng::seed_from_u64(1);
    let plan = planner()
        .build_day(&[], &targets(), &DietaryProfile::default(), &mut rng)
        .unwrap();

    assert_eq!(plan.meals.len(), 5);
    assert_eq!(plan.filled_slots(), 0);
    assert_eq!(
        plan.warnings,
        vec![
            "EMPTY_POOL:breakfast",
            "EMPTY_POOL:morning-snack",
            "EMPTY_POOL:lunch",
            "EMPTY_POOL:afternoon-snack",
            "EMPTY_POOL:dinner",
        ]
    );
    assert_eq!(plan.totals, Nutrients::default());

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["totals"]["calories"], 0.0);
    assert_eq!(json["meals"]["lunch"], serde_json::json!([]));
}

#[test]
fn test_no_food_repeats_within_a_day() {
    let foods = mixed_catalog();
    let mut rng = StdRng::seed_from_u64(11);
    let plan = planner()
        .build_day(&foods, &targets(), &DietaryProfile::default(), &mut rng)
        .unwrap();

    let mut seen = HashSet::new();
    for item in plan.meals.all_items() {
        assert!(seen.insert(item.id.clone()), "{} placed twice", item.name);
    }
}

#[test]
fn test_totals_are_the_item_sum() {
    let foods = mixed_catalog();
    let mut rng = StdRng::seed_from_u64(5);
    let plan = planner()
        .build_day(&foods, &targets(), &DietaryProfile::default(), &mut rng)
        .unwrap();

    let mut sum = Nutrients::default();
    for item in plan.meals.all_items() {
        sum += item.nutrients();
    }
    assert_eq!(plan.totals, sum.rounded(2));
}

#[test]
fn test_solved_slots_respect_band_and_count() {
    let foods = mixed_catalog();
    let mut rng = StdRng::seed_from_u64(9);
    let plan = planner()
        .build_day(&foods, &targets(), &DietaryProfile::default(), &mut rng)
        .unwrap();

    for spec in &MEAL_SLOTS {
        let items = plan.meals.get(spec.slot).unwrap_or(&[]);
        if items.is_empty() {
            assert!(plan.warnings.iter().any(|w| w.ends_with(spec.slot.as_str())));
            continue;
        }
        let target = 2000.0 * spec.calorie_fraction;
        let calories: f64 = items.iter().map(|i| i.calories).sum();
        assert!(calories >= target * CALORIE_BAND_LOW - 0.5, "{} too low", spec.slot);
        assert!(calories <= target * CALORIE_BAND_HIGH + 0.5, "{} too high", spec.slot);
        assert!(
            (spec.min_items..=spec.max_items).contains(&items.len()),
            "{} has {} items",
            spec.slot,
            items.len()
        );
    }
}

#[test]
fn test_invalid_targets_fail_before_planning() {
    let mut bad = targets();
    bad.fiber_g = -5.0;
    let mut rng = StdRng::seed_from_u64(1);

    let err = planner()
        .build_day(&mixed_catalog(), &bad, &DietaryProfile::default(), &mut rng)
        .unwrap_err();
    assert!(matches!(err, PlanError::InvalidTarget { field: "fiber_g", .. }));
}
