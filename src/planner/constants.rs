use std::time::Duration;

use crate::models::{MealSlot, MealSlotSpec, Nutrients, PoolCategory};

// ─────────────────────────────────────────────────────────────────────────────
// Catalog bounds
// ─────────────────────────────────────────────────────────────────────────────

/// Per-100g ceilings. Larger source values are clamped to these.
pub const NUTRIENT_CEILINGS: Nutrients = Nutrients {
    calories: 900.0,
    protein: 100.0,
    fat: 100.0,
    carbs: 120.0,
    fiber: 80.0,
};

/// Portion size assumed when the catalog has no portion column.
pub const DEFAULT_GRAMS_PER_PORTION: f64 = 100.0;

/// Portion unit assumed when the catalog has no unit column.
pub const DEFAULT_PORTION_UNIT: &str = "portion";

// ─────────────────────────────────────────────────────────────────────────────
// Day layout
// ─────────────────────────────────────────────────────────────────────────────

/// Slots in planning order. Calorie fractions sum to 1.0.
pub const MEAL_SLOTS: [MealSlotSpec; 5] = [
    MealSlotSpec {
        slot: MealSlot::Breakfast,
        calorie_fraction: 0.25,
        min_items: 2,
        max_items: 3,
        category: PoolCategory::Breakfast,
    },
    MealSlotSpec {
        slot: MealSlot::MorningSnack,
        calorie_fraction: 0.10,
        min_items: 1,
        max_items: 2,
        category: PoolCategory::Snack,
    },
    MealSlotSpec {
        slot: MealSlot::Lunch,
        calorie_fraction: 0.30,
        min_items: 2,
        max_items: 4,
        category: PoolCategory::Lunch,
    },
    MealSlotSpec {
        slot: MealSlot::AfternoonSnack,
        calorie_fraction: 0.10,
        min_items: 1,
        max_items: 2,
        category: PoolCategory::Snack,
    },
    MealSlotSpec {
        slot: MealSlot::Dinner,
        calorie_fraction: 0.25,
        min_items: 2,
        max_items: 4,
        category: PoolCategory::Dinner,
    },
];

// ─────────────────────────────────────────────────────────────────────────────
// Candidate pools
// ─────────────────────────────────────────────────────────────────────────────

/// Upper bound on foods handed to the optimizer for one slot.
pub const DEFAULT_MAX_CANDIDATES: usize = 250;

/// Processed or non-wholesome forms excluded from every slot.
pub const BLACKLIST: &[&str] = &[
    "dried",
    "powder",
    "flakes",
    "dehydrated",
    "concentrate",
    "instant",
    "seasoning",
    "bouillon",
    "broth, dry",
    "whipped",
    "imitation",
    "analog",
    "textured",
    "extract",
    "condensed",
    "evaporated",
];

/// Score weights for trimming an oversized pool.
pub const POOL_PROTEIN_WEIGHT: f64 = 0.35;
pub const POOL_FIBER_WEIGHT: f64 = 0.25;
pub const POOL_RANDOM_WEIGHT: f64 = 0.40;

/// Allow and block keyword lists for one pool category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRules {
    pub keywords: &'static [&'static str],
    pub blocked: &'static [&'static str],
}

const BREAKFAST_RULES: CategoryRules = CategoryRules {
    keywords: &[
        "oat", "egg", "milk", "cereal", "banana", "yogurt", "toast", "pancake", "rice", "bread",
        "orange", "apple",
    ],
    blocked: &[
        "fish", "beef", "chicken", "pork", "shrimp", "tuna", "salmon", "mutton", "lamb",
        "devilfish", "winged",
    ],
};

const SNACK_RULES: CategoryRules = CategoryRules {
    keywords: &[
        "apple", "banana", "orange", "yogurt", "almond", "biscuit", "bread", "fruit", "tea",
        "coffee", "milk", "grape", "berry", "cookie", "cracker", "nut",
    ],
    blocked: &[
        "fish", "beef", "chicken", "pork", "rice", "curry", "dried", "powder", "condensed",
        "mutton", "devilfish", "winged", "bean", "kidney",
    ],
};

const LUNCH_RULES: CategoryRules = CategoryRules {
    keywords: &[
        "rice", "chicken", "fish", "dal", "lentil", "bean", "vegetable", "egg", "paneer", "tofu",
        "mutton", "shrimp", "potato", "noodle", "pasta", "chickpea",
    ],
    blocked: &[
        "candy", "cake", "sweet", "chocolate", "soda", "syrup", "devilfish", "winged",
    ],
};

const DINNER_RULES: CategoryRules = CategoryRules {
    keywords: &[
        "chicken", "fish", "dal", "lentil", "bean", "egg", "vegetable", "paneer", "tofu", "rice",
        "potato", "mushroom", "broccoli", "spinach", "salmon", "chickpea",
    ],
    blocked: &[
        "candy", "cake", "sweet", "chocolate", "soda", "syrup", "devilfish", "winged",
    ],
};

/// Keyword rules for a pool category.
pub fn category_rules(category: PoolCategory) -> &'static CategoryRules {
    match category {
        PoolCategory::Breakfast => &BREAKFAST_RULES,
        PoolCategory::Snack => &SNACK_RULES,
        PoolCategory::Lunch => &LUNCH_RULES,
        PoolCategory::Dinner => &DINNER_RULES,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Slot optimization
// ─────────────────────────────────────────────────────────────────────────────

/// Largest portion multiplier a single food may take.
pub const MAX_PORTIONS: f64 = 1.5;

/// Hard calorie band around the slot target.
pub const CALORIE_BAND_LOW: f64 = 0.90;
pub const CALORIE_BAND_HIGH: f64 = 1.10;

/// Fraction of the fiber target that must be met outright.
pub const FIBER_FLOOR_FRACTION: f64 = 0.30;

/// Deviation weights. Protein matters most, fat is the most flexible.
pub const CALORIE_WEIGHT: f64 = 1.0;
pub const CARBS_WEIGHT: f64 = 1.1;
pub const PROTEIN_WEIGHT: f64 = 1.5;
pub const FAT_WEIGHT: f64 = 0.7;
pub const FIBER_WEIGHT: f64 = 1.0;

/// Smallest portion a selected food may take. Smaller values are dropped.
pub const MIN_PORTIONS: f64 = 0.01;

/// Solver round-off allowed below `MIN_PORTIONS`.
pub const PORTION_TOLERANCE: f64 = 1e-6;

/// Wall-clock budget for one slot solve.
pub const DEFAULT_SOLVE_TIME_LIMIT: Duration = Duration::from_secs(10);

// ─────────────────────────────────────────────────────────────────────────────
// Warning tags
// ─────────────────────────────────────────────────────────────────────────────

pub const WARN_EMPTY_POOL: &str = "EMPTY_POOL";
pub const WARN_INFEASIBLE: &str = "INFEASIBLE";
