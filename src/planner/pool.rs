use rand::Rng;
use tracing::debug;

use crate::models::{FoodItem, PoolCategory};
use crate::planner::constants::{
    BLACKLIST, POOL_FIBER_WEIGHT, POOL_PROTEIN_WEIGHT, POOL_RANDOM_WEIGHT, category_rules,
};

/// Build the candidate pool for one slot category.
///
/// 1. Drop blacklisted processed forms and the category's blocked foods
/// 2. Keep foods matching an allow keyword, or everything left if none do
/// 3. Trim to `max_candidates` by a nutrient score with a random component
///
/// The random draw comes from `rng`, so a seeded generator reproduces the
/// same pool.
pub fn select_pool<'a, R: Rng + ?Sized>(
    foods: &[&'a FoodItem],
    category: PoolCategory,
    max_candidates: usize,
    rng: &mut R,
) -> Vec<&'a FoodItem> {
    let rules = category_rules(category);

    let allowed: Vec<&'a FoodItem> = foods
        .iter()
        .copied()
        .filter(|food| !BLACKLIST.iter().any(|kw| food.mentions(kw)))
        .filter(|food| !rules.blocked.iter().any(|kw| food.mentions(kw)))
        .collect();

    let strict: Vec<&'a FoodItem> = allowed
        .iter()
        .copied()
        .filter(|food| rules.keywords.iter().any(|kw| food.mentions(kw)))
        .collect();

    let candidates = if strict.is_empty() {
        debug!(?category, "no keyword matches, falling back to all allowed foods");
        allowed
    } else {
        strict
    };

    if candidates.len() <= max_candidates {
        return candidates;
    }

    cap_candidates(candidates, max_candidates, rng)
}

/// Keep the `max` best-scoring foods, highest score first.
fn cap_candidates<'a, R: Rng + ?Sized>(
    candidates: Vec<&'a FoodItem>,
    max: usize,
    rng: &mut R,
) -> Vec<&'a FoodItem> {
    let mut scored: Vec<(f64, &'a FoodItem)> = candidates
        .into_iter()
        .map(|food| {
            let noise: f64 = rng.gen_range(0.0..1.0);
            let score = POOL_PROTEIN_WEIGHT * food.protein_density()
                + POOL_FIBER_WEIGHT * food.fiber_density()
                + POOL_RANDOM_WEIGHT * noise;
            (score, food)
        })
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(max);
    scored.into_iter().map(|(_, food)| food).collect()
}
