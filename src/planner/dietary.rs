use std::sync::LazyLock;

use regex::Regex;
use strsim::jaro_winkler;
use tracing::{debug, warn};

use crate::models::FoodItem;

const NUT_PATTERN: &str = "almond|cashew|walnut|pistachio|pecan|nut";
const DAIRY_PATTERN: &str = "milk|cheese|yogurt|butter|cream|whey|casein";
const SEAFOOD_PATTERN: &str = "fish|shrimp|crab|salmon|tuna|cod|sardine|lobster|tilapia";
const SUGAR_PATTERN: &str = "sugar|soda|candy|cake|sweet|chocolate|syrup|jam";

/// Allergy tags the filter understands.
pub const KNOWN_ALLERGY_TAGS: &[&str] = &[
    "peanut", "nuts", "tree_nut", "dairy", "egg", "seafood", "fish",
];

static ALLERGY_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("peanut", "peanut"),
        ("nuts", NUT_PATTERN),
        ("tree_nut", NUT_PATTERN),
        ("dairy", DAIRY_PATTERN),
        ("egg", "egg"),
        ("seafood", SEAFOOD_PATTERN),
        ("fish", SEAFOOD_PATTERN),
    ]
    .into_iter()
    .filter_map(|(tag, pattern)| Regex::new(pattern).ok().map(|re| (tag, re)))
    .collect()
});

static DIABETES_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(SUGAR_PATTERN).ok());

/// Exclusion pattern for an allergy tag, if the tag is known.
fn allergy_pattern(tag: &str) -> Option<&'static Regex> {
    ALLERGY_PATTERNS
        .iter()
        .find(|(known, _)| *known == tag)
        .map(|(_, re)| re)
}

/// Closest known allergy tag for a misspelled one.
pub fn suggest_allergy_tag(tag: &str) -> Option<&'static str> {
    KNOWN_ALLERGY_TAGS
        .iter()
        .map(|known| (*known, jaro_winkler(known, tag)))
        .filter(|(_, score)| *score > 0.8)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(known, _)| known)
}

/// Remove foods excluded by the user's allergies and conditions.
///
/// Matching is by keyword on the normalized name, so a synonym missing from
/// the patterns above passes. Tags are case-insensitive and unknown allergy
/// tags exclude nothing. Any condition containing "diabetes" also excludes
/// sugary foods. Applying the filter twice gives the same result as
/// applying it once.
pub fn filter_by_user<'a>(
    foods: &'a [FoodItem],
    allergies: &[String],
    conditions: &[String],
) -> Vec<&'a FoodItem> {
    let mut patterns: Vec<&Regex> = Vec::new();

    for tag in allergies.iter().map(|a| a.trim().to_lowercase()) {
        match allergy_pattern(&tag) {
            Some(re) => patterns.push(re),
            None => match suggest_allergy_tag(&tag) {
                Some(guess) => warn!(tag = %tag, "unknown allergy tag, did you mean '{}'?", guess),
                None => warn!(tag = %tag, "unknown allergy tag ignored"),
            },
        }
    }

    let diabetic = conditions
        .iter()
        .any(|c| c.to_lowercase().contains("diabetes"));
    if diabetic {
        if let Some(re) = DIABETES_PATTERN.as_ref() {
            patterns.push(re);
        }
    }

    let kept: Vec<&FoodItem> = foods
        .iter()
        .filter(|food| !patterns.iter().any(|re| re.is_match(&food.name_norm)))
        .collect();

    debug!(
        before = foods.len(),
        after = kept.len(),
        "applied dietary filter"
    );
    kept
}
