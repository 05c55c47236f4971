use crate::models::FoodItem;

/// Foods whose name contains `search` (case-insensitive), in catalog order,
/// at most `limit` of them. A missing or blank search matches everything.
pub fn search_foods<'a>(
    foods: &'a [FoodItem],
    search: Option<&str>,
    limit: usize,
) -> Vec<&'a FoodItem> {
    let needle = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    foods
        .iter()
        .filter(|food| needle.as_deref().is_none_or(|n| food.name_norm.contains(n)))
        .take(limit)
        .collect()
}
