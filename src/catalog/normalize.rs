use tracing::{debug, info};

use crate::catalog::schema::{CatalogField, SchemaMapping};
use crate::error::Result;
use crate::models::{FoodItem, Nutrients};
use crate::planner::constants::{
    DEFAULT_GRAMS_PER_PORTION, DEFAULT_PORTION_UNIT, NUTRIENT_CEILINGS,
};

/// Integers above this are not exact in an `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single cell as read from a catalog source.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Missing,
    Text(String),
    Number(f64),
}

impl RawCell {
    /// Numeric value, if the cell holds a finite number or parses as one.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            RawCell::Missing => return None,
            RawCell::Number(n) => *n,
            RawCell::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Non-blank text form of the cell.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawCell::Missing => None,
            RawCell::Number(n) if !n.is_finite() => None,
            RawCell::Number(n) if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER => {
                Some(format!("{}", *n as i64))
            }
            RawCell::Number(n) => Some(n.to_string()),
            RawCell::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }
}

/// An uncleaned food table: column headers plus rows of cells.
///
/// Rows shorter than the header are padded with [`RawCell::Missing`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCatalog {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

impl RawCatalog {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<RawCell>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Why a row was left out of the cleaned catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    MissingField(CatalogField),
    Negative,
    NonPositive,
}

/// Clean a raw table into bounded [`FoodItem`]s.
///
/// Data defects are repaired or the row is dropped; only an unresolvable
/// schema is an error. Output order follows input order.
pub fn normalize_catalog(raw: &RawCatalog) -> Result<Vec<FoodItem>> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let mapping = SchemaMapping::resolve(&raw.headers)?;
    let mut foods = Vec::with_capacity(raw.rows.len());
    let mut rejected = 0usize;

    for (index, row) in raw.rows.iter().enumerate() {
        match normalize_row(index, row, &mapping) {
            Ok(food) => foods.push(food),
            Err(reason) => {
                rejected += 1;
                debug!(row = index, ?reason, "dropped catalog row");
            }
        }
    }

    info!(
        kept = foods.len(),
        dropped = rejected,
        "normalized food catalog"
    );
    Ok(foods)
}

static MISSING: RawCell = RawCell::Missing;

fn cell<'a>(row: &'a [RawCell], mapping: &SchemaMapping, field: CatalogField) -> &'a RawCell {
    mapping
        .column(field)
        .and_then(|c| row.get(c))
        .unwrap_or(&MISSING)
}

fn normalize_row(
    index: usize,
    row: &[RawCell],
    mapping: &SchemaMapping,
) -> std::result::Result<FoodItem, Rejection> {
    let at = |field: CatalogField| cell(row, mapping, field);
    let required = |field: CatalogField| -> std::result::Result<f64, Rejection> {
        at(field)
            .as_number()
            .ok_or(Rejection::MissingField(field))
    };

    let name = at(CatalogField::Name)
        .as_text()
        .ok_or(Rejection::MissingField(CatalogField::Name))?;
    let calories = required(CatalogField::Calories)?;
    let protein = required(CatalogField::Protein)?;
    let fat = required(CatalogField::Fat)?;
    let carbs = required(CatalogField::Carbs)?;

    let grams_per_portion = match mapping.column(CatalogField::GramsPerPortion) {
        Some(_) => required(CatalogField::GramsPerPortion)?,
        None => DEFAULT_GRAMS_PER_PORTION,
    };
    let fiber = at(CatalogField::Fiber).as_number().unwrap_or(0.0);

    if [calories, protein, fat, carbs, fiber, grams_per_portion]
        .iter()
        .any(|&v| v < 0.0)
    {
        return Err(Rejection::Negative);
    }

    let per_100g = Nutrients {
        calories: calories.min(NUTRIENT_CEILINGS.calories),
        protein: protein.min(NUTRIENT_CEILINGS.protein),
        fat: fat.min(NUTRIENT_CEILINGS.fat),
        carbs: carbs.min(NUTRIENT_CEILINGS.carbs),
        fiber: fiber.min(NUTRIENT_CEILINGS.fiber),
    };

    if per_100g.calories <= 0.0 || grams_per_portion <= 0.0 {
        return Err(Rejection::NonPositive);
    }

    let id = at(CatalogField::Id)
        .as_text()
        .unwrap_or_else(|| index.to_string());
    let portion_unit = at(CatalogField::PortionUnit)
        .as_text()
        .unwrap_or_else(|| DEFAULT_PORTION_UNIT.to_string());

    Ok(FoodItem::new(id, name, per_100g, grams_per_portion, portion_unit))
}
