use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PlanError, Result};

/// Daily nutrient targets supplied by the profile calculator.
///
/// The planner treats these as a precondition: a missing, negative or
/// non-finite field fails the build before any slot is solved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientTargets {
    #[serde(alias = "calories_kcal")]
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub fiber_g: f64,
}

impl NutrientTargets {
    /// Read targets from a loosely-typed JSON object, naming the first
    /// missing or malformed field.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| PlanError::InvalidTarget {
            field: "targets",
            value: value.to_string(),
        })?;

        let field = |name: &'static str, aliases: &[&str]| -> Result<f64> {
            let raw = std::iter::once(name)
                .chain(aliases.iter().copied())
                .find_map(|key| object.get(key))
                .ok_or(PlanError::MissingTarget(name))?;
            raw.as_f64().ok_or_else(|| PlanError::InvalidTarget {
                field: name,
                value: raw.to_string(),
            })
        };

        let targets = Self {
            calories: field("calories", &["calories_kcal"])?,
            protein_g: field("protein_g", &[])?,
            fat_g: field("fat_g", &[])?,
            carbs_g: field("carbs_g", &[])?,
            fiber_g: field("fiber_g", &[])?,
        };
        targets.validate()?;
        Ok(targets)
    }

    /// Reject negative or non-finite fields.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(PlanError::InvalidTarget {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Targets for one slot: every field multiplied by the slot's share of
    /// the day.
    pub fn scaled(&self, fraction: f64) -> Self {
        Self {
            calories: self.calories * fraction,
            protein_g: self.protein_g * fraction,
            fat_g: self.fat_g * fraction,
            carbs_g: self.carbs_g * fraction,
            fiber_g: self.fiber_g * fraction,
        }
    }

    fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("calories", self.calories),
            ("protein_g", self.protein_g),
            ("fat_g", self.fat_g),
            ("carbs_g", self.carbs_g),
            ("fiber_g", self.fiber_g),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_accepts_calorie_alias() {
        let targets = NutrientTargets::from_value(&json!({
            "calories_kcal": 1800,
            "protein_g": 100,
            "fat_g": 60,
            "carbs_g": 200,
            "fiber_g": 30
        }))
        .unwrap();
        assert_eq!(targets.calories, 1800.0);
    }

    #[test]
    fn test_from_value_reports_missing_field() {
        let err = NutrientTargets::from_value(&json!({
            "calories": 2000,
            "protein_g": 120,
            "carbs_g": 220,
            "fiber_g": 28
        }))
        .unwrap_err();
        assert!(matches!(err, PlanError::MissingTarget("fat_g")));
    }

    #[test]
    fn test_from_value_rejects_non_numeric() {
        let err = NutrientTargets::from_value(&json!({
            "calories": "lots",
            "protein_g": 120,
            "fat_g": 65,
            "carbs_g": 220,
            "fiber_g": 28
        }))
        .unwrap_err();
        assert!(matches!(err, PlanError::InvalidTarget { field: "calories", .. }));
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        let mut targets = NutrientTargets {
            calories: 2000.0,
            protein_g: 120.0,
            fat_g: 65.0,
            carbs_g: 220.0,
            fiber_g: 28.0,
        };
        assert!(targets.validate().is_ok());

        targets.protein_g = -1.0;
        assert!(targets.validate().is_err());

        targets.protein_g = f64::NAN;
        assert!(targets.validate().is_err());
    }

    #[test]
    fn test_scaled() {
        let targets = NutrientTargets {
            calories: 2000.0,
            protein_g: 120.0,
            fat_g: 65.0,
            carbs_g: 220.0,
            fiber_g: 28.0,
        };
        let breakfast = targets.scaled(0.25);
        assert_eq!(breakfast.calories, 500.0);
        assert_eq!(breakfast.fiber_g, 7.0);
    }
}
