use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::models::NutrientTargets;

/// Load daily targets from a JSON file.
///
/// Accepts either a bare targets object or a saved profile document, in
/// which case its `targets` member is used.
pub fn load_targets<P: AsRef<Path>>(path: P) -> Result<NutrientTargets> {
    let content = fs::read_to_string(path.as_ref())?;
    let value: Value = serde_json::from_str(&content)?;

    let targets = match value.get("targets") {
        Some(inner) => NutrientTargets::from_value(inner)?,
        None => NutrientTargets::from_value(&value)?,
    };

    debug!(path = %path.as_ref().display(), calories = targets.calories, "loaded targets");
    Ok(targets)
}

/// Write any plan or profile as pretty-printed JSON.
pub fn save_json<P: AsRef<Path>, T: Serialize + ?Sized>(path: P, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path.as_ref(), json)?;
    debug!(path = %path.as_ref().display(), "saved json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_bare_targets() {
        let json = r#"{"calories": 2000, "protein_g": 120, "fat_g": 65, "carbs_g": 220, "fiber_g": 28}"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let targets = load_targets(file.path()).unwrap();
        assert_eq!(targets.calories, 2000.0);
        assert_eq!(targets.fiber_g, 28.0);
    }

    #[test]
    fn test_load_targets_from_profile_document() {
        let json = r#"{
            "inputs": {"age": 30},
            "metrics": {"bmi": 24.7},
            "targets": {"calories_kcal": 1800, "protein_g": 100, "fat_g": 60, "carbs_g": 200, "fiber_g": 30}
        }"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let targets = load_targets(file.path()).unwrap();
        assert_eq!(targets.calories, 1800.0);
        assert_eq!(targets.protein_g, 100.0);
    }

    #[test]
    fn test_load_targets_missing_field() {
        let json = r#"{"calories": 2000, "protein_g": 120, "fat_g": 65, "carbs_g": 220}"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let err = load_targets(file.path()).unwrap_err();
        assert!(matches!(err, PlanError::MissingTarget("fiber_g")));
    }

    #[test]
    fn test_save_and_reload() {
        let targets = NutrientTargets {
            calories: 2100.0,
            protein_g: 110.0,
            fat_g: 70.0,
            carbs_g: 240.0,
            fiber_g: 30.0,
        };
        let out = NamedTempFile::new().unwrap();
        save_json(out.path(), &targets).unwrap();

        let reloaded = load_targets(out.path()).unwrap();
        assert_eq!(reloaded, targets);
    }
}
