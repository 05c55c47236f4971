use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::{NutrientTargets, round_to};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Lightly,
    #[default]
    Moderate,
    Very,
    Athlete,
}

impl ActivityLevel {
    /// TDEE multiplier applied to BMR.
    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Lightly => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Very => 1.725,
            ActivityLevel::Athlete => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Goal {
    #[default]
    Maintain,
    #[serde(alias = "fat_loss", alias = "loss")]
    #[value(alias = "fat_loss", alias = "loss")]
    WeightLoss,
    #[serde(alias = "gain", alias = "bulking")]
    #[value(alias = "gain", alias = "bulking")]
    MuscleGain,
    #[serde(alias = "disease_control")]
    #[value(alias = "disease_control")]
    DiabetesControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Intensity {
    Mild,
    #[default]
    Standard,
    Aggressive,
}

/// Everything the calculator needs about a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInputs {
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default)]
    pub activity: ActivityLevel,
    #[serde(default)]
    pub goal: Goal,
    #[serde(default)]
    pub intensity: Intensity,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl ProfileInputs {
    pub fn has_diabetes(&self) -> bool {
        self.conditions
            .iter()
            .any(|c| c.to_lowercase().contains("diabetes"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileMetrics {
    pub bmi: f64,
    pub bmr_kcal: f64,
    pub tdee_kcal: f64,
}

/// `{inputs, metrics, targets}` document handed to the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub inputs: ProfileInputs,
    pub metrics: ProfileMetrics,
    pub targets: NutrientTargets,
}

/// Compute daily targets with Mifflin-St Jeor BMR and an activity factor,
/// adjusted for the goal.
pub fn build_profile(inputs: ProfileInputs) -> Result<Profile> {
    if inputs.age == 0 || inputs.height_cm <= 0.0 || inputs.weight_kg <= 0.0 {
        return Err(PlanError::InvalidInput(
            "age, height and weight must be positive".to_string(),
        ));
    }
    if !inputs.height_cm.is_finite() || !inputs.weight_kg.is_finite() {
        return Err(PlanError::InvalidInput(
            "height and weight must be finite".to_string(),
        ));
    }

    let weight = inputs.weight_kg;
    let bmi = weight / (inputs.height_cm / 100.0).powi(2);
    let base = 10.0 * weight + 6.25 * inputs.height_cm - 5.0 * inputs.age as f64;
    let bmr = match inputs.gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    };
    let tdee = bmr * inputs.activity.factor();

    let calories = match inputs.goal {
        Goal::WeightLoss => {
            let deficit = match inputs.intensity {
                Intensity::Mild => 0.15,
                Intensity::Standard => 0.20,
                Intensity::Aggressive => 0.25,
            };
            tdee * (1.0 - deficit)
        }
        Goal::MuscleGain => {
            let surplus = match inputs.intensity {
                Intensity::Mild => 0.05,
                Intensity::Standard => 0.10,
                Intensity::Aggressive => 0.15,
            };
            tdee * (1.0 + surplus)
        }
        Goal::DiabetesControl => tdee * 0.95,
        Goal::Maintain => tdee,
    };

    let (mut protein_per_kg, mut fat_ratio) = match inputs.goal {
        Goal::MuscleGain => (1.8, 0.25),
        Goal::WeightLoss => (1.6, 0.30),
        _ => (1.4, 0.28),
    };

    let diabetic = inputs.has_diabetes();
    if diabetic {
        protein_per_kg = f64::max(protein_per_kg, 1.6);
        fat_ratio = f64::max(fat_ratio, 0.30);
    }

    let protein_g = protein_per_kg * weight;
    let fat_g = calories * fat_ratio / 9.0;
    let carbs_g = ((calories - protein_g * 4.0 - fat_g * 9.0) / 4.0).max(0.0);
    let fiber_g = if calories < 2200.0 || diabetic { 30.0 } else { 25.0 };

    Ok(Profile {
        metrics: ProfileMetrics {
            bmi: round_to(bmi, 2),
            bmr_kcal: round_to(bmr, 1),
            tdee_kcal: round_to(tdee, 1),
        },
        targets: NutrientTargets {
            calories: round_to(calories, 1),
            protein_g: round_to(protein_g, 1),
            fat_g: round_to(fat_g, 1),
            carbs_g: round_to(carbs_g, 1),
            fiber_g: round_to(fiber_g, 1),
        },
        inputs,
    })
}
