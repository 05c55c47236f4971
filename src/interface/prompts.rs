use clap::ValueEnum;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::error::{PlanError, Result};
use crate::planner::{KNOWN_ALLERGY_TAGS, suggest_allergy_tag};
use crate::profile::{ActivityLevel, Gender, Goal, Intensity, ProfileInputs};

/// Prompt for a positive number.
pub fn prompt_positive(prompt: &str, default: &str) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| PlanError::InvalidInput(format!("'{}' is not a number", input.trim())))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(PlanError::InvalidInput(format!(
            "{} must be positive",
            prompt
        )));
    }
    Ok(value)
}

/// Pick one variant of a clap value enum from a list.
pub fn prompt_choice<T: ValueEnum + PartialEq>(prompt: &str, default: &T) -> Result<T> {
    let variants = T::value_variants();
    let names: Vec<String> = variants
        .iter()
        .filter_map(|v| v.to_possible_value())
        .map(|p| p.get_name().to_string())
        .collect();
    let default_index = variants.iter().position(|v| v == default).unwrap_or(0);

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&names)
        .default(default_index)
        .interact()?;

    variants
        .get(selection)
        .cloned()
        .ok_or_else(|| PlanError::InvalidInput(format!("no option at {}", selection)))
}

/// Prompt for allergies: known tags from a list, then free-text extras with
/// a did-you-mean check against the known tags.
pub fn prompt_allergies() -> Result<Vec<String>> {
    let picked = MultiSelect::new()
        .with_prompt("Allergies (space to toggle, enter to confirm)")
        .items(KNOWN_ALLERGY_TAGS)
        .interact()?;

    let mut allergies: Vec<String> = picked
        .into_iter()
        .filter_map(|i| KNOWN_ALLERGY_TAGS.get(i))
        .map(|tag| tag.to_string())
        .collect();

    loop {
        let input: String = Input::new()
            .with_prompt("Other allergy (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let tag = input.trim().to_lowercase();
        if tag.is_empty() {
            break;
        }

        if KNOWN_ALLERGY_TAGS.contains(&tag.as_str()) {
            allergies.push(tag);
            continue;
        }

        match suggest_allergy_tag(&tag) {
            Some(known) => {
                if prompt_yes_no(&format!("Did you mean '{}'?", known), true)? {
                    allergies.push(known.to_string());
                } else {
                    allergies.push(tag);
                }
            }
            None => {
                println!("'{}' is not a known tag and will not exclude any food", tag);
                allergies.push(tag);
            }
        }
    }

    allergies.sort();
    allergies.dedup();
    Ok(allergies)
}

/// Prompt for comma-separated health conditions.
pub fn prompt_conditions() -> Result<Vec<String>> {
    let input: String = Input::new()
        .with_prompt("Health conditions, comma separated (e.g. diabetes)")
        .allow_empty(true)
        .interact_text()?;

    Ok(input
        .split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Collect everything the profile calculator needs.
pub fn collect_profile_inputs() -> Result<ProfileInputs> {
    let age = prompt_positive("Age (years)", "30")?;
    if age.fract() != 0.0 || age > u32::MAX as f64 {
        return Err(PlanError::InvalidInput("age must be a whole number".to_string()));
    }
    let gender = prompt_choice("Gender", &Gender::Male)?;
    let height_cm = prompt_positive("Height (cm)", "170")?;
    let weight_kg = prompt_positive("Weight (kg)", "70")?;
    let activity = prompt_choice("Activity level", &ActivityLevel::default())?;
    let goal = prompt_choice("Goal", &Goal::default())?;
    let intensity = match goal {
        Goal::WeightLoss | Goal::MuscleGain => prompt_choice("Intensity", &Intensity::default())?,
        _ => Intensity::default(),
    };
    let conditions = prompt_conditions()?;
    let allergies = prompt_allergies()?;

    Ok(ProfileInputs {
        age: age as u32,
        gender,
        height_cm,
        weight_kg,
        activity,
        goal,
        intensity,
        conditions,
        allergies,
    })
}
