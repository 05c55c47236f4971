use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Missing nutrient target: {0}")]
    MissingTarget(&'static str),

    #[error("Invalid nutrient target {field}: {value}")]
    InvalidTarget { field: &'static str, value: String },

    #[error("Catalog schema error: {0}")]
    Schema(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
