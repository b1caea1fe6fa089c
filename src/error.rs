use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Saved plan not found: {0}")]
    PlanNotFound(String),

    #[error("Plan name cannot be empty")]
    EmptyPlanName,

    #[error("Unknown meal slot: {0} (expected breakfast, lunch, snacks or dinner)")]
    UnknownSlot(String),

    #[error("Unknown goal field: {0} (expected calories, protein, carbs or fat)")]
    UnknownGoalField(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
