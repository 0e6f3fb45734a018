use thiserror::Error;

#[derive(Debug, Error)]
pub enum PotError {
    #[error("Ingredient not found: {name}{}", suggestion_suffix(.suggestion))]
    IngredientNotFound {
        name: String,
        suggestion: Option<String>,
    },

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

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, PotError>;
