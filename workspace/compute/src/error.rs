use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Input rejected by a domain rule
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced record or place does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Weather provider failed or answered with something unreadable
    #[error("Weather error: {0}")]
    Weather(String),

    /// A calendar date could not be built
    #[error("Calendar error: {0}")]
    Calendar(String),
}

impl From<reqwest::Error> for ComputeError {
    fn from(error: reqwest::Error) -> Self {
        ComputeError::Weather(error.to_string())
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
