use models::errors::{FieldError, ModelError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {}", join(.0))]
    Validation(Vec<FieldError>),
    /// Identifier that cannot be cast to the key type.
    #[error("{0}")]
    InvalidId(String),
    #[error("{0}")]
    NotFound(String),
    /// Store failure; message passed through unchanged.
    #[error("{0}")]
    Db(String),
    /// No store connection was established at startup.
    #[error("database unavailable: {0}")]
    Unavailable(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn invalid_id(raw: &str) -> Self {
        Self::InvalidId(format!(
            "Cast to Uuid failed for value \"{}\" at path \"id\" for model \"Service\"",
            raw
        ))
    }
}

fn join(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}
