use thiserror::Error;

/// Application-wide error types for Campus.
#[derive(Error, Debug)]
pub enum AppError {
    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request collides with existing state (duplicate email, double
    /// enrollment, repeated submission, ...).
    #[error("{0}")]
    Conflict(String),

    /// The request payload is malformed or violates a domain rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Standard not-found message, e.g. `Course not found: ID=7`.
    pub fn not_found(entity: &str, id: i64) -> Self {
        AppError::NotFound(format!("{} not found: ID={}", entity, id))
    }

    /// Returns true if the client can fix this error by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_) | AppError::Conflict(_) | AppError::Validation(_)
        )
    }
}
