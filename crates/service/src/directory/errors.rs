use thiserror::Error;

/// Failures of the directory backend itself (not "email unknown").
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("repository error: {0}")]
    Repository(String),
}

impl From<models::errors::ModelError> for DirectoryError {
    fn from(e: models::errors::ModelError) -> Self {
        Self::Repository(e.to_string())
    }
}
