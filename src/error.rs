use thiserror::Error;

/// Failure surfaced by the store handle, passed through untouched
pub type StoreError = sqlx::Error;

/// Submitted client data broke one or more field rules
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid client data")]
pub struct ValidationError {
    pub errors: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T, E = ServiceError> = std::result::Result<T, E>;
