use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("{0}")]
    Validation(String),
    #[error("{field} must not exceed {max} characters")]
    TooLong { field: &'static str, max: usize },
}
