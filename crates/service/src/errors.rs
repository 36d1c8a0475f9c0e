use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error(transparent)]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i32) -> Self { Self::NotFound(format!("{} not found with id: {}", entity, id)) }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        // constraint races that slipped past the service pre-checks
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Self::Validation("A record with the same unique value already exists".into())
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                Self::Validation("Referenced department does not exist".into())
            }
            _ => Self::Db(e.to_string()),
        }
    }
}
