use common::types::FieldError;
use models::errors::ModelError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("validation failed on {} field(s)", .0.len())]
    Fields(Vec<FieldError>),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn field(field: &str, message: &str) -> Self {
        Self::Fields(vec![FieldError::new(field, message)])
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::Fields(errs) => Self::Fields(errs),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        if matches!(e, DbErr::RecordNotUpdated) {
            return Self::NotFound("record not found".into());
        }
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict("record already exists".into()),
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                Self::Conflict("record is still referenced by other records".into())
            }
            _ => Self::Db(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_field_errors_are_preserved() {
        let err: ServiceError = ModelError::Fields(vec![FieldError::new("cnic", "bad")]).into();
        match err {
            ServiceError::Fields(f) => assert_eq!(f[0].field, "cnic"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn plain_db_errors_map_to_db() {
        let err: ServiceError = DbErr::Custom("boom".into()).into();
        assert!(matches!(err, ServiceError::Db(_)));
    }
}
