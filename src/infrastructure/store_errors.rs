//! Classification of SeaORM errors into the domain taxonomy

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

/// The finite set of conditions a store backend can signal.
#[derive(Debug)]
pub enum StoreFailure {
    NotFound,
    UniqueViolation,
    Other(DbErr),
}

impl StoreFailure {
    /// Backends report uniqueness violations through driver codes
    /// (SQLite 2067/1555, Postgres 23505), which `DbErr::sql_err` normalises.
    pub fn classify(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => StoreFailure::NotFound,
            other => match other.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => StoreFailure::UniqueViolation,
                _ => StoreFailure::Other(other),
            },
        }
    }
}

impl From<StoreFailure> for DomainError {
    fn from(failure: StoreFailure) -> Self {
        match failure {
            StoreFailure::NotFound => DomainError::NotFound,
            StoreFailure::UniqueViolation => DomainError::AlreadyExists,
            StoreFailure::Other(e) => DomainError::Unknown(e.to_string()),
        }
    }
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        StoreFailure::classify(e).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err: DomainError = DbErr::RecordNotFound("users".to_string()).into();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn record_not_updated_maps_to_not_found() {
        let err: DomainError = DbErr::RecordNotUpdated.into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn unrecognised_store_error_keeps_its_message() {
        let err: DomainError = DbErr::Custom("disk on fire".to_string()).into();
        match err {
            DomainError::Unknown(msg) => assert!(msg.contains("disk on fire")),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn every_store_failure_has_exactly_one_kind() {
        let cases = [
            (StoreFailure::NotFound, ErrorKind::NotFound),
            (StoreFailure::UniqueViolation, ErrorKind::AlreadyExists),
            (
                StoreFailure::Other(DbErr::Custom("x".to_string())),
                ErrorKind::Unknown,
            ),
        ];
        for (failure, expected) in cases {
            // No wildcard: adding a variant must break this test until it is classified.
            match &failure {
                StoreFailure::NotFound | StoreFailure::UniqueViolation | StoreFailure::Other(_) => {}
            }
            assert_eq!(DomainError::from(failure).kind(), expected);
        }
    }
}
