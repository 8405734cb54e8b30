//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! Store-specific errors are classified into this taxonomy at the repository
//! boundary (see `infrastructure::store_errors`).

/// The six failure kinds every operation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    Unknown,
    InvalidEntity,
    InvalidField,
    InvalidSqlRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// No row matched the identifier or natural key
    #[error("Entity not found")]
    NotFound,
    /// A unique key (identifier, email, course name) collided
    #[error("Entity already exists")]
    AlreadyExists,
    /// Anything the store reported that is not one of the above
    #[error("Unknown error: {0}")]
    Unknown(String),
    #[error("Invalid entity: {0}")]
    InvalidEntity(String),
    #[error("Invalid field: {0}")]
    InvalidField(String),
    /// Misuse of the transaction lifecycle
    #[error("Invalid SQL request: {0}")]
    InvalidSqlRequest(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NotFound => ErrorKind::NotFound,
            DomainError::AlreadyExists => ErrorKind::AlreadyExists,
            DomainError::Unknown(_) => ErrorKind::Unknown,
            DomainError::InvalidEntity(_) => ErrorKind::InvalidEntity,
            DomainError::InvalidField(_) => ErrorKind::InvalidField,
            DomainError::InvalidSqlRequest(_) => ErrorKind::InvalidSqlRequest,
        }
    }

    /// Whether the failure was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::NotFound
                | ErrorKind::AlreadyExists
                | ErrorKind::InvalidEntity
                | ErrorKind::InvalidField
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_the_request_side_kinds() {
        assert!(DomainError::NotFound.is_client_error());
        assert!(DomainError::AlreadyExists.is_client_error());
        assert!(DomainError::InvalidField("name".into()).is_client_error());
        assert!(DomainError::InvalidEntity("course".into()).is_client_error());
        assert!(!DomainError::Unknown("boom".into()).is_client_error());
        assert!(!DomainError::InvalidSqlRequest("no txn".into()).is_client_error());
    }

    #[test]
    fn messages_stay_short() {
        assert_eq!(DomainError::NotFound.to_string(), "Entity not found");
        assert_eq!(DomainError::AlreadyExists.to_string(), "Entity already exists");
    }
}
