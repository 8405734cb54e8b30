//! Uniform response envelope
//!
//! Success bodies are `{"OK": payload}`, client errors `{"BadRequest": msg}`
//! and server errors `{"Internal": msg}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::domain::DomainError;

#[derive(Debug, Serialize)]
pub struct Success<T> {
    #[serde(rename = "OK")]
    pub ok: T,
}

pub fn ok<T: Serialize>(payload: T) -> Response {
    (StatusCode::OK, Json(Success { ok: payload })).into_response()
}

/// Error returned by handlers, rendered as the error half of the envelope
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "BadRequest": message })),
            )
                .into_response(),
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "Internal": message })),
            )
                .into_response(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => ApiError::BadRequest("Not found".to_string()),
            DomainError::AlreadyExists => ApiError::BadRequest("Already exists".to_string()),
            DomainError::InvalidField(field) => {
                ApiError::BadRequest(format!("Invalid field: {}", field))
            }
            DomainError::InvalidEntity(entity) => {
                ApiError::BadRequest(format!("Invalid entity: {}", entity))
            }
            other => {
                tracing::error!("Request failed: {}", other);
                ApiError::Internal("Unknown error".to_string())
            }
        }
    }
}

/// Unwraps a JSON body, turning any decoding failure into a 400
pub fn decode<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| {
            tracing::debug!("Rejected request body: {}", rejection);
            ApiError::BadRequest("Invalid request".to_string())
        })
}

/// Fails with `InvalidField` when a required string is empty
pub fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidField(field.to_string()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_kinds_become_bad_request() {
        assert_eq!(
            ApiError::from(DomainError::AlreadyExists),
            ApiError::BadRequest("Already exists".to_string())
        );
        assert_eq!(
            ApiError::from(DomainError::NotFound),
            ApiError::BadRequest("Not found".to_string())
        );
        assert_eq!(
            ApiError::from(DomainError::InvalidField("name".to_string())),
            ApiError::BadRequest("Invalid field: name".to_string())
        );
    }

    #[test]
    fn server_kinds_hide_details() {
        assert_eq!(
            ApiError::from(DomainError::Unknown("relation users does not exist".to_string())),
            ApiError::Internal("Unknown error".to_string())
        );
        assert_eq!(
            ApiError::from(DomainError::InvalidSqlRequest("no txn".to_string())),
            ApiError::Internal("Unknown error".to_string())
        );
    }

    #[test]
    fn require_rejects_blank_values() {
        assert!(require("name", "algo-101").is_ok());
        assert_eq!(
            require("name", "   "),
            Err(ApiError::BadRequest("Invalid field: name".to_string()))
        );
    }
}
