use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Response,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::response::{ApiError, decode, ok, require};
use crate::domain::{Account, ExecutionContext};
use crate::infrastructure::AppState;
use crate::services::{self, Registration, SignInError};

#[derive(Deserialize, ToSchema)]
pub struct RegistrationRequest {
    email: String,
    password: String,
    #[serde(default)]
    role: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct SignInRequest {
    email: String,
    password: String,
}

/// Account as returned to clients; the secret never leaves the server
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub role: bool,
}

impl From<Account> for AccountResponse {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            email: a.email,
            role: a.role,
        }
    }
}

#[utoipa::path(
    post,
    path = "/registration",
    request_body = RegistrationRequest,
    responses(
        (status = 200, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid request or email already registered"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ctx: ExecutionContext,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let payload = decode(payload)?;
    require("email", &payload.email)?;
    require("password", &payload.password)?;

    tracing::info!("Registration attempt for {}", payload.email);

    let account = services::register(
        state.account_repo.as_ref(),
        &ctx,
        Registration {
            email: payload.email,
            secret: payload.password,
            role: payload.role,
        },
    )
    .await?;

    Ok(ok(AccountResponse::from(account)))
}

#[utoipa::path(
    post,
    path = "/signIn",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = AccountResponse),
        (status = 400, description = "Unknown email or wrong password"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    ctx: ExecutionContext,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let payload = decode(payload)?;
    require("email", &payload.email)?;
    require("password", &payload.password)?;

    match services::sign_in(
        state.account_repo.as_ref(),
        state.secret_verifier.as_ref(),
        &ctx,
        &payload.email,
        &payload.password,
    )
    .await
    {
        Ok(account) => Ok(ok(AccountResponse::from(account))),
        Err(SignInError::InvalidCredentials) => Err(ApiError::BadRequest(
            "Invalid email or password".to_string(),
        )),
        Err(SignInError::Domain(e)) => Err(e.into()),
    }
}
