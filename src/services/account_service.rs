//! Account Service - registration and sign-in without the HTTP layer

use uuid::Uuid;

use crate::domain::{Account, AccountRepository, DomainError, ExecutionContext, SecretVerifier};

/// Error type for sign-in
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SignInError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// New account as submitted at registration
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub secret: String,
    pub role: bool,
}

/// Create an account with a freshly generated identifier
pub async fn register(
    accounts: &dyn AccountRepository,
    ctx: &ExecutionContext,
    registration: Registration,
) -> Result<Account, DomainError> {
    let account = Account {
        id: Uuid::new_v4(),
        email: registration.email,
        secret: registration.secret,
        role: registration.role,
    };

    let created = accounts.create(ctx, account).await?;
    tracing::info!("Registered account {}", created.id);
    Ok(created)
}

/// Look the account up by email and check the supplied secret
pub async fn sign_in(
    accounts: &dyn AccountRepository,
    verifier: &dyn SecretVerifier,
    ctx: &ExecutionContext,
    email: &str,
    secret: &str,
) -> Result<Account, SignInError> {
    let account = accounts.find_by_email(ctx, email).await?;

    if !verifier.verify(secret, &account.secret) {
        tracing::warn!("Secret mismatch for account {}", account.id);
        return Err(SignInError::InvalidCredentials);
    }

    tracing::info!("Account {} signed in", account.id);
    Ok(account)
}
