//! Execution context extraction

use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::domain::ExecutionContext;

/// Every request gets its own context, so ambient transactions never leak
/// between requests.
///
/// No request deadline is enforced yet: nothing cancels the context's token,
/// so a handler runs until it finishes or the connection drops it.
#[async_trait]
impl<S> FromRequestParts<S> for ExecutionContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ExecutionContext::new())
    }
}
