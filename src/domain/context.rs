//! Per-request execution context
//!
//! Every repository call receives one of these. It is immutable and cheap to
//! clone; clones share the same identity and cancellation token, so a clone
//! handed to a nested call still joins the caller's ambient transaction.

use std::fmt;
use std::future::Future;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::DomainError;

/// Identity used to key ambient transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(Uuid);

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct ExecutionContext {
    id: ContextId,
    cancellation: CancellationToken,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::with_cancellation(CancellationToken::new())
    }

    /// Builds a context that stops when `cancellation` fires.
    pub fn with_cancellation(cancellation: CancellationToken) -> Self {
        Self {
            id: ContextId(Uuid::new_v4()),
            cancellation,
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Drives `operation` to completion unless the context is cancelled first.
    pub async fn run<T, F>(&self, operation: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        if self.is_cancelled() {
            return Err(cancelled());
        }

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(cancelled()),
            result = operation => result,
        }
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

fn cancelled() -> DomainError {
    DomainError::Unknown("operation cancelled".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity() {
        let ctx = ExecutionContext::new();
        assert_eq!(ctx.id(), ctx.clone().id());
        assert_ne!(ctx.id(), ExecutionContext::new().id());
    }

    #[tokio::test]
    async fn run_returns_operation_result() {
        let ctx = ExecutionContext::new();
        let value = ctx.run(async { Ok::<_, DomainError>(7) }).await;
        assert_eq!(value, Ok(7));
    }

    #[tokio::test]
    async fn cancelled_context_short_circuits() {
        let token = CancellationToken::new();
        let ctx = ExecutionContext::with_cancellation(token.clone());
        token.cancel();

        let result = ctx
            .run(async { Ok::<_, DomainError>("should not run") })
            .await;
        assert_eq!(
            result,
            Err(DomainError::Unknown("operation cancelled".to_string()))
        );
    }
}
