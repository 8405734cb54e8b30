//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).
//! Only trait definitions, the execution context and domain error types.

pub mod context;
pub mod credentials;
pub mod errors;
pub mod repositories;

pub use context::{ContextId, ExecutionContext};
pub use credentials::{PlaintextSecretVerifier, SecretVerifier};
pub use errors::{DomainError, ErrorKind};
pub use repositories::*;
