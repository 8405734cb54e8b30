//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use uuid::Uuid;

use super::{DomainError, ExecutionContext};

/// Account record. `secret` is stored and compared as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub secret: String,
    pub role: bool,
}

/// Catalog entry
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub text: String,
}

/// Repository trait for Account entity
///
/// Every operation resolves its store handle from `ctx` exactly once, so
/// calls sharing a context inside a transaction commit or roll back together.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account; the identifier is supplied by the caller
    async fn create(&self, ctx: &ExecutionContext, account: Account)
    -> Result<Account, DomainError>;

    /// Find an account by ID
    async fn find_by_id(&self, ctx: &ExecutionContext, id: Uuid) -> Result<Account, DomainError>;

    /// Find an account by its exact email, used by sign-in
    async fn find_by_email(
        &self,
        ctx: &ExecutionContext,
        email: &str,
    ) -> Result<Account, DomainError>;

    /// Replace email and secret of the account with `account.id`
    async fn update(&self, ctx: &ExecutionContext, account: Account)
    -> Result<Account, DomainError>;

    /// Delete an account, returning the row as it was stored
    async fn delete(&self, ctx: &ExecutionContext, id: Uuid) -> Result<Account, DomainError>;
}

/// Repository trait for Course entity
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert a new course; the identifier is supplied by the caller
    async fn create(&self, ctx: &ExecutionContext, course: Course) -> Result<Course, DomainError>;

    /// Find a course by ID
    async fn find_by_id(&self, ctx: &ExecutionContext, id: Uuid) -> Result<Course, DomainError>;

    /// Find all courses in store order
    async fn find_all(&self, ctx: &ExecutionContext) -> Result<Vec<Course>, DomainError>;

    /// Replace name, url and text of the course with `course.id`
    async fn update(&self, ctx: &ExecutionContext, course: Course) -> Result<Course, DomainError>;

    /// Delete a course, returning the row as it was stored
    async fn delete(&self, ctx: &ExecutionContext, id: Uuid) -> Result<Course, DomainError>;
}
