//! Ambient transactions keyed by execution context
//!
//! A caller that wants several repository calls to form one atomic unit
//! begins a transaction for its `ExecutionContext`; every repository call made
//! with that context (or a clone of it) resolves to the same
//! `DatabaseTransaction`. Calls made with any other context keep using the
//! pooled connection directly.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr, ExecResult,
    QueryResult, Statement, TransactionTrait,
};

use crate::domain::{ContextId, DomainError, ExecutionContext};

/// The handle a single repository operation runs against.
#[derive(Clone)]
pub enum StoreHandle {
    /// Standalone: the pooled connection, each statement autocommits
    Direct(DatabaseConnection),
    /// Joined: the transaction opened for the caller's context
    Ambient(Arc<DatabaseTransaction>),
}

impl StoreHandle {
    pub fn is_ambient(&self) -> bool {
        matches!(self, StoreHandle::Ambient(_))
    }
}

#[async_trait]
impl ConnectionTrait for StoreHandle {
    fn get_database_backend(&self) -> DbBackend {
        match self {
            StoreHandle::Direct(db) => db.get_database_backend(),
            StoreHandle::Ambient(txn) => txn.get_database_backend(),
        }
    }

    async fn execute(&self, stmt: Statement) -> Result<ExecResult, DbErr> {
        match self {
            StoreHandle::Direct(db) => db.execute(stmt).await,
            StoreHandle::Ambient(txn) => txn.execute(stmt).await,
        }
    }

    async fn execute_unprepared(&self, sql: &str) -> Result<ExecResult, DbErr> {
        match self {
            StoreHandle::Direct(db) => db.execute_unprepared(sql).await,
            StoreHandle::Ambient(txn) => txn.execute_unprepared(sql).await,
        }
    }

    async fn query_one(&self, stmt: Statement) -> Result<Option<QueryResult>, DbErr> {
        match self {
            StoreHandle::Direct(db) => db.query_one(stmt).await,
            StoreHandle::Ambient(txn) => txn.query_one(stmt).await,
        }
    }

    async fn query_all(&self, stmt: Statement) -> Result<Vec<QueryResult>, DbErr> {
        match self {
            StoreHandle::Direct(db) => db.query_all(stmt).await,
            StoreHandle::Ambient(txn) => txn.query_all(stmt).await,
        }
    }

    fn support_returning(&self) -> bool {
        match self {
            StoreHandle::Direct(db) => db.support_returning(),
            StoreHandle::Ambient(txn) => txn.support_returning(),
        }
    }

    fn is_mock_connection(&self) -> bool {
        match self {
            StoreHandle::Direct(db) => db.is_mock_connection(),
            StoreHandle::Ambient(txn) => txn.is_mock_connection(),
        }
    }
}

/// Maps an execution context to the handle its operations must use.
///
/// Implementations must be pure lookups: resolving never begins, commits or
/// rolls back anything.
pub trait TransactionResolver: Send + Sync {
    fn resolve(&self, ctx: &ExecutionContext, default: &DatabaseConnection) -> StoreHandle;
}

/// Owns the context-to-transaction association.
///
/// Built once at start-up and shared by every repository.
pub struct TransactionManager {
    db: DatabaseConnection,
    open: DashMap<ContextId, Arc<DatabaseTransaction>>,
}

impl TransactionManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            open: DashMap::new(),
        }
    }

    /// Whether a transaction is currently associated with `ctx`.
    pub fn is_active(&self, ctx: &ExecutionContext) -> bool {
        self.open.contains_key(&ctx.id())
    }

    /// Opens a transaction and associates it with `ctx`.
    pub async fn begin(&self, ctx: &ExecutionContext) -> Result<(), DomainError> {
        if self.is_active(ctx) {
            return Err(already_open(ctx));
        }

        let txn = self.db.begin().await?;

        match self.open.entry(ctx.id()) {
            // Lost a race with a concurrent begin on the same context; dropping
            // `txn` rolls it back.
            Entry::Occupied(_) => Err(already_open(ctx)),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(txn));
                tracing::debug!(context = %ctx.id(), "transaction started");
                Ok(())
            }
        }
    }

    pub async fn commit(&self, ctx: &ExecutionContext) -> Result<(), DomainError> {
        let txn = self.detach(ctx)?;
        txn.commit().await?;
        tracing::debug!(context = %ctx.id(), "transaction committed");
        Ok(())
    }

    pub async fn rollback(&self, ctx: &ExecutionContext) -> Result<(), DomainError> {
        let txn = self.detach(ctx)?;
        txn.rollback().await?;
        tracing::debug!(context = %ctx.id(), "transaction rolled back");
        Ok(())
    }

    /// Runs `operation` inside a transaction bound to `ctx`.
    ///
    /// Commits when the operation succeeds and rolls back when it fails or the
    /// context is cancelled. If `ctx` already carries a transaction the
    /// operation joins it and the outer owner decides the outcome. Dropping
    /// the returned future mid-flight detaches the transaction, which rolls
    /// it back.
    pub async fn run_in_transaction<T, F, Fut>(
        &self,
        ctx: &ExecutionContext,
        operation: F,
    ) -> Result<T, DomainError>
    where
        F: FnOnce(ExecutionContext) -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        if self.is_active(ctx) {
            return operation(ctx.clone()).await;
        }

        self.begin(ctx).await?;

        // Declared before the operation so it drops after it.
        let _guard = DetachOnDrop {
            manager: self,
            id: ctx.id(),
        };

        let outcome = ctx.run(operation(ctx.clone())).await;

        match outcome {
            Ok(value) => {
                self.commit(ctx).await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = self.rollback(ctx).await {
                    tracing::warn!(context = %ctx.id(), "rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    fn detach(&self, ctx: &ExecutionContext) -> Result<DatabaseTransaction, DomainError> {
        let (id, shared) = self.open.remove(&ctx.id()).ok_or_else(|| {
            DomainError::InvalidSqlRequest(format!("no transaction open for context {}", ctx.id()))
        })?;

        Arc::try_unwrap(shared).map_err(|shared| {
            self.open.insert(id, shared);
            DomainError::InvalidSqlRequest(format!(
                "transaction for context {} is still in use",
                ctx.id()
            ))
        })
    }
}

impl TransactionResolver for TransactionManager {
    fn resolve(&self, ctx: &ExecutionContext, default: &DatabaseConnection) -> StoreHandle {
        match self.open.get(&ctx.id()) {
            Some(txn) => StoreHandle::Ambient(Arc::clone(txn.value())),
            None => StoreHandle::Direct(default.clone()),
        }
    }
}

/// Removes a unit's transaction from the map if the unit never finished.
///
/// Once the last `Arc` goes, SeaORM rolls the transaction back and the
/// connection returns to the pool.
struct DetachOnDrop<'a> {
    manager: &'a TransactionManager,
    id: ContextId,
}

impl Drop for DetachOnDrop<'_> {
    fn drop(&mut self) {
        if self.manager.open.remove(&self.id).is_some() {
            tracing::warn!(context = %self.id, "transaction abandoned, rolling back");
        }
    }
}

fn already_open(ctx: &ExecutionContext) -> DomainError {
    DomainError::InvalidSqlRequest(format!(
        "transaction already open for context {}",
        ctx.id()
    ))
}
