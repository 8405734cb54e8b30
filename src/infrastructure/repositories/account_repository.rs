//! SeaORM implementation of AccountRepository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityName, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::domain::{Account, AccountRepository, DomainError, ExecutionContext};
use crate::infrastructure::transaction::TransactionResolver;
use crate::models::account::{ActiveModel, Column, Entity as AccountEntity};

/// SeaORM-based implementation of AccountRepository
pub struct SeaOrmAccountRepository {
    db: DatabaseConnection,
    transactions: Arc<dyn TransactionResolver>,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection, transactions: Arc<dyn TransactionResolver>) -> Self {
        Self { db, transactions }
    }
}

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn create(
        &self,
        ctx: &ExecutionContext,
        account: Account,
    ) -> Result<Account, DomainError> {
        let conn = self.transactions.resolve(ctx, &self.db);

        ctx.run(async move {
            let new_account = ActiveModel {
                id: Set(account.id),
                email: Set(account.email.clone()),
                password: Set(account.secret.clone()),
                role: Set(account.role),
            };

            AccountEntity::insert(new_account)
                .exec_without_returning(&conn)
                .await?;

            Ok::<_, DomainError>(account)
        })
        .await
    }

    async fn find_by_id(&self, ctx: &ExecutionContext, id: Uuid) -> Result<Account, DomainError> {
        let conn = self.transactions.resolve(ctx, &self.db);

        ctx.run(async move {
            AccountEntity::find_by_id(id)
                .one(&conn)
                .await?
                .map(Account::from)
                .ok_or(DomainError::NotFound)
        })
        .await
    }

    async fn find_by_email(
        &self,
        ctx: &ExecutionContext,
        email: &str,
    ) -> Result<Account, DomainError> {
        let conn = self.transactions.resolve(ctx, &self.db);

        ctx.run(async move {
            AccountEntity::find()
                .filter(Column::Email.eq(email))
                .one(&conn)
                .await?
                .map(Account::from)
                .ok_or(DomainError::NotFound)
        })
        .await
    }

    async fn update(
        &self,
        ctx: &ExecutionContext,
        account: Account,
    ) -> Result<Account, DomainError> {
        let conn = self.transactions.resolve(ctx, &self.db);

        ctx.run(async move {
            let result = AccountEntity::update_many()
                .col_expr(Column::Email, Expr::value(account.email.clone()))
                .col_expr(Column::Password, Expr::value(account.secret.clone()))
                .filter(Column::Id.eq(account.id))
                .exec(&conn)
                .await?;

            // The query succeeding says nothing about the row existing.
            if result.rows_affected == 0 {
                return Err(DomainError::NotFound);
            }

            Ok(account)
        })
        .await
    }

    async fn delete(&self, ctx: &ExecutionContext, id: Uuid) -> Result<Account, DomainError> {
        let conn = self.transactions.resolve(ctx, &self.db);

        ctx.run(async move {
            let stmt = Query::delete()
                .from_table(AccountEntity.table_ref())
                .and_where(Column::Id.eq(id))
                .returning_all()
                .to_owned();

            let mut deleted = AccountEntity::find()
                .from_raw_sql(conn.get_database_backend().build(&stmt))
                .all(&conn)
                .await?;

            deleted.pop().map(Account::from).ok_or(DomainError::NotFound)
        })
        .await
    }
}
