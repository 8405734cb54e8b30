//! SeaORM implementation of CourseRepository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityName, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::domain::{Course, CourseRepository, DomainError, ExecutionContext};
use crate::infrastructure::transaction::TransactionResolver;
use crate::models::course::{ActiveModel, Column, Entity as CourseEntity};

/// SeaORM-based implementation of CourseRepository
pub struct SeaOrmCourseRepository {
    db: DatabaseConnection,
    transactions: Arc<dyn TransactionResolver>,
}

impl SeaOrmCourseRepository {
    pub fn new(db: DatabaseConnection, transactions: Arc<dyn TransactionResolver>) -> Self {
        Self { db, transactions }
    }
}

#[async_trait]
impl CourseRepository for SeaOrmCourseRepository {
    async fn create(&self, ctx: &ExecutionContext, course: Course) -> Result<Course, DomainError> {
        let conn = self.transactions.resolve(ctx, &self.db);

        ctx.run(async move {
            let new_course = ActiveModel {
                id: Set(course.id),
                name: Set(course.name.clone()),
                url: Set(course.url.clone()),
                text: Set(course.text.clone()),
            };

            CourseEntity::insert(new_course)
                .exec_without_returning(&conn)
                .await?;

            Ok::<_, DomainError>(course)
        })
        .await
    }

    async fn find_by_id(&self, ctx: &ExecutionContext, id: Uuid) -> Result<Course, DomainError> {
        let conn = self.transactions.resolve(ctx, &self.db);

        ctx.run(async move {
            CourseEntity::find_by_id(id)
                .one(&conn)
                .await?
                .map(Course::from)
                .ok_or(DomainError::NotFound)
        })
        .await
    }

    async fn find_all(&self, ctx: &ExecutionContext) -> Result<Vec<Course>, DomainError> {
        let conn = self.transactions.resolve(ctx, &self.db);

        ctx.run(async move {
            let courses = CourseEntity::find().all(&conn).await?;
            Ok::<_, DomainError>(courses.into_iter().map(Course::from).collect())
        })
        .await
    }

    async fn update(&self, ctx: &ExecutionContext, course: Course) -> Result<Course, DomainError> {
        let conn = self.transactions.resolve(ctx, &self.db);

        ctx.run(async move {
            let result = CourseEntity::update_many()
                .col_expr(Column::Name, Expr::value(course.name.clone()))
                .col_expr(Column::Url, Expr::value(course.url.clone()))
                .col_expr(Column::Text, Expr::value(course.text.clone()))
                .filter(Column::Id.eq(course.id))
                .exec(&conn)
                .await?;

            if result.rows_affected == 0 {
                return Err(DomainError::NotFound);
            }

            Ok(course)
        })
        .await
    }

    async fn delete(&self, ctx: &ExecutionContext, id: Uuid) -> Result<Course, DomainError> {
        let conn = self.transactions.resolve(ctx, &self.db);

        ctx.run(async move {
            let stmt = Query::delete()
                .from_table(CourseEntity.table_ref())
                .and_where(Column::Id.eq(id))
                .returning_all()
                .to_owned();

            let mut deleted = CourseEntity::find()
                .from_raw_sql(conn.get_database_backend().build(&stmt))
                .all(&conn)
                .await?;

            deleted.pop().map(Course::from).ok_or(DomainError::NotFound)
        })
        .await
    }
}
