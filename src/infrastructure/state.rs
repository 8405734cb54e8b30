//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{AccountRepository, CourseRepository, PlaintextSecretVerifier, SecretVerifier};
use crate::infrastructure::{SeaOrmAccountRepository, SeaOrmCourseRepository, TransactionManager};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Ambient transactions, shared with both repositories
    pub transactions: Arc<TransactionManager>,
    /// Account repository
    pub account_repo: Arc<dyn AccountRepository>,
    /// Course repository
    pub course_repo: Arc<dyn CourseRepository>,
    /// Sign-in secret comparison
    pub secret_verifier: Arc<dyn SecretVerifier>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        let transactions = Arc::new(TransactionManager::new(db.clone()));
        let account_repo = Arc::new(SeaOrmAccountRepository::new(
            db.clone(),
            transactions.clone(),
        ));
        let course_repo = Arc::new(SeaOrmCourseRepository::new(
            db.clone(),
            transactions.clone(),
        ));

        Self {
            db,
            transactions,
            account_repo,
            course_repo,
            secret_verifier: Arc::new(PlaintextSecretVerifier),
        }
    }

    /// Get the database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
