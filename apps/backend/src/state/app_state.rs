use sea_orm::DatabaseConnection;

use crate::config::db::{DbKind, RuntimeEnv};

/// Application state containing shared resources
#[derive(Debug)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<DatabaseConnection>,
    /// Which store backs `db`, reported by the health check
    pub db_kind: Option<DbKind>,
    pub env: RuntimeEnv,
}

impl AppState {
    pub fn new(db: DatabaseConnection, env: RuntimeEnv, db_kind: DbKind) -> Self {
        Self {
            db: Some(db),
            db_kind: Some(db_kind),
            env,
        }
    }

    /// State without a database; handlers touching the store answer 503
    pub fn without_db() -> Self {
        Self {
            db: None,
            db_kind: None,
            env: RuntimeEnv::Test,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
