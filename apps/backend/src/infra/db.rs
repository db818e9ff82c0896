use migration::MigrationCommand;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::db::{DbKind, RuntimeEnv};
use crate::error::AppError;

/// Connect the application pool and bring the schema up to date.
///
/// Postgres and SQLite files are migrated through a separate owner
/// connection. In-memory SQLite has to be migrated on the application pool
/// itself since a second connection would open a different database.
pub async fn bootstrap_db(env: RuntimeEnv, db_kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let pool = match db_kind {
        DbKind::SqliteMemory => {
            let pool = db_infra::build_pool(env, db_kind).await?;
            db_infra::orchestrate_migration_internal(&pool, env, db_kind, MigrationCommand::Up)
                .await?;
            pool
        }
        DbKind::Postgres | DbKind::SqliteFile => {
            db_infra::orchestrate_migration(env, db_kind, MigrationCommand::Up).await?;
            db_infra::build_pool(env, db_kind).await?
        }
    };

    info!(env = ?env, db_kind = ?db_kind, "db.bootstrap_complete");
    Ok(pool)
}
