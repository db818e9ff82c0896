pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};
use sea_orm_migration::sea_orm::{DatabaseBackend, Statement};

mod m20250101_000001_init; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250101_000001_init::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

/// Runs `command` against `db` without reading any environment.
///
/// Shared by the operator CLI, application bootstrap and tests.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let before = Snapshot::capture(db).await?;
    tracing::info!(
        command = ?command,
        backend = ?before.backend,
        database = %before.database,
        defined = before.defined,
        applied = before.applied,
        "migration.start"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    if let Err(e) = result {
        tracing::error!(command = ?command, backend = ?before.backend, error = %e, "migration.failed");
        return Err(e);
    }

    if command != MigrationCommand::Status {
        let after = Snapshot::capture(db).await?;
        tracing::info!(
            command = ?command,
            defined = after.defined,
            applied = after.applied,
            "migration.done"
        );
    }
    Ok(())
}

/// Where the migrator is pointed and how far along it is.
struct Snapshot {
    backend: DatabaseBackend,
    database: String,
    defined: usize,
    applied: usize,
}

impl Snapshot {
    async fn capture(db: &DatabaseConnection) -> Result<Self, DbErr> {
        Ok(Self {
            backend: db.get_database_backend(),
            database: database_name(db).await?,
            defined: Migrator::migrations().len(),
            applied: count_applied_migrations(db).await.unwrap_or(0),
        })
    }
}

async fn database_name(db: &DatabaseConnection) -> Result<String, DbErr> {
    let backend = db.get_database_backend();
    let (sql, column) = match backend {
        DatabaseBackend::Postgres => ("SELECT current_database() AS name", "name"),
        DatabaseBackend::Sqlite => (
            "SELECT file FROM pragma_database_list WHERE name = 'main'",
            "file",
        ),
        _ => return Ok("<unsupported>".to_string()),
    };

    let row = db.query_one(Statement::from_string(backend, sql)).await?;
    let name = row.and_then(|r| r.try_get::<String>("", column).ok());
    Ok(match name {
        // SQLite reports an empty file for in-memory databases
        Some(file) if file.is_empty() => ":memory:".to_string(),
        Some(name) => name,
        None => "<unknown>".to_string(),
    })
}

/// Count the number of migrations that have been applied to the database.
/// Returns 0 if the migration table doesn't exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0), // Migration table doesn't exist yet
        Err(e) => Err(e),
    }
}

/// Get the version string of the latest applied migration.
/// Returns None if no migrations have been applied or the migration table doesn't exist.
pub async fn get_latest_migration_version(
    db: &DatabaseConnection,
) -> Result<Option<String>, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.last().map(|m| m.name().to_string())),
        Err(DbErr::Exec(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
