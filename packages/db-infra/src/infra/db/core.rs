use std::future::Future;
use std::time::{Duration, Instant};

use migration::{migrate, MigrationCommand, Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::{info, warn};

use crate::config::db::{
    make_conn_spec, pool_settings, sqlite_file_path, validate_db_config, DbKind, DbOwner,
    RuntimeEnv,
};
use crate::error::DbInfraError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 500;

fn get_db_engine(db_kind: DbKind) -> &'static str {
    match db_kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, DbInfraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbInfraError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    warn!(
                        attempt,
                        max_attempts, interval_ms, "connection_retry=failed"
                    );
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| DbInfraError::connect("no error recorded after max attempts")))
}

async fn connect(
    opt: ConnectOptions,
    db_kind: DbKind,
    label: &'static str,
) -> Result<DatabaseConnection, DbInfraError> {
    if db_kind == DbKind::Postgres {
        retry_connection(
            || {
                let opt = opt.clone();
                async move {
                    Database::connect(opt).await.map_err(|e| {
                        DbInfraError::connect(format!("failed to connect to Postgres ({label}): {e}"))
                    })
                }
            },
            CONNECT_ATTEMPTS,
            CONNECT_INTERVAL_MS,
        )
        .await
    } else {
        Database::connect(opt).await.map_err(|e| {
            DbInfraError::connect(format!("failed to connect to SQLite ({label}): {e}"))
        })
    }
}

fn ensure_sqlite_dir(env: RuntimeEnv, db_kind: DbKind) -> Result<(), DbInfraError> {
    if db_kind != DbKind::SqliteFile {
        return Ok(());
    }
    let path = sqlite_file_path(env)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            DbInfraError::config(format!(
                "failed to create SQLite directory {}: {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Single-connection pool with owner credentials, used for migrations.
pub async fn build_admin_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    validate_db_config(env, db_kind)?;
    ensure_sqlite_dir(env, db_kind)?;
    let url = make_conn_spec(env, db_kind, DbOwner::Owner)?;

    let mut opt = ConnectOptions::new(&url);
    opt.min_connections(1)
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(2))
        .sqlx_logging(false);

    connect(opt, db_kind, "admin pool").await
}

/// Application pool with app credentials, sized from the environment.
pub async fn build_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    validate_db_config(env, db_kind)?;
    ensure_sqlite_dir(env, db_kind)?;
    let url = make_conn_spec(env, db_kind, DbOwner::App)?;
    let settings = pool_settings(db_kind)?;

    let mut opt = ConnectOptions::new(&url);
    opt.min_connections(settings.pool_min)
        .max_connections(settings.pool_max)
        .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
        .sqlx_logging(false);

    let pool = connect(opt, db_kind, "app pool").await?;

    if db_kind == DbKind::SqliteFile {
        pool.execute(Statement::from_string(
            pool.get_database_backend(),
            "PRAGMA journal_mode = WAL;",
        ))
        .await
        .map_err(|e| DbInfraError::config(format!("failed to set journal_mode: {e}")))?;
    }

    info!(
        env = ?env,
        db_kind = ?db_kind,
        engine = get_db_engine(db_kind),
        url = %sanitize_db_url(&url),
        pool_min = settings.pool_min,
        pool_max = settings.pool_max,
        "db pool ready"
    );

    Ok(pool)
}

/// Sanitize database URL by masking password in connection strings.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth_part, host_part)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    match auth_part.rfind(':') {
        // `postgresql://user` has its scheme colon before the slashes; only mask after it
        Some(colon_pos) if !auth_part[colon_pos..].starts_with("://") => {
            format!("{}:***@{}", &auth_part[..colon_pos], host_part)
        }
        _ => url.to_string(),
    }
}

/// Connects with owner credentials and runs `command`.
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    validate_db_config(env, db_kind)?;

    let admin_pool = build_admin_pool(env, db_kind).await?;

    orchestrate_migration_internal(&admin_pool, env, db_kind, command).await
}

/// Runs `command` on an existing pool and verifies the resulting migration count.
///
/// In-memory SQLite must be migrated through the pool the application will
/// use, so callers that already hold a pool go through here.
pub async fn orchestrate_migration_internal(
    pool: &DatabaseConnection,
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    let start = Instant::now();
    info!(
        env = ?env,
        db_kind = ?db_kind,
        engine = get_db_engine(db_kind),
        command = ?command,
        "migrate=start"
    );

    migrate(pool, command)
        .await
        .map_err(|e| DbInfraError::migration(format!("migration execution failed: {e}")))?;

    if command == MigrationCommand::Status {
        info!("migrate=done");
        return Ok(());
    }

    let expected_count = Migrator::migrations().len();
    let applied_count = Migrator::get_applied_migrations(pool)
        .await
        .map(|m| m.len())
        .unwrap_or(0);

    match command {
        MigrationCommand::Reset if applied_count != 0 => {
            return Err(DbInfraError::migration(format!(
                "Migration verification failed: reset should leave 0 migrations applied, but {applied_count} were found (env={env:?}, db_kind={db_kind:?})"
            )));
        }
        MigrationCommand::Up | MigrationCommand::Fresh | MigrationCommand::Refresh
            if applied_count != expected_count =>
        {
            return Err(DbInfraError::migration(format!(
                "Migration verification failed: expected {expected_count} migrations, but {applied_count} were applied (env={env:?}, db_kind={db_kind:?})"
            )));
        }
        _ => {}
    }

    info!(
        expected_count,
        applied_count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "migrate=done"
    );
    Ok(())
}
