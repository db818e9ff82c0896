use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sea_orm::DatabaseBackend;

use crate::error::DbInfraError;

/// Escaped in the password part of a URL; RFC 3986 unreserved characters pass through
const PASSWORD_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Runtime environment; selects the database name and safety rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    /// Test environment - enforces `_test` database names
    Test,
}

/// Which relational store backs the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    /// In-memory SQLite; one connection per pool, gone when the pool closes
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = DbInfraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "sqlite-file" | "sqlite_file" | "sqlite" => Ok(Self::SqliteFile),
            "sqlite-memory" | "sqlite_memory" | "memory" => Ok(Self::SqliteMemory),
            other => Err(DbInfraError::config(format!(
                "unknown database kind '{other}' (expected postgres, sqlite-file or sqlite-memory)"
            ))),
        }
    }
}

impl From<DbKind> for DatabaseBackend {
    fn from(kind: DbKind) -> Self {
        match kind {
            DbKind::Postgres => DatabaseBackend::Postgres,
            DbKind::SqliteFile | DbKind::SqliteMemory => DatabaseBackend::Sqlite,
        }
    }
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// Connection pool sizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub pool_min: u32,
    pub pool_max: u32,
    pub acquire_timeout_ms: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            pool_min: 1,
            pool_max: 10,
            acquire_timeout_ms: 5000,
        }
    }
}

/// Read a `DbKind` from the named environment variable, falling back to `default`
pub fn db_kind_from_env(var: &str, default: DbKind) -> Result<DbKind, DbInfraError> {
    match env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => raw.parse(),
        _ => Ok(default),
    }
}

/// Reject combinations that can never work
pub fn validate_db_config(env: RuntimeEnv, db_kind: DbKind) -> Result<(), DbInfraError> {
    if env == RuntimeEnv::Prod && db_kind == DbKind::SqliteMemory {
        return Err(DbInfraError::config(
            "sqlite-memory is not allowed in the Prod runtime environment",
        ));
    }
    Ok(())
}

/// Builds a connection string for the given environment, store and owner
pub fn make_conn_spec(
    env: RuntimeEnv,
    db_kind: DbKind,
    owner: DbOwner,
) -> Result<String, DbInfraError> {
    match db_kind {
        DbKind::Postgres => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = db_name(env)?;
            let (username, password) = credentials(owner)?;
            let password = utf8_percent_encode(&password, PASSWORD_ESCAPES);

            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => {
            let path = sqlite_file_path(env)?;
            Ok(format!("sqlite://{}?mode=rwc", path.display()))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// Location of the SQLite database file for `env`
pub fn sqlite_file_path(env: RuntimeEnv) -> Result<PathBuf, DbInfraError> {
    let dir = env::var("ATLAS_SQLITE_DIR").unwrap_or_else(|_| "./data".to_string());
    if dir.trim().is_empty() {
        return Err(DbInfraError::config("ATLAS_SQLITE_DIR must not be empty"));
    }
    let file = match env {
        RuntimeEnv::Prod => "atlas.db",
        RuntimeEnv::Test => "atlas_test.db",
    };
    Ok(PathBuf::from(dir).join(file))
}

/// Pool sizing from the environment. In-memory SQLite is pinned to one
/// connection since every connection would otherwise see its own database.
pub fn pool_settings(db_kind: DbKind) -> Result<PoolSettings, DbInfraError> {
    if db_kind == DbKind::SqliteMemory {
        return Ok(PoolSettings {
            pool_min: 1,
            pool_max: 1,
            ..PoolSettings::default()
        });
    }

    let defaults = PoolSettings::default();
    let pool_min = parse_var("ATLAS_DB_POOL_MIN", defaults.pool_min)?;
    let pool_max = parse_var("ATLAS_DB_POOL_MAX", defaults.pool_max)?;
    let acquire_timeout_ms = parse_var("ATLAS_DB_ACQUIRE_TIMEOUT_MS", defaults.acquire_timeout_ms)?;

    if pool_max == 0 || pool_min > pool_max {
        return Err(DbInfraError::config(format!(
            "invalid pool sizing: min={pool_min} max={pool_max}"
        )));
    }

    Ok(PoolSettings {
        pool_min,
        pool_max,
        acquire_timeout_ms,
    })
}

fn db_name(env: RuntimeEnv) -> Result<String, DbInfraError> {
    match env {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB")?;
            // Enforce safety: test DB must end with "_test"
            if !db_name.ends_with("_test") {
                return Err(DbInfraError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn credentials(owner: DbOwner) -> Result<(String, String), DbInfraError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((
            must_var("ATLAS_OWNER_USER")?,
            must_var("ATLAS_OWNER_PASSWORD")?,
        )),
    }
}

fn must_var(name: &str) -> Result<String, DbInfraError> {
    env::var(name).map_err(|_| {
        DbInfraError::config(format!("Required environment variable '{name}' is not set"))
    })
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, DbInfraError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| DbInfraError::config(format!("'{name}' has an invalid value: '{raw}'"))),
        Err(_) => Ok(default),
    }
}
