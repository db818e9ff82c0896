use std::env;

use crate::config::db::{db_kind_from_env, DbKind, RuntimeEnv};
use crate::error::AppError;

/// Everything `main` needs before building state and binding the listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_kind: DbKind,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            Err(_) => 3001,
        };
        let db_kind = db_kind_from_env("ATLAS_DB_KIND", DbKind::Postgres)?;
        db_infra::config::db::validate_db_config(RuntimeEnv::Prod, db_kind)?;

        Ok(Self {
            host,
            port,
            db_kind,
        })
    }
}
