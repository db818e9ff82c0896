//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert it here into
//! `DomainError`, and handlers map that to `AppError` via `From`.

use sea_orm::DbErr;
use tracing::{error, warn};

use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Translate a `DbErr` into a `DomainError` with a sanitized detail.
///
/// Store failures carry no domain meaning here, so everything lands in
/// `DomainError::Infra`; the raw message only goes to the log.
pub fn map_db_err(e: DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    if matches!(e, DbErr::ConnectionAcquire(_) | DbErr::Conn(_)) {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
        return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::infra(
            InfraErrorKind::Other("ForeignKey".into()),
            "Foreign key constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");
        return DomainError::infra(
            InfraErrorKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        map_db_err(e)
    }
}
