use actix_web::{error, web};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod cities;
pub mod countries;
pub mod health;
pub mod pagination;

/// Register every route plus extractor configs that turn path and query
/// parse failures into Problem Details.
///
/// `main.rs` and the integration tests share this so both serve the same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(path_error))
        .app_data(web::QueryConfig::default().error_handler(query_error));

    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Country routes: /countries/**
    cfg.service(web::scope("/countries").configure(countries::configure_routes));

    // City routes: /cities/**
    cfg.service(web::scope("/cities").configure(cities::configure_routes));
}

fn path_error(err: error::PathError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "path extraction failed");
    AppError::bad_request(ErrorCode::BadRequest, "Invalid path parameter").into()
}

fn query_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "query extraction failed");
    AppError::bad_request(ErrorCode::BadRequest, "Invalid query parameters").into()
}
