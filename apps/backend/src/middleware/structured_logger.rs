use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use super::trace_span::{route_label, stored_trace_id};
use crate::trace_ctx::UNKNOWN_TRACE_ID;

/// Emits one `request_completed` event per request: 5xx at error, 4xx at
/// warn, everything else at info.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

struct Completion {
    method: String,
    route: String,
    status: StatusCode,
    duration_us: u64,
    trace_id: String,
}

impl Completion {
    fn emit(&self) {
        let status_code = self.status.as_u16();
        macro_rules! completed {
            ($level:ident) => {
                $level!(
                    http.method = %self.method,
                    http.route = %self.route,
                    http.status_code = status_code,
                    duration_us = self.duration_us,
                    trace_id = %self.trace_id,
                    "request_completed"
                )
            };
        }

        if self.status.is_server_error() {
            completed!(error);
        } else if self.status.is_client_error() {
            completed!(warn);
        } else {
            completed!(info);
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let route = route_label(req.request());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, trace_id) = match &result {
                Ok(res) => (res.status(), stored_trace_id(res.request())),
                Err(err) => (
                    err.as_response_error().status_code(),
                    UNKNOWN_TRACE_ID.to_string(),
                ),
            };

            Completion {
                method,
                route,
                status,
                duration_us: start.elapsed().as_micros() as u64,
                trace_id,
            }
            .emit();

            result
        })
    }
}
