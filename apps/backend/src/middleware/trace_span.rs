//! Per-request tracing span.
//!
//! Opens an `info_span!("request")` with `trace_id`, `method` and `route`
//! and instruments the rest of the chain, so every event a handler emits
//! carries them. `route` is the matched resource pattern
//! (`/countries/{id}`) when there is one, which keeps span cardinality
//! independent of ids in the path.
//!
//! Reads the [`TraceId`] that `RequestTrace` stored, so `RequestTrace` must
//! wrap outside this middleware:
//!
//! App::new()
//!     .wrap(StructuredLogger)
//!     .wrap(TraceSpan)
//!     .wrap(RequestTrace)   // registered last, runs first

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{info_span, Instrument};

use crate::trace_ctx::{TraceId, UNKNOWN_TRACE_ID};

/// Route label for logs: the resource pattern, else the raw path.
pub(crate) fn route_label(req: &actix_web::HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| req.path().to_string())
}

/// Trace id stored by `RequestTrace`, if it ran.
pub(crate) fn stored_trace_id(req: &actix_web::HttpRequest) -> String {
    req.extensions()
        .get::<TraceId>()
        .map(|id| id.to_string())
        .unwrap_or_else(|| UNKNOWN_TRACE_ID.to_string())
}

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let span = info_span!(
            "request",
            trace_id = %stored_trace_id(req.request()),
            method = %req.method(),
            route = %route_label(req.request()),
        );

        Box::pin(self.service.call(req).instrument(span))
    }
}
