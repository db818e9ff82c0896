use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::HttpMessage;
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::trace_ctx::{self, TraceId};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Gives every request a [`TraceId`].
///
/// A well-formed UUID in an inbound `x-request-id` is kept so callers can
/// correlate their own logs; anything else is replaced with a fresh v4.
/// The id lands in request extensions, in the `trace_ctx` scope around the
/// rest of the chain, and back on the response as `x-request-id`.
pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

fn resolve_trace_id(req: &ServiceRequest) -> TraceId {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(TraceId::from_inbound)
        .unwrap_or_else(TraceId::generate)
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = resolve_trace_id(&req);
        req.extensions_mut().insert(trace_id.clone());
        let header_value = HeaderValue::from_str(trace_id.as_str()).ok();

        let fut = self.service.call(req);

        Box::pin(trace_ctx::with_trace_id(trace_id, async move {
            let mut res = fut.await?;
            if let Some(value) = header_value {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }
            Ok(res)
        }))
    }
}
