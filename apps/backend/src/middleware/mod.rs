//! Request middleware, registered in `main.rs` and the test app builder as
//! `StructuredLogger`, `TraceSpan`, `RequestTrace` (outermost last).

pub mod request_trace;
pub mod structured_logger;
pub mod trace_span;

pub use request_trace::{RequestTrace, REQUEST_ID_HEADER};
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;
