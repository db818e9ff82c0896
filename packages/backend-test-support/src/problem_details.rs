//! Assertions for the Atlas error contract, kept free of backend types.

use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderMap, CONTENT_TYPE};
use actix_web::http::StatusCode;
use serde::Deserialize;

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";
pub const PROBLEM_TYPE_BASE: &str = "https://atlas.example/errors/";

/// Error body as the client sees it.
#[derive(Debug, Deserialize)]
pub struct ProblemBody {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Checks status, media type, `type` URL, code and trace id parity.
///
/// The body's `trace_id` must equal `x-trace-id`, and `x-request-id` too
/// when the request went through the tracing middleware.
pub fn assert_problem_details_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
    detail_contains: Option<&str>,
) -> ProblemBody {
    assert_eq!(status, expected_status, "unexpected status");
    assert_eq!(header(headers, CONTENT_TYPE.as_str()), Some(PROBLEM_CONTENT_TYPE));

    let problem: ProblemBody = match serde_json::from_slice(body) {
        Ok(p) => p,
        Err(e) => panic!(
            "body is not a problem document ({e}): {}",
            String::from_utf8_lossy(body)
        ),
    };

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert_eq!(problem.type_, format!("{PROBLEM_TYPE_BASE}{expected_code}"));
    assert!(!problem.title.is_empty(), "problem title is empty");

    assert_eq!(
        header(headers, "x-trace-id"),
        Some(problem.trace_id.as_str()),
        "x-trace-id header must echo the body trace_id"
    );
    if let Some(request_id) = header(headers, "x-request-id") {
        assert_eq!(request_id, problem.trace_id);
    }

    if let Some(needle) = detail_contains {
        assert!(
            problem.detail.contains(needle),
            "detail {:?} does not mention {needle:?}",
            problem.detail
        );
    }

    problem
}

/// [`assert_problem_details_from_parts`] for an in-process test response.
pub async fn assert_problem_details_from_service_response(
    resp: ServiceResponse,
    expected_code: &str,
    expected_status: StatusCode,
    detail_contains: Option<&str>,
) -> ProblemBody {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        expected_code,
        expected_status,
        detail_contains,
    )
}
