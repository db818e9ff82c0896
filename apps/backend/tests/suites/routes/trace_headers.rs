use actix_web::http::StatusCode;
use actix_web::test;
use atlas_backend::AppState;
use backend_test_support::problem_details::assert_problem_details_from_parts;
use uuid::Uuid;

use crate::support::create_test_app;

fn header<'a>(headers: &'a actix_web::http::header::HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .unwrap_or_else(|| panic!("{name} header missing"))
        .to_str()
        .expect("header is ASCII")
}

#[actix_web::test]
async fn every_response_carries_a_request_id() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(AppState::without_db())
        .with_prod_routes()
        .build()
        .await?;

    let mut seen = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let id = header(resp.headers(), "x-request-id").to_string();
        Uuid::parse_str(&id)?;
        seen.push(id);
    }
    assert_ne!(seen[0], seen[1], "each request gets its own id");
    Ok(())
}

#[actix_web::test]
async fn error_trace_id_matches_request_id() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(AppState::without_db())
        .with_prod_routes()
        .build()
        .await?;

    let req = test::TestRequest::get()
        .uri("/countries?sort=bogus")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;

    let problem = assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        "INVALID_SORT",
        StatusCode::BAD_REQUEST,
        Some("bogus"),
    );
    assert_eq!(problem.trace_id, header(&headers, "x-request-id"));
    assert_ne!(problem.trace_id, "unknown");
    Ok(())
}
