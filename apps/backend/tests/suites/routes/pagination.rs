use actix_web::http::StatusCode;
use actix_web::test;
use atlas_backend::db::require_db;
use atlas_backend::db::txn::SharedTxn;
use backend_test_support::problem_details::assert_problem_details_from_service_response;

use crate::support::http::send;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn page_parameters_are_clamped() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let app = create_test_app(state)
        .with_prod_routes()
        .with_shared_txn(shared)
        .build()
        .await?;

    let cases = [
        ("/countries", 0, 20),
        ("/countries?size=0", 0, 20),
        ("/countries?size=-4", 0, 20),
        ("/countries?size=5000", 0, 2000),
        ("/countries?page=-3&size=7", 0, 7),
        ("/cities?page=2&size=15", 2, 15),
    ];
    for (uri, page_number, page_size) in cases {
        let req = test::TestRequest::get().uri(uri).to_request();
        let (status, page) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(page["pageNumber"], page_number, "{uri}");
        assert_eq!(page["pageSize"], page_size, "{uri}");
    }
    Ok(())
}

#[actix_web::test]
async fn empty_collection_has_zero_pages() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    atlas_backend::repos::cities::delete_all(shared.transaction()).await?;
    let app = create_test_app(state)
        .with_prod_routes()
        .with_shared_txn(shared)
        .build()
        .await?;

    let req = test::TestRequest::get().uri("/cities").to_request();
    let (status, page) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], 0);
    assert_eq!(page["totalPages"], 0);
    assert_eq!(page["content"], serde_json::json!([]));
    Ok(())
}

#[actix_web::test]
async fn sort_property_is_checked_per_collection() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let app = create_test_app(state)
        .with_prod_routes()
        .with_shared_txn(shared)
        .build()
        .await?;

    let req = test::TestRequest::get()
        .uri("/cities?sort=country,desc")
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/countries?sort=country")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_SORT",
        StatusCode::BAD_REQUEST,
        Some("country"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn unknown_sort_direction_is_400() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri("/countries?sort=name,sideways")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_SORT",
        StatusCode::BAD_REQUEST,
        Some("sideways"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn non_numeric_page_is_400() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri("/countries?page=first")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("query"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn huge_page_index_returns_empty_page() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let app = create_test_app(state)
        .with_prod_routes()
        .with_shared_txn(shared)
        .build()
        .await?;

    for collection in ["/countries", "/cities"] {
        let uri = format!("{collection}?page={}&size=20", i64::MAX);
        let req = test::TestRequest::get().uri(&uri).to_request();
        let (status, page) = send(&app, req).await;

        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(page["content"].as_array().map(Vec::len), Some(0), "{uri}");
        assert_eq!(page["pageNumber"], i64::MAX as u64 / 20, "{uri}");
        assert_eq!(page["pageSize"], 20, "{uri}");
    }
    Ok(())
}
