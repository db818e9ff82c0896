use actix_web::http::StatusCode;
use actix_web::test;
use atlas_backend::db::require_db;
use atlas_backend::db::txn::SharedTxn;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::json;

use crate::support::http::send;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn create_returns_201_with_assigned_id() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let app = create_test_app(state)
        .with_prod_routes()
        .with_shared_txn(shared)
        .build()
        .await?;

    let req = test::TestRequest::post()
        .uri("/countries")
        .set_json(json!({"name": "Turkey", "code": "TR"}))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().is_some_and(|id| id > 0));
    assert_eq!(body["name"], "Turkey");
    assert_eq!(body["code"], "TR");
    Ok(())
}

#[actix_web::test]
async fn create_with_empty_object_stores_nulls() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let app = create_test_app(state)
        .with_prod_routes()
        .with_shared_txn(shared)
        .build()
        .await?;

    let req = test::TestRequest::post()
        .uri("/countries")
        .set_json(json!({}))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["name"].is_null());
    assert!(body["code"].is_null());
    Ok(())
}

#[actix_web::test]
async fn update_overwrites_and_nulls_omitted_fields() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let app = create_test_app(state)
        .with_prod_routes()
        .with_shared_txn(shared)
        .build()
        .await?;

    let req = test::TestRequest::post()
        .uri("/countries")
        .set_json(json!({"name": "Turkey", "code": "TR"}))
        .to_request();
    let (_, created) = send(&app, req).await;
    let id = created["id"].as_i64().expect("id");

    let req = test::TestRequest::put()
        .uri(&format!("/countries/{id}"))
        .set_json(json!({"name": "Türkiye"}))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": id, "name": "Türkiye", "code": null}));
    Ok(())
}

#[actix_web::test]
async fn update_unknown_id_is_404_problem() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let app = create_test_app(state)
        .with_prod_routes()
        .with_shared_txn(shared)
        .build()
        .await?;

    let req = test::TestRequest::put()
        .uri("/countries/44")
        .set_json(json!({"name": "Atlantis", "code": "AT"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let problem = assert_problem_details_from_service_response(
        resp,
        "COUNTRY_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("44"),
    )
    .await;
    assert_eq!(problem.detail, "Country not found with id 44");
    assert_eq!(problem.title, "Country Not Found");
    Ok(())
}

#[actix_web::test]
async fn delete_is_204_and_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    let app = create_test_app(state)
        .with_prod_routes()
        .with_shared_txn(shared)
        .build()
        .await?;

    let req = test::TestRequest::post()
        .uri("/countries")
        .set_json(json!({"name": "Turkey", "code": "TR"}))
        .to_request();
    let (_, created) = send(&app, req).await;
    let id = created["id"].as_i64().expect("id");

    for _ in 0..2 {
        let req = test::TestRequest::delete()
            .uri(&format!("/countries/{id}"))
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null());
    }

    let req = test::TestRequest::get().uri("/countries?size=2000").to_request();
    let (_, page) = send(&app, req).await;
    let ids: Vec<_> = page["content"]
        .as_array()
        .expect("content")
        .iter()
        .filter_map(|c| c["id"].as_i64())
        .collect();
    assert!(!ids.contains(&id));
    Ok(())
}

#[actix_web::test]
async fn list_returns_page_envelope() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let shared = SharedTxn::open(require_db(&state)?).await?;
    atlas_backend::repos::countries::delete_all(shared.transaction()).await?;
    let app = create_test_app(state)
        .with_prod_routes()
        .with_shared_txn(shared)
        .build()
        .await?;

    for (name, code) in [("Turkey", "TR"), ("Greece", "GR"), ("Bulgaria", "BG")] {
        let req = test::TestRequest::post()
            .uri("/countries")
            .set_json(json!({"name": name, "code": code}))
            .to_request();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/countries?page=0&size=2&sort=name,desc")
        .to_request();
    let (status, page) = send(&app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["pageNumber"], 0);
    assert_eq!(page["pageSize"], 2);
    let names: Vec<_> = page["content"]
        .as_array()
        .expect("content")
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert_eq!(names, ["Turkey", "Greece"]);
    Ok(())
}
