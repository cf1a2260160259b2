// Integration tests for the receipt points HTTP API

use actix_web::{http::StatusCode, test, web, App};
use receipt_points::calculate_points;
use receipt_points::models::{ErrorResponse, PointsResponse, ProcessReceiptResponse, Receipt};
use receipt_points::routes::{configure_routes, AppState};
use serde_json::json;

fn target_receipt() -> serde_json::Value {
    json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            { "shortDescription": "Mountain Dew 12PK", "price": "6.49" },
            { "shortDescription": "Emils Cheese Pizza", "price": "12.25" },
            { "shortDescription": "Knorr Creamy Chicken", "price": "1.26" },
            { "shortDescription": "Doritos Nacho Cheese", "price": "3.35" },
            { "shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00" }
        ],
        "total": "35.35"
    })
}

fn corner_market_receipt() -> serde_json::Value {
    json!({
        "retailer": "M&M Corner Market",
        "purchaseDate": "2022-03-20",
        "purchaseTime": "14:33",
        "items": [
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" }
        ],
        "total": "9.00"
    })
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_process_then_lookup() {
    let state = AppState::default();
    let app = init_app!(state);

    for (body, expected) in [(target_receipt(), 28), (corner_market_receipt(), 109)] {
        let req = test::TestRequest::post()
            .uri("/receipts/process")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let created: ProcessReceiptResponse = test::read_body_json(resp).await;
        assert!(!created.id.is_empty());

        let req = test::TestRequest::get()
            .uri(&format!("/receipts/{}/points", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let points: PointsResponse = test::read_body_json(resp).await;
        let receipt: Receipt = serde_json::from_value(body).unwrap();
        assert_eq!(points.points, expected);
        assert_eq!(points.points, calculate_points(&receipt));
    }

    assert_eq!(state.store.len(), 2);
}

#[actix_web::test]
async fn test_each_submission_gets_a_new_id() {
    let state = AppState::default();
    let app = init_app!(state);

    let mut ids = Vec::new();
    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/receipts/process")
            .set_json(target_receipt())
            .to_request();
        let created: ProcessReceiptResponse = test::call_and_read_body_json(&app, req).await;
        ids.push(created.id);
    }

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    assert_eq!(state.store.len(), 3);
}

#[actix_web::test]
async fn test_lookup_unknown_id() {
    let app = init_app!(AppState::default());

    let req = test::TestRequest::get()
        .uri(&format!("/receipts/{}/points", uuid::Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, "Receipt not found.");
    assert_eq!(body.status_code, 404);
}

#[actix_web::test]
async fn test_wrong_method_on_process_is_not_found() {
    let state = AppState::default();
    let app = init_app!(state);

    for req in [
        test::TestRequest::get().uri("/receipts/process").to_request(),
        test::TestRequest::put().uri("/receipts/process").set_json(target_receipt()).to_request(),
        test::TestRequest::delete().uri("/receipts/process").to_request(),
    ] {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.message, "Unsupported method.");
    }

    assert!(state.store.is_empty());
}

#[actix_web::test]
async fn test_invalid_json_is_bad_request() {
    let state = AppState::default();
    let app = init_app!(state);

    for payload in ["{\"retailer\": ", "not json", "", "{\"items\": 3}"] {
        let req = test::TestRequest::post()
            .uri("/receipts/process")
            .insert_header(("content-type", "application/json"))
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {:?}", payload);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "bad_request");
        assert!(!body.message.is_empty());
    }

    assert!(state.store.is_empty());
}

#[actix_web::test]
async fn test_process_does_not_require_json_content_type() {
    let app = init_app!(AppState::default());

    let req = test::TestRequest::post()
        .uri("/receipts/process")
        .insert_header(("content-type", "text/plain"))
        .set_payload(target_receipt().to_string())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_unparseable_fields_score_zero_instead_of_failing() {
    let app = init_app!(AppState::default());

    let body = json!({
        "retailer": "",
        "purchaseDate": "yesterday",
        "purchaseTime": "late",
        "items": [{ "shortDescription": "abc", "price": "free" }],
        "total": "lots"
    });
    let req = test::TestRequest::post()
        .uri("/receipts/process")
        .set_json(&body)
        .to_request();
    let created: ProcessReceiptResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/receipts/{}/points", created.id))
        .to_request();
    let points: PointsResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(points.points, 0);
}

#[actix_web::test]
async fn test_lookup_without_points_suffix() {
    let state = AppState::default();
    state.store.put("known-id", 42);
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/receipts/known-id").to_request();
    let points: PointsResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(points.points, 42);
}

#[actix_web::test]
async fn test_large_receipt_is_accepted() {
    let state = AppState::default();
    let app = init_app!(state);

    let items: Vec<_> = (0..5000)
        .map(|i| json!({ "shortDescription": format!("Bulk item number {:05}", i), "price": "1.00" }))
        .collect();
    let body = json!({
        "retailer": "Warehouse Club",
        "purchaseDate": "2022-01-02",
        "purchaseTime": "10:00",
        "items": items,
        "total": "5000.00"
    });
    assert!(body.to_string().len() > 256 * 1024);

    let req = test::TestRequest::post()
        .uri("/receipts/process")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let created: ProcessReceiptResponse = test::read_body_json(resp).await;
    let receipt: Receipt = serde_json::from_value(body).unwrap();
    assert_eq!(state.store.get(&created.id), Some(calculate_points(&receipt)));
}

#[actix_web::test]
async fn test_null_body_and_null_fields_are_accepted() {
    let state = AppState::default();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/receipts/process")
        .set_payload("null")
        .to_request();
    let created: ProcessReceiptResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(state.store.get(&created.id), Some(0));

    let req = test::TestRequest::post()
        .uri("/receipts/process")
        .set_payload(r#"{"retailer":null,"items":null,"total":"1.00"}"#)
        .to_request();
    let created: ProcessReceiptResponse = test::call_and_read_body_json(&app, req).await;
    // round dollar + quarter multiple
    assert_eq!(state.store.get(&created.id), Some(75));
}
