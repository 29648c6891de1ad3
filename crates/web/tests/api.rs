//! API tests over the in-memory store: each request goes through the full
//! router, extractors, and error mapping.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use storage::Database;
use tower::ServiceExt;

fn app() -> Router {
    web::app(Database::in_memory())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn seed_category(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/categories",
        Some(json!({
            "category_type": "Seniors",
            "race_date": "2026-01-15",
            "max_duration_secs": 300,
            "lap_distance_m": 100
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn seed_approved_pair(app: &Router, category_id: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/bull-pairs",
        Some(json!({
            "pair_name": name,
            "owner_name_1": format!("{name} owner"),
            "phone_number": "0612345678",
            "category_id": category_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        app,
        "PATCH",
        &format!("/api/bull-pairs/{id}/status"),
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    id
}

#[tokio::test]
async fn category_crud_round_trip() {
    let app = app();
    let id = seed_category(&app).await;

    let (status, body) = send(&app, "GET", &format!("/api/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category_type"], "Seniors");
    assert_eq!(body["max_duration_secs"], 300);

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/categories/{id}"),
        Some(json!({ "lap_distance_m": 150 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lap_distance_m"], 150);

    let (status, _) = send(&app, "DELETE", &format!("/api/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn category_bounds_are_validated() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/categories",
        Some(json!({
            "category_type": "Seniors",
            "race_date": "2026-01-15",
            "max_duration_secs": 10,
            "lap_distance_m": 100
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    assert!(body["errors"].as_array().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn registrations_are_numbered_in_order() {
    let app = app();
    let category_id = seed_category(&app).await;
    seed_approved_pair(&app, &category_id, "Alpha").await;
    seed_approved_pair(&app, &category_id, "Bravo").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/bull-pairs?category_id={category_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let pairs = body.as_array().unwrap();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0]["registration_order"], 1);
    assert_eq!(pairs[1]["registration_order"], 2);
}

#[tokio::test]
async fn race_flow_over_http() {
    let app = app();
    let category_id = seed_category(&app).await;
    let alpha = seed_approved_pair(&app, &category_id, "Alpha").await;
    let bravo = seed_approved_pair(&app, &category_id, "Bravo").await;

    let (status, race) = send(
        &app,
        "POST",
        "/api/races",
        Some(json!({
            "category_id": category_id,
            "ordered_pair_ids": [alpha, bravo]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(race["status"], "in_progress");
    assert_eq!(race["is_order_locked"], true);
    let race_id = race["id"].as_str().unwrap();

    // A second race in the same category conflicts with the locked one.
    let (status, body) = send(
        &app,
        "POST",
        "/api/races",
        Some(json!({
            "category_id": category_id,
            "ordered_pair_ids": [alpha]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Race order is already locked");

    let (status, entries) = send(&app, "GET", &format!("/api/races/{race_id}/entries"), None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = entries.as_array().unwrap().clone();
    assert_eq!(entries.len(), 2);
    let first = entries[0]["id"].as_str().unwrap();
    let second = entries[1]["id"].as_str().unwrap();

    let (status, entry) = send(&app, "POST", &format!("/api/race-entries/{first}/begin"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["status"], "racing");

    // Only one entrant on the clock at a time.
    let (status, _) = send(&app, "POST", &format!("/api/race-entries/{second}/begin"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, lap) = send(
        &app,
        "POST",
        &format!("/api/race-entries/{first}/laps"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(lap["lap_number"], 1);
    assert_eq!(lap["distance_covered_m"], 100);

    // Finishing without the measured distance is rejected.
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/race-entries/{first}/finish"),
        Some(json!({ "elapsed_ms": 210000 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Final lap is awaiting a distance entry");

    let (status, entry) = send(
        &app,
        "POST",
        &format!("/api/race-entries/{first}/finish"),
        Some(json!({
            "elapsed_ms": 210000,
            "distance": { "meters": 40, "feet": 0, "inches": 0 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["status"], "completed");
    assert_eq!(entry["total_time_ms"], 210000);

    let (status, laps) = send(&app, "GET", &format!("/api/race-entries/{first}/laps"), None).await;
    assert_eq!(status, StatusCode::OK);
    let laps = laps.as_array().unwrap().clone();
    assert_eq!(laps.len(), 2);
    assert_eq!(laps[1]["distance_covered_m"], 40);
    assert_eq!(laps[1]["override_meters"], 40);

    // Second entrant hits the time ceiling.
    send(&app, "POST", &format!("/api/race-entries/{second}/begin"), None).await;
    let (status, entry) = send(
        &app,
        "POST",
        &format!("/api/race-entries/{second}/finish"),
        Some(json!({ "time_expired": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["total_time_ms"], 300000);

    // All entrants done: the race completed itself.
    let (status, race) = send(&app, "GET", &format!("/api/races/{race_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(race["status"], "completed");

    let (status, board) = send(
        &app,
        "GET",
        &format!("/api/leaderboard?category_id={category_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let board = board.as_array().unwrap().clone();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0]["pair_name"], "Alpha");
    assert_eq!(board[0]["rank"], 1);
    assert_eq!(board[0]["total_distance_m"], 140.0);
    assert_eq!(board[1]["pair_name"], "Bravo");
    assert_eq!(board[1]["total_distance_m"], 100.0);

    let (status, details) = send(&app, "GET", &format!("/api/races/{race_id}/details"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["category"]["category_type"], "Seniors");
    assert_eq!(details["entries"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_pair_ids_are_rejected() {
    let app = app();
    let category_id = seed_category(&app).await;
    let alpha = seed_approved_pair(&app, &category_id, "Alpha").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/races",
        Some(json!({
            "category_id": category_id,
            "ordered_pair_ids": [alpha, alpha]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        format!("Pair {alpha} appears more than once in the race order")
    );
}

#[tokio::test]
async fn unknown_ids_return_not_found() {
    let app = app();
    let ghost = uuid::Uuid::new_v4();

    let (status, _) = send(&app, "GET", &format!("/api/races/{ghost}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "POST", &format!("/api/race-entries/{ghost}/begin"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("Referenced record {ghost} does not resolve"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = app();
    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/leaderboard"].is_object());
    assert!(doc["paths"]["/api/races"].is_object());
}
