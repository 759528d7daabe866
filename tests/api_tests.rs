use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

mod common;

use common::{leg, trip, InMemoryFeatureRepository, StubEngine};

struct TestApp {
    router: axum::Router,
    engine: Arc<StubEngine>,
}

fn setup_test_app() -> TestApp {
    let engine = Arc::new(StubEngine::new(
        trip(vec![leg(0, 10, 600.0)]),
        trip(vec![leg(8, 2, 650.0), leg(3, 7, 700.0)]),
    ));
    let repo = Arc::new(InMemoryFeatureRepository::with_backup(vec![
        common::marker(1, "Fountain"),
        common::marker(2, "Bench"),
    ]));
    let parks = common::write_geojson("parks", &common::park_collection());
    let config = common::get_test_config(parks, common::missing_path("trees"));

    let state = common::test_state(engine.clone(), repo, config);
    TestApp {
        router: greenroute::routes::create_router(state),
        engine,
    }
}

async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_ping() {
    let app = setup_test_app();
    let (status, body) = send(&app, "GET", "/ping", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "service": "backend"}));
}

#[tokio::test]
async fn test_green_route_single_point_is_bad_request() {
    let app = setup_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/green-route",
        Some(json!({"points": [[13.4, 52.5]]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "need at least two points [[lon,lat],[lon,lat]]"})
    );
    assert_eq!(app.engine.call_count(), 0);
}

#[tokio::test]
async fn test_green_route_accepted() {
    let app = setup_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/green-route",
        Some(json!({"points": [[13.40, 52.52], [13.41, 52.53]], "max_extra_minutes": 5})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["green_polygons_used"], 1);
    assert_eq!(body["green_route"]["trip"]["legs"][0]["summary"]["time"], 650.0);
    assert!(body["base_route"]["trip"]["legs"].is_array());
}

#[tokio::test]
async fn test_green_route_engine_failure_is_bad_gateway() {
    let engine = Arc::new(StubEngine::failing("Request timed out"));
    let repo = Arc::new(InMemoryFeatureRepository::default());
    let config = common::get_test_config(common::missing_path("parks"), common::missing_path("trees"));
    let app = TestApp {
        router: greenroute::routes::create_router(common::test_state(engine.clone(), repo, config)),
        engine,
    };

    let (status, body) = send(
        &app,
        "POST",
        "/api/green-route",
        Some(json!({"points": [[13.40, 52.52], [13.41, 52.53]]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "Routing service error");
}

#[tokio::test]
async fn test_plain_route_caps_alternates() {
    let app = setup_test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/route",
        Some(json!({"points": [[13.40, 52.52], [13.41, 52.53]], "alternatives": 7})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // Returned unchanged from the engine
    assert_eq!(body["trip"]["status"], 0);

    let requests = app.engine.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].alternates, Some(3));
    assert_eq!(requests[0].directions_options.language.as_deref(), Some("de"));
}

#[tokio::test]
async fn test_plain_route_validation() {
    let app = setup_test_app();

    let (status, _) = send(&app, "POST", "/api/route", Some(json!({"points": []}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/route",
        Some(json!({"points": [[13.40, 52.52], [200.0, 52.53]]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
    assert_eq!(app.engine.call_count(), 0);
}

#[tokio::test]
async fn test_marker_lifecycle() {
    let app = setup_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/features",
        Some(json!({"lat": 52.521, "lng": 13.402, "name": "Tree", "type": "Tree"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "id": 3}));

    let (_, markers) = send(&app, "GET", "/features", None).await;
    assert_eq!(markers.as_array().unwrap().len(), 3);
    assert_eq!(markers[2]["type"], "Tree");

    let (status, body) = send(&app, "DELETE", "/features/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "deleted", "id": 1}));

    let (status, _) = send(&app, "DELETE", "/features/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "POST", "/reset_features", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "reset_done"}));

    let (_, markers) = send(&app, "GET", "/features", None).await;
    let names: Vec<&str> = markers
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Fountain", "Bench"]);
}

#[tokio::test]
async fn test_add_marker_rejects_bad_coordinates() {
    let app = setup_test_app();
    let (status, _) = send(
        &app,
        "POST",
        "/features",
        Some(json!({"lat": 95.0, "lng": 13.4, "name": "Nowhere", "type": "Bench"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_districts() {
    let app = setup_test_app();
    let (status, body) = send(&app, "GET", "/districts", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Mitte");
    assert_eq!(body[0]["geometry"]["type"], "Point");
}

#[tokio::test]
async fn test_debug_endpoints() {
    let app = setup_test_app();

    let (_, body) = send(&app, "GET", "/debug/test", None).await;
    assert_eq!(body["status"], "debug endpoints working");

    let (status, body) = send(&app, "GET", "/debug/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["checks"]["database"], "ok");
    assert_eq!(body["checks"]["marker_count"], 2);

    let (status, body) = send(&app, "GET", "/debug/parks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "FeatureCollection");
    assert_eq!(body["total_features"], 2);

    // Trees source is missing in the test config
    let (status, body) = send(&app, "GET", "/debug/trees", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "GET", "/debug/shrubs", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
