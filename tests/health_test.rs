mod common;

use axum::http::StatusCode;

use common::TestApp;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/v1/health").await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"].as_str().unwrap(), "ok");
}

#[tokio::test]
async fn test_health_check_db() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/v1/health/db").await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"].as_str().unwrap(), "ok");
}
