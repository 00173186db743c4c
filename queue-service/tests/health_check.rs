mod common;

use common::TestApp;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;

    assert!(response.status().is_success());
    assert!(response.headers().get("x-request-id").is_some());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "queue-service");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn().await;

    let response = app.get("/ready").await;

    assert!(response.status().is_success());
}

#[tokio::test]
async fn root_serves_banner() {
    let app = TestApp::spawn().await;

    let response = app.get("/").await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.text().await.expect("Failed to read body"),
        "Welcome to the SMART Q backend!"
    );
}

#[tokio::test]
async fn request_id_is_echoed() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/health"))
        .header("x-request-id", "req-42")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(
        response.headers().get("x-request-id").unwrap().to_str().unwrap(),
        "req-42"
    );
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
}

#[tokio::test]
async fn metrics_endpoint_reports_http_and_record_metrics() {
    let app = TestApp::spawn().await;
    app.create("bank", common::bank_customer()).await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("queue_record_operations_total"));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/records/patient"))
        .header("origin", "http://frontend.example")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}
