use super::*;
use crate::state::test_helpers::spawn_app;

#[tokio::test]
async fn healthz_returns_ok() {
    let addr = spawn_app(AppState::default()).await;
    let res = reqwest::get(format!("http://{addr}/healthz")).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn relay_stats_start_at_zero() {
    let addr = spawn_app(AppState::default()).await;
    let body: serde_json::Value = reqwest::get(format!("http://{addr}/api/relay"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, serde_json::json!({ "clients": 0, "frames_relayed": 0 }));
}

#[tokio::test]
async fn unknown_path_is_json_404() {
    let addr = spawn_app(AppState::default()).await;
    let res = reqwest::get(format!("http://{addr}/nope")).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "code": 404, "message": "Not found" }));
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let addr = spawn_app(AppState::default()).await;
    let res = reqwest::get(format!("http://{addr}/healthz")).await.unwrap();
    let headers = res.headers();
    for (name, value) in SECURITY_HEADERS {
        assert_eq!(headers.get(name.as_str()).and_then(|v| v.to_str().ok()), Some(value), "{name}");
    }
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let addr = spawn_app(AppState::default()).await;
    let res = reqwest::Client::new()
        .get(format!("http://{addr}/healthz"))
        .header("Origin", "http://camera.example")
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.headers().get("access-control-allow-origin").and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
