use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use manytypes::server::routes::create_router;
use manytypes::server::AppState;
use manytypes::TypeChart;

fn chart() -> TypeChart {
    TypeChart::new(
        vec![
            "Normal".into(),
            "Grass".into(),
            "Dragon".into(),
            "Flying".into(),
            "Ghost".into(),
        ],
        vec![
            vec![1.0, 1.0, 1.0, 1.0, 0.0],
            vec![1.0, 0.5, 0.5, 0.5, 1.0],
            vec![1.0, 1.0, 2.0, 1.0, 1.0],
            vec![1.0, 2.0, 1.0, 1.0, 1.0],
            vec![0.0, 1.0, 1.0, 1.0, 2.0],
        ],
        "2023-09-18",
        Some("v1.3.0".into()),
    )
    .expect("valid chart")
}

fn app(static_dir: &Path) -> Router {
    create_router(AppState::new(chart()), static_dir)
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (status, String::from_utf8_lossy(&bytes).to_string())
}

fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("response should be valid json")
}

#[tokio::test]
async fn health_endpoint_returns_ok_json() {
    let (status, body) = get(app(Path::new("missing-dist")), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["status"], "ok");
}

#[tokio::test]
async fn types_endpoint_lists_types_in_index_order() {
    let (status, body) = get(app(Path::new("missing-dist")), "/api/types").await;
    assert_eq!(status, StatusCode::OK);
    let payload = json(&body);
    assert_eq!(
        payload["types"],
        serde_json::json!(["Normal", "Grass", "Dragon", "Flying", "Ghost"])
    );
    assert_eq!(payload["creation_date"], "2023-09-18");
    assert_eq!(payload["rom_version"], "v1.3.0");
}

#[tokio::test]
async fn effectiveness_endpoint_multiplies_defending_slots() {
    let (status, body) = get(
        app(Path::new("missing-dist")),
        "/api/effectiveness?attack=Grass&defend1=Dragon&defend2=Flying&defend3=",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let payload = json(&body);
    assert_eq!(payload["multiplier"], 0.25);
    assert_eq!(payload["verdict"], "not_very_effective");
    assert_eq!(payload["defend"], serde_json::json!(["Dragon", "Flying", "none"]));
}

#[tokio::test]
async fn effectiveness_endpoint_without_defenders_is_neutral() {
    let (status, body) = get(app(Path::new("missing-dist")), "/api/effectiveness?attack=Ghost").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["multiplier"], 1.0);
}

#[tokio::test]
async fn effectiveness_endpoint_rejects_unknown_attacker() {
    let (status, body) = get(
        app(Path::new("missing-dist")),
        "/api/effectiveness?attack=Sound&defend1=Grass",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let payload = json(&body);
    assert_eq!(payload["status"], "error");
    assert!(payload["message"]
        .as_str()
        .is_some_and(|message| message.contains("Sound")));
}

#[tokio::test]
async fn defense_endpoint_returns_profile() {
    let (status, body) = get(app(Path::new("missing-dist")), "/api/defense?defend1=ghost").await;
    assert_eq!(status, StatusCode::OK);
    let payload = json(&body);
    let attackers = payload["attackers"].as_array().expect("attackers array");
    assert_eq!(attackers.len(), 5);
    assert_eq!(attackers[0]["attacking"], "Normal");
    assert_eq!(attackers[0]["verdict"], "immune");
    assert_eq!(attackers[4]["multiplier"], 2.0);
}

#[tokio::test]
async fn non_api_paths_fall_back_to_static_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("index.html"), "<h1>Too Many Types Checker</h1>")
        .expect("index written");

    let (status, body) = get(app(dir.path()), "/index.html").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Too Many Types Checker"));

    let (status, _) = get(app(dir.path()), "/nope.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
