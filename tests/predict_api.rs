//! Integration test: prediction API endpoints

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use iris_mlops::api::{create_router, AppState};
use iris_mlops::domain::dataset::iris;
use iris_mlops::domain::{
    FeatureFrame, Label, LogisticRegression, ModelName, ModelVersion, PredictionError, Predictor,
};
use iris_mlops::infrastructure::services::PredictionService;

/// Labels each row by its first value, so tests can check order
#[derive(Debug)]
struct EchoPredictor;

impl Predictor for EchoPredictor {
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<Label>, PredictionError> {
        Ok(frame.values().rows().into_iter().map(|row| row[0] as Label).collect())
    }
}

fn version() -> ModelVersion {
    ModelVersion::new(ModelName::new("IrisLogisticRegressionModel").unwrap(), 1, "run")
}

fn echo_app() -> axum::Router {
    let service = PredictionService::new(version(), Arc::new(EchoPredictor));
    create_router(AppState::loaded(service))
}

fn iris_app() -> axum::Router {
    let dataset = iris::load();
    let mut model = LogisticRegression::new();
    model.fit(dataset.features(), dataset.targets()).unwrap();

    let service = PredictionService::new(version(), Arc::new(model));
    create_router(AppState::loaded(service))
}

fn unloaded_app() -> axum::Router {
    create_router(AppState::unloaded())
}

fn predict_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 64)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn assert_error(body: &Value) {
    let message = body["error"].as_str().expect("error field");
    assert!(!message.is_empty());
}

#[tokio::test]
async fn test_predict_setosa() {
    let body = json!({"data": [[5.1, 3.5, 1.4, 0.2]]}).to_string();
    let (status, body) = send(iris_app(), predict_request(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"predictions": [0]}));
}

#[tokio::test]
async fn test_predict_one_label_per_row_in_order() {
    let body = json!({"data": [
        [2.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0, 0.0],
        [2.0, 0.0, 0.0, 0.0]
    ]})
    .to_string();
    let (status, body) = send(echo_app(), predict_request(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"predictions": [2, 0, 1, 2]}));
}

#[tokio::test]
async fn test_predict_three_species() {
    let body = json!({"data": [
        [5.1, 3.5, 1.4, 0.2],
        [5.9, 3.0, 4.2, 1.5],
        [6.7, 3.0, 5.2, 2.3]
    ]})
    .to_string();
    let (status, body) = send(iris_app(), predict_request(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"predictions": [0, 1, 2]}));
}

#[tokio::test]
async fn test_predict_empty_data() {
    let (status, body) = send(echo_app(), predict_request(r#"{"data": []}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"predictions": []}));
}

#[tokio::test]
async fn test_predict_without_content_type() {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .body(Body::from(r#"{"data": [[1.0, 2.0, 3.0, 4.0]]}"#))
        .unwrap();
    let (status, body) = send(echo_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"predictions": [1]}));
}

#[tokio::test]
async fn test_model_not_loaded() {
    let bodies = [
        r#"{"data": [[5.1, 3.5, 1.4, 0.2]]}"#,
        r#"{"data": []}"#,
        r#"{"data": [["a"]]}"#,
        "not json",
        "",
    ];

    for body in bodies {
        let (status, json) = send(unloaded_app(), predict_request(body)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "body: {:?}", body);
        assert_eq!(json, json!({"error": "Model not loaded"}));
    }
}

#[tokio::test]
async fn test_short_row_rejected() {
    let body = json!({"data": [[5.1, 3.5, 1.4]]}).to_string();
    let (status, body) = send(echo_app(), predict_request(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body);
}

#[tokio::test]
async fn test_long_row_rejected() {
    let body = json!({"data": [[5.1, 3.5, 1.4, 0.2], [5.1, 3.5, 1.4, 0.2, 9.9]]}).to_string();
    let (status, body) = send(echo_app(), predict_request(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body);
}

#[tokio::test]
async fn test_non_numeric_value_rejected() {
    let body = json!({"data": [[5.1, "3.5", 1.4, 0.2]]}).to_string();
    let (status, body) = send(echo_app(), predict_request(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body);
}

#[tokio::test]
async fn test_missing_data_field_rejected() {
    let (status, body) = send(echo_app(), predict_request(r#"{"rows": []}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body);
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let (status, body) = send(echo_app(), predict_request("{\"data\": [")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body);
}

#[tokio::test]
async fn test_predict_requires_post() {
    let request = Request::builder()
        .uri("/predict")
        .body(Body::empty())
        .unwrap();
    let response = echo_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health_endpoint() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(unloaded_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_ready_reports_model() {
    let request = Request::builder().uri("/ready").body(Body::empty()).unwrap();
    let (status, body) = send(echo_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"]["name"], "IrisLogisticRegressionModel");
    assert_eq!(body["model"]["version"], 1);
}

#[tokio::test]
async fn test_ready_without_model() {
    let request = Request::builder().uri("/ready").body(Body::empty()).unwrap();
    let (status, body) = send(unloaded_app(), request).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
}

#[tokio::test]
async fn test_live_endpoint() {
    let request = Request::builder().uri("/live").body(Body::empty()).unwrap();
    let response = unloaded_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
