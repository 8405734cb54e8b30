use axum::Json;
use serde_json::{Value, json};

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Greeting")
    )
)]
pub async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello, World!" }))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "learnhub",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
