use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "API Performance Badges Engine",
        "status": "operational",
        "version": state.badge_service.engine.algorithm_version,
        "timestamp": chrono::Utc::now(),
    }))
}

pub async fn health() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "ok")
}

pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let engine = &state.badge_service.engine;
    let catalog_ok = !engine.catalog.is_empty();
    let threshold_ok = engine.threshold_is_sane();
    let unknown_criteria = engine.catalog.unknown_criteria().len();

    let ok = catalog_ok && threshold_ok;
    let status = if ok {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
            "ready": ok,
            "catalog_badges": engine.catalog.len(),
            "threshold": threshold_ok,
            "unknown_criteria": unknown_criteria,
        })),
    )
        .into_response()
}

pub async fn liveness() -> impl IntoResponse {
    (axum::http::StatusCode::OK, Json(serde_json::json!({"alive": true}))).into_response()
}
